use super::*;
use num_traits::{One, Zero};

impl<T, S: Shape> Tensor<T, S> {
    /// Creates a tensor from nested arrays mirroring the shape.
    ///
    /// The argument type is derived from the shape, so a literal with a wrong element count on
    /// any axis does not compile.
    pub fn new(data: S::Storage<T>) -> Self {
        Self { data }
    }

    /// Creates a tensor by calling `f` with the multi-index of every element.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnMut(S::Index) -> T,
    {
        Self { data: S::build(f) }
    }

    /// Creates a tensor from elements listed in row-major order.
    /// Returns an error if the number of elements does not match the shape.
    pub fn from_row_major(mut data: Vec<T>) -> Result<Self>
    where
        T: Default,
    {
        if data.len() != S::LEN {
            return Err(TensorError::ShapeMismatch(format!(
                "Cannot build tensor of shape {:?} from {} elements",
                S::dims(),
                data.len()
            )));
        }

        Ok(Self::from_fn(|index| std::mem::take(&mut data[S::offset(&index)])))
    }

    /// Creates a tensor filled with zeros.
    pub fn zeros() -> Self
    where
        T: Zero,
    {
        Self::from_fn(|_| T::zero())
    }

    /// Creates a tensor filled with ones.
    pub fn ones() -> Self
    where
        T: One,
    {
        Self::from_fn(|_| T::one())
    }
}

impl<T: Default, S: Shape> Default for Tensor<T, S> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T> From<T> for Tensor<T, Scalar> {
    fn from(value: T) -> Self {
        Self { data: value }
    }
}

impl<T> Tensor<T, Scalar> {
    /// Returns the value of a rank-0 tensor.
    pub fn value(&self) -> &T {
        &self.data
    }

    /// Unwraps the value of a rank-0 tensor.
    pub fn into_value(self) -> T {
        self.data
    }
}
