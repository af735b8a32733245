use super::*;
use crate::shape::prepend_index;
use std::ops::{Index, IndexMut};

impl<T, S: Shape> Tensor<T, S> {
    /// Returns the element at the given multi-index.
    ///
    /// # Panics
    /// Panics if an offset is out of bounds for its axis.
    pub fn at(&self, index: S::Index) -> &T {
        S::element(&self.data, index.as_ref())
    }

    /// Returns a mutable reference to the element at the given multi-index.
    ///
    /// # Panics
    /// Panics if an offset is out of bounds for its axis.
    pub fn at_mut(&mut self, index: S::Index) -> &mut T {
        S::element_mut(&mut self.data, index.as_ref())
    }

    // Validates a multi-dimensional index given as a slice
    fn check_index(indices: &[usize]) -> Result<()> {
        if indices.len() != S::RANK {
            return Err(TensorError::ShapeMismatch(format!(
                "Index dimension mismatch: {} != {}",
                indices.len(),
                S::RANK
            )));
        }

        for (i, (&idx, &size)) in indices.iter().zip(S::dims().as_ref()).enumerate() {
            if idx >= size {
                return Err(TensorError::IndexOutOfBounds(format!(
                    "Index {idx} out of bounds for dimension {i} with size {size}"
                )));
            }
        }

        Ok(())
    }

    /// Gets element at multi-dimensional index.
    /// Returns an error if the index has the wrong length or is out of bounds.
    pub fn get(&self, indices: &[usize]) -> Result<&T> {
        Self::check_index(indices)?;
        Ok(S::element(&self.data, indices))
    }

    /// Gets mutable element at multi-dimensional index.
    /// Returns an error if the index has the wrong length or is out of bounds.
    pub fn get_mut(&mut self, indices: &[usize]) -> Result<&mut T> {
        Self::check_index(indices)?;
        Ok(S::element_mut(&mut self.data, indices))
    }

    /// Returns dimension sizes.
    pub fn shape(&self) -> S::Index {
        S::dims()
    }

    /// Returns row-major strides.
    pub fn strides(&self) -> S::Index {
        S::strides()
    }

    pub fn rank(&self) -> usize {
        S::RANK
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        S::LEN
    }

    pub fn is_empty(&self) -> bool {
        S::LEN == 0
    }

    /// Returns a copy of the tensor with a different shape of the same size, elements kept in
    /// row-major order.
    ///
    /// ```compile_fail
    /// use shape_tensor::{shape, Tensor};
    ///
    /// let t: Tensor<i32, shape![2, 3]> = Tensor::default();
    /// let _ = t.reshape::<shape![4, 2]>();
    /// ```
    pub fn reshape<R: Shape>(&self) -> Tensor<T, R>
    where
        T: Clone,
    {
        const { assert!(S::LEN == R::LEN, "reshape must preserve the number of elements") };

        Tensor::from_fn(|index| self.at(S::unravel(R::offset(&index))).clone())
    }
}

impl<T, const D: usize, Tail: Shape> Tensor<T, Dim<D, Tail>>
where
    Tail::Index: Grow,
{
    /// Returns a copy of the sub-tensor at position `k` along the leading axis.
    pub fn subtensor(&self, k: usize) -> Result<Tensor<T, Tail>>
    where
        T: Clone,
    {
        if k >= D {
            return Err(TensorError::IndexOutOfBounds(format!(
                "Index {k} out of bounds for dimension 0 with size {D}"
            )));
        }

        Ok(Tensor::from_fn(|tail| self.at(prepend_index(k, &tail)).clone()))
    }

    /// Returns copies of all sub-tensors along the leading axis.
    pub fn subtensors(&self) -> impl Iterator<Item = Tensor<T, Tail>> + '_
    where
        T: Clone,
    {
        (0..D).map(move |k| Tensor::from_fn(|tail| self.at(prepend_index(k, &tail)).clone()))
    }
}

impl<T, S: Shape> Index<S::Index> for Tensor<T, S> {
    type Output = T;

    fn index(&self, index: S::Index) -> &Self::Output {
        self.at(index)
    }
}

impl<T, S: Shape> IndexMut<S::Index> for Tensor<T, S> {
    fn index_mut(&mut self, index: S::Index) -> &mut Self::Output {
        self.at_mut(index)
    }
}
