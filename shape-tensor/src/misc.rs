use super::*;
use std::fmt;
use std::hash::{Hash, Hasher};

impl<T: PartialEq, S: Shape> PartialEq for Tensor<T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.elements().eq(other.elements())
    }
}

impl<T: Eq, S: Shape> Eq for Tensor<T, S> {}

impl<T: Hash, S: Shape> Hash for Tensor<T, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.elements().for_each(|value| value.hash(state));
    }
}

impl<T: Clone, S: Shape> Clone for Tensor<T, S> {
    fn clone(&self) -> Self {
        self.map(T::clone)
    }
}

impl<T: Copy, S: Shape> Copy for Tensor<T, S> where S::Storage<T>: Copy {}

impl<T: fmt::Debug, S: Shape> fmt::Debug for Tensor<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &S::dims())
            .field("elements", &self.elements().collect::<Vec<_>>())
            .finish()
    }
}
