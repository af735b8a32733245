use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TensorError {
    #[error("Index Out of Bounds: {0}")]
    IndexOutOfBounds(String),
    #[error("Shape Mismatch: {0}")]
    ShapeMismatch(String),
    #[error("Thread Pool Error: {0}")]
    ThreadPool(String),
}
