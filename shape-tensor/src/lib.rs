//! Library crate for shape_tensor
//!
//! Dense tensors whose shape is part of their type. Element access, iteration, outer products
//! and index contraction are all checked against the shape at compile time.
//!
//! ```
//! use shape_tensor::{shape, tensor_mul, Tensor};
//!
//! let v: Tensor<i32, shape![3]> = Tensor::new([1, 2, 3]);
//! let m = tensor_mul(&v, &v);
//! assert_eq!(m, Tensor::new([[1, 2, 3], [2, 4, 6], [3, 6, 9]]));
//!
//! let trace = m.contract::<0, 1>();
//! assert_eq!(trace.into_value(), 14);
//! ```
//!
//! A literal that does not match the declared shape is rejected by the compiler:
//!
//! ```compile_fail
//! use shape_tensor::{shape, Tensor};
//!
//! let v: Tensor<i32, shape![2, 2]> = Tensor::new([[1, 2], [3, 4, 5]]);
//! ```
//!
//! So is a multi-index of the wrong length:
//!
//! ```compile_fail
//! use shape_tensor::{shape, Tensor};
//!
//! let m: Tensor<i32, shape![2, 2]> = Tensor::default();
//! let _ = m[[0, 1, 1]];
//! ```

mod algebra;
mod constructive;
mod contraction;
mod display;
mod error;
mod iterator;
mod misc;
mod parallel;
mod product;
mod shape;
mod view;


pub use crate::algebra::{AxisSize, Concat, Contract, RemoveAxis, remove_axes};
pub use crate::error::TensorError;
pub use crate::iterator::{Cursor, Indices, TensorIter};
pub use crate::parallel::ParallelConfig;
pub use crate::product::tensor_mul;
pub use crate::shape::{Dim, Grow, IncreaseOrder, MAX_RANK, MultiIndex, Prepend, Scalar, Shape};

pub type Result<T> = std::result::Result<T, error::TensorError>;

/// Represents a dense tensor with element type T and a compile-time shape S.
///
/// The shape is a type-level list of dimension sizes (see [`shape!`]), so tensors of different
/// shapes are different types. Elements are stored inline as nested arrays: a tensor of shape
/// `[d0, d1, ..., dn]` holds `d0` tensors of shape `[d1, ..., dn]` one after another, and a tensor
/// of the empty shape holds a single value.
///
/// Every operation allocates a fresh result, operands are never modified in place.
pub struct Tensor<T, S: Shape> {
    data: S::Storage<T>,
}

/// A rank-1 tensor of length `D`.
pub type Vector<T, const D: usize> = Tensor<T, shape![D]>;

/// A rank-2 tensor with `R` rows and `C` columns.
pub type Matrix<T, const R: usize, const C: usize> = Tensor<T, shape![R, C]>;
