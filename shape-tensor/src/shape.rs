//! Type-level shapes.
//!
//! A shape is a type-level list of dimension sizes: [`Scalar`] is the empty shape and
//! `Dim<D, Tail>` prepends an axis of size `D` to `Tail`. The [`shape!`](crate::shape) macro
//! spells them out, e.g. `shape![2, 3]` is `Dim<2, Dim<3, Scalar>>`.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// The highest rank a shape can have.
pub const MAX_RANK: usize = 12;

/// A multi-index: one offset per axis, most significant axis first.
///
/// Implemented for `[usize; K]` with `K <= MAX_RANK`, so the length of an index is part of its
/// type and a multi-index of the wrong length does not type-check.
pub trait MultiIndex:
    Copy + Default + fmt::Debug + Eq + Ord + Hash + Send + Sync + AsRef<[usize]> + AsMut<[usize]> + 'static
{
}

/// A multi-index which can be extended by one more leading axis.
pub trait Grow: MultiIndex {
    type Grown: MultiIndex;
}

macro_rules! impl_multi_index {
    ($($rank:literal),* $(,)?) => {
        $( impl MultiIndex for [usize; $rank] {} )*
    };
}

macro_rules! impl_grow {
    ($($rank:literal => $grown:literal),* $(,)?) => {
        $( impl Grow for [usize; $rank] { type Grown = [usize; $grown]; } )*
    };
}

impl_multi_index!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12);
impl_grow!(0 => 1, 1 => 2, 2 => 3, 3 => 4, 4 => 5, 5 => 6, 6 => 7, 7 => 8, 8 => 9, 9 => 10, 10 => 11, 11 => 12);

/// Builds an index with `head` as its leading offset followed by `tail`.
pub(crate) fn prepend_index<I: Grow>(head: usize, tail: &I) -> I::Grown {
    let mut index = I::Grown::default();
    let slots = index.as_mut();
    slots[0] = head;
    slots[1..].copy_from_slice(tail.as_ref());
    index
}

/// A compile-time tensor shape.
pub trait Shape: Copy + Default + fmt::Debug + Eq + Ord + Hash + Send + Sync + 'static {
    /// Number of axes.
    const RANK: usize;
    /// Number of elements, the product of all dimension sizes.
    const LEN: usize;

    /// Multi-index addressing a single element.
    type Index: MultiIndex;
    /// Nested array layout holding the elements: `T` for a scalar, `[Tail::Storage<T>; D]` otherwise.
    type Storage<T>;

    /// Returns dimension sizes.
    fn dims() -> Self::Index;

    /// Builds storage calling `f` once for every multi-index.
    fn build<T, F>(f: F) -> Self::Storage<T>
    where
        F: FnMut(Self::Index) -> T;

    fn element<'a, T>(storage: &'a Self::Storage<T>, index: &[usize]) -> &'a T;

    fn element_mut<'a, T>(storage: &'a mut Self::Storage<T>, index: &[usize]) -> &'a mut T;

    /// Writes storage as a nested bracketed list.
    fn fmt_storage<T: fmt::Display>(storage: &Self::Storage<T>, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    /// Returns row-major strides.
    fn strides() -> Self::Index {
        let dims = Self::dims();
        let mut strides = Self::Index::default();
        let mut stride = 1;
        for (slot, &dim) in strides.as_mut().iter_mut().zip(dims.as_ref()).rev() {
            *slot = stride;
            stride *= dim;
        }
        strides
    }

    /// Converts a multi-index to its row-major linear offset.
    fn offset(index: &Self::Index) -> usize {
        index.as_ref().iter().zip(Self::strides().as_ref()).map(|(idx, stride)| idx * stride).sum()
    }

    /// Converts a row-major linear offset back to a multi-index.
    fn unravel(mut offset: usize) -> Self::Index {
        let dims = Self::dims();
        let mut index = Self::Index::default();
        for (slot, &dim) in index.as_mut().iter_mut().zip(dims.as_ref()).rev() {
            *slot = offset % dim;
            offset /= dim;
        }
        index
    }
}

/// The empty shape of a rank-0 tensor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Scalar;

/// A leading axis of size `D` followed by the axes of `Tail`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dim<const D: usize, Tail>(PhantomData<Tail>);

impl Shape for Scalar {
    const RANK: usize = 0;
    const LEN: usize = 1;

    type Index = [usize; 0];
    type Storage<T> = T;

    fn dims() -> Self::Index {
        []
    }

    fn build<T, F>(mut f: F) -> Self::Storage<T>
    where
        F: FnMut(Self::Index) -> T,
    {
        f([])
    }

    fn element<'a, T>(storage: &'a Self::Storage<T>, index: &[usize]) -> &'a T {
        debug_assert!(index.is_empty());
        storage
    }

    fn element_mut<'a, T>(storage: &'a mut Self::Storage<T>, index: &[usize]) -> &'a mut T {
        debug_assert!(index.is_empty());
        storage
    }

    fn fmt_storage<T: fmt::Display>(storage: &Self::Storage<T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(storage, f)
    }
}

impl<const D: usize, Tail: Shape> Shape for Dim<D, Tail>
where
    Tail::Index: Grow,
{
    const RANK: usize = Tail::RANK + 1;
    const LEN: usize = D * Tail::LEN;

    type Index = <Tail::Index as Grow>::Grown;
    type Storage<T> = [Tail::Storage<T>; D];

    fn dims() -> Self::Index {
        prepend_index(D, &Tail::dims())
    }

    fn build<T, F>(mut f: F) -> Self::Storage<T>
    where
        F: FnMut(Self::Index) -> T,
    {
        std::array::from_fn(|head| Tail::build(|tail| f(prepend_index(head, &tail))))
    }

    fn element<'a, T>(storage: &'a Self::Storage<T>, index: &[usize]) -> &'a T {
        Tail::element(&storage[index[0]], &index[1..])
    }

    fn element_mut<'a, T>(storage: &'a mut Self::Storage<T>, index: &[usize]) -> &'a mut T {
        Tail::element_mut(&mut storage[index[0]], &index[1..])
    }

    fn fmt_storage<T: fmt::Display>(storage: &Self::Storage<T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (position, child) in storage.iter().enumerate() {
            if position > 0 {
                f.write_str(",")?;
                if Self::RANK > 1 {
                    writeln!(f)?;
                }
            }
            Tail::fmt_storage(child, f)?;
        }
        f.write_str("]")
    }
}

/// Adds a leading axis of size `N` to a shape.
pub trait Prepend<const N: usize>: Shape {
    type Output: Shape;
}

impl<const N: usize, S: Shape> Prepend<N> for S
where
    S::Index: Grow,
{
    type Output = Dim<N, S>;
}

/// The shape `S` with one more leading axis of size `N`.
pub type IncreaseOrder<S, const N: usize> = <S as Prepend<N>>::Output;

/// Spells a shape type from its dimension sizes, most significant axis first.
///
/// ```
/// use shape_tensor::{shape, Dim, Scalar, Shape};
///
/// type Cube = shape![2, 3, 4];
/// assert_eq!(Cube::dims(), [2, 3, 4]);
/// assert_eq!(Cube::LEN, 24);
/// let _: Dim<5, Scalar> = <shape![5]>::default();
/// ```
#[macro_export]
macro_rules! shape {
    () => {
        $crate::Scalar
    };
    ($head:expr $(, $tail:expr)* $(,)?) => {
        $crate::Dim<{ $head }, $crate::shape![$($tail),*]>
    };
}
