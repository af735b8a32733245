//! Compile-time shape arithmetic: axis sizes, concatenation and axis removal.
//!
//! Axis positions are const generics. The traits here are implemented for every axis position
//! below [`MAX_RANK`](crate::MAX_RANK), so asking for an axis a shape does not have, or for a
//! contraction of an axis with itself, fails to type-check.

use crate::shape::{Dim, Grow, IncreaseOrder, MultiIndex, Prepend, Scalar, Shape};

/// Size of the axis at position `AXIS`.
pub trait AxisSize<const AXIS: usize>: Shape {
    const SIZE: usize;
}

/// Shape with the axis at position `AXIS` deleted, other axes keeping their relative order.
pub trait RemoveAxis<const AXIS: usize>: Shape {
    type Output: Shape;
}

impl<const D: usize, Tail: Shape> AxisSize<0> for Dim<D, Tail>
where
    Tail::Index: Grow,
{
    const SIZE: usize = D;
}

impl<const D: usize, Tail: Shape> RemoveAxis<0> for Dim<D, Tail>
where
    Tail::Index: Grow,
{
    type Output = Tail;
}

macro_rules! impl_axis_traits {
    ($($axis:literal => $inner:literal),* $(,)?) => {
        $(
            impl<const D: usize, Tail: AxisSize<$inner>> AxisSize<$axis> for Dim<D, Tail>
            where
                Tail::Index: Grow,
            {
                const SIZE: usize = <Tail as AxisSize<$inner>>::SIZE;
            }

            impl<const D: usize, Tail: RemoveAxis<$inner>> RemoveAxis<$axis> for Dim<D, Tail>
            where
                Tail::Index: Grow,
                <Tail as RemoveAxis<$inner>>::Output: Prepend<D>,
            {
                type Output = IncreaseOrder<<Tail as RemoveAxis<$inner>>::Output, D>;
            }
        )*
    };
}

impl_axis_traits!(1 => 0, 2 => 1, 3 => 2, 4 => 3, 5 => 4, 6 => 5, 7 => 6, 8 => 7, 9 => 8, 10 => 9, 11 => 10);

/// Concatenation of two shapes, the axes of `Self` first.
pub trait Concat<R: Shape>: Shape {
    type Output: Shape;

    /// Joins operand indices `left ++ right` into an index of the concatenated shape.
    fn join(left: &Self::Index, right: &R::Index) -> <Self::Output as Shape>::Index {
        let mut index = <Self::Output as Shape>::Index::default();
        let (head, tail) = index.as_mut().split_at_mut(Self::RANK);
        head.copy_from_slice(left.as_ref());
        tail.copy_from_slice(right.as_ref());
        index
    }

    /// Splits an index of the concatenated shape back into operand indices.
    fn split(index: &<Self::Output as Shape>::Index) -> (Self::Index, R::Index) {
        let (head, tail) = index.as_ref().split_at(Self::RANK);
        let mut left = Self::Index::default();
        let mut right = R::Index::default();
        left.as_mut().copy_from_slice(head);
        right.as_mut().copy_from_slice(tail);
        (left, right)
    }
}

impl<R: Shape> Concat<R> for Scalar {
    type Output = R;
}

impl<const D: usize, Tail, R> Concat<R> for Dim<D, Tail>
where
    Tail: Concat<R>,
    Tail::Index: Grow,
    R: Shape,
    <Tail as Concat<R>>::Output: Prepend<D>,
{
    type Output = IncreaseOrder<<Tail as Concat<R>>::Output, D>;
}

/// Contraction of the axes at positions `M` and `N`.
///
/// Implemented for every pair of distinct axis positions that exist in the shape. Whether both
/// axes have equal size is exposed as [`Contract::MATCHING`] and asserted at compile time by
/// [`Tensor::contract`](crate::Tensor::contract).
pub trait Contract<const M: usize, const N: usize>: Shape {
    /// Shape with both axes removed.
    type Output: Shape;

    /// Whether both contracted axes have the same size.
    const MATCHING: bool;

    /// Builds the result index from a source index by dropping the contracted positions.
    fn project(index: &Self::Index) -> <Self::Output as Shape>::Index {
        remove_axes(index.as_ref(), M, N)
    }
}

macro_rules! impl_contract {
    (@pair $low:literal, $high:literal) => {
        // the higher axis goes first so that the lower position stays valid
        impl<S> Contract<$low, $high> for S
        where
            S: AxisSize<$low> + AxisSize<$high> + RemoveAxis<$high>,
            <S as RemoveAxis<$high>>::Output: RemoveAxis<$low>,
        {
            type Output = <<S as RemoveAxis<$high>>::Output as RemoveAxis<$low>>::Output;

            const MATCHING: bool = <S as AxisSize<$low>>::SIZE == <S as AxisSize<$high>>::SIZE;
        }

        impl<S> Contract<$high, $low> for S
        where
            S: AxisSize<$low> + AxisSize<$high> + RemoveAxis<$high>,
            <S as RemoveAxis<$high>>::Output: RemoveAxis<$low>,
        {
            type Output = <<S as RemoveAxis<$high>>::Output as RemoveAxis<$low>>::Output;

            const MATCHING: bool = <S as AxisSize<$low>>::SIZE == <S as AxisSize<$high>>::SIZE;
        }
    };
    ($($low:literal => [$($high:literal),*]);* $(;)?) => {
        $( $( impl_contract!(@pair $low, $high); )* )*
    };
}

impl_contract! {
    0 => [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];
    1 => [2, 3, 4, 5, 6, 7, 8, 9, 10, 11];
    2 => [3, 4, 5, 6, 7, 8, 9, 10, 11];
    3 => [4, 5, 6, 7, 8, 9, 10, 11];
    4 => [5, 6, 7, 8, 9, 10, 11];
    5 => [6, 7, 8, 9, 10, 11];
    6 => [7, 8, 9, 10, 11];
    7 => [8, 9, 10, 11];
    8 => [9, 10, 11];
    9 => [10, 11];
    10 => [11];
}

/// Copies `index` into a shorter multi-index, skipping the positions `first` and `second`.
///
/// Positions which are not present in `index` are ignored, so this also removes a single axis
/// when `first == second`.
pub fn remove_axes<I: MultiIndex>(index: &[usize], first: usize, second: usize) -> I {
    let mut result = I::default();
    let kept = index
        .iter()
        .enumerate()
        .filter(|&(axis, _)| axis != first && axis != second)
        .map(|(_, &offset)| offset);

    for (slot, offset) in result.as_mut().iter_mut().zip(kept) {
        *slot = offset;
    }

    result
}
