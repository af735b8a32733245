use super::*;
use std::iter::FusedIterator;

/// An odometer over the multi-indices of a shape.
///
/// The cursor holds a multi-index plus a wrap counter which acts as one more digit to the left
/// of the leading axis: advancing past the last valid index wraps all axes back to zero and
/// increments the counter, retreating before the first one decrements it. Cursors compare
/// lexicographically over `(lap, index)`, so the one-past-the-end cursor is greater than every
/// valid one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor<S: Shape> {
    lap: isize,
    index: S::Index,
}

impl<S: Shape> Cursor<S> {
    /// Returns a cursor at the all-zero multi-index.
    pub fn start() -> Self {
        Self { lap: 0, index: S::Index::default() }
    }

    /// Returns a cursor at the lexicographically last multi-index.
    pub fn last() -> Self {
        let mut index = S::dims();
        index.as_mut().iter_mut().for_each(|offset| *offset = offset.saturating_sub(1));

        Self { lap: 0, index }
    }

    /// Returns the cursor one step past the last multi-index.
    pub fn end() -> Self {
        let mut end = Self::last();
        end.advance();
        end
    }

    pub fn index(&self) -> &S::Index {
        &self.index
    }

    /// Increments the last axis, carrying into more significant axes.
    pub fn advance(&mut self) {
        let dims = S::dims();
        let carried = self.index.as_mut().iter_mut().zip(dims.as_ref()).rev().all(|(offset, &size)| {
            *offset += 1;
            if *offset < size {
                return false;
            }
            *offset = 0;
            true
        });

        if carried {
            self.lap += 1;
        }
    }

    /// Decrements the last axis, borrowing from more significant axes.
    pub fn retreat(&mut self) {
        let dims = S::dims();
        let borrowed = self.index.as_mut().iter_mut().zip(dims.as_ref()).rev().all(|(offset, &size)| {
            if *offset > 0 {
                *offset -= 1;
                return false;
            }
            *offset = size.saturating_sub(1);
            true
        });

        if borrowed {
            self.lap -= 1;
        }
    }

    // Number of steps from the start cursor
    fn position(&self) -> isize {
        self.lap * S::LEN as isize + S::offset(&self.index) as isize
    }
}

/// An iterator over all multi-indices of a shape in row-major order, the last axis fastest.
#[derive(Clone, Debug)]
pub struct Indices<S: Shape> {
    front: Cursor<S>,
    back: Cursor<S>,
}

impl<S: Shape> Indices<S> {
    pub fn new() -> Self {
        let back = Cursor::end();
        let front = if S::LEN == 0 { back } else { Cursor::start() };

        Self { front, back }
    }
}

impl<S: Shape> Default for Indices<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Shape> Iterator for Indices<S> {
    type Item = S::Index;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        let index = self.front.index;
        self.front.advance();
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.back.position() - self.front.position()).max(0) as usize;
        (remaining, Some(remaining))
    }
}

impl<S: Shape> DoubleEndedIterator for Indices<S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        self.back.retreat();
        Some(self.back.index)
    }
}

impl<S: Shape> ExactSizeIterator for Indices<S> {}

impl<S: Shape> FusedIterator for Indices<S> {}

/// An iterator over pairs of multi-index and element of a tensor in row-major order.
pub struct TensorIter<'a, T, S: Shape> {
    tensor: &'a Tensor<T, S>,
    indices: Indices<S>,
}

impl<'a, T, S: Shape> Iterator for TensorIter<'a, T, S> {
    type Item = (S::Index, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.indices.next()?;
        Some((index, self.tensor.at(index)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<T, S: Shape> DoubleEndedIterator for TensorIter<'_, T, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let index = self.indices.next_back()?;
        Some((index, self.tensor.at(index)))
    }
}

impl<T, S: Shape> ExactSizeIterator for TensorIter<'_, T, S> {}

impl<T, S: Shape> FusedIterator for TensorIter<'_, T, S> {}

impl<'a, T, S: Shape> IntoIterator for &'a Tensor<T, S> {
    type Item = (S::Index, &'a T);
    type IntoIter = TensorIter<'a, T, S>;

    fn into_iter(self) -> Self::IntoIter {
        TensorIter {
            tensor: self,
            indices: Indices::new(),
        }
    }
}

impl<T, S: Shape> Tensor<T, S> {
    /// Returns an iterator over all multi-indices of the tensor in row-major order.
    pub fn indices(&self) -> Indices<S> {
        Indices::new()
    }

    /// Returns an iterator over pairs of multi-index and element in row-major order.
    pub fn iter(&self) -> TensorIter<'_, T, S> {
        self.into_iter()
    }

    /// Returns an iterator over the elements of the tensor.
    /// This iterator traverses the tensor's elements in a row-major order.
    pub fn elements(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.iter().map(|(_, value)| value)
    }

    /// Applies `f` to every element, producing a tensor of the same shape.
    pub fn map<U, F>(&self, mut f: F) -> Tensor<U, S>
    where
        F: FnMut(&T) -> U,
    {
        Tensor::from_fn(|index| f(self.at(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_indices<S: Shape>() -> Vec<Vec<usize>> {
        Indices::<S>::new().map(|index| index.as_ref().to_vec()).collect()
    }

    #[test]
    fn test_indices_row_major() {
        assert_eq!(
            collect_indices::<shape![2, 3]>(),
            vec![vec![0, 0], vec![0, 1], vec![0, 2], vec![1, 0], vec![1, 1], vec![1, 2]]
        );
        assert_eq!(collect_indices::<shape![3]>(), vec![vec![0], vec![1], vec![2]]);
        assert_eq!(collect_indices::<Scalar>(), vec![Vec::<usize>::new()]);
        assert!(collect_indices::<shape![2, 0, 3]>().is_empty());
    }

    #[test]
    fn test_indices_reverse() {
        let forward = Indices::<shape![2, 2, 3]>::new().collect::<Vec<_>>();
        let mut backward = Indices::<shape![2, 2, 3]>::new().rev().collect::<Vec<_>>();
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_indices_meet_in_the_middle() {
        let mut indices = Indices::<shape![2, 2]>::new();
        assert_eq!(indices.len(), 4);
        assert_eq!(indices.next(), Some([0, 0]));
        assert_eq!(indices.next_back(), Some([1, 1]));
        assert_eq!(indices.len(), 2);
        assert_eq!(indices.next_back(), Some([1, 0]));
        assert_eq!(indices.next(), Some([0, 1]));
        assert_eq!(indices.next(), None);
        assert_eq!(indices.next_back(), None);
        assert_eq!(indices.len(), 0);
    }

    #[test]
    fn test_end_cursor() {
        let end = Cursor::<shape![3, 3]>::end();
        let mut last = Cursor::<shape![3, 3]>::last();
        assert_eq!(*last.index(), [2, 2]);
        assert!(last < end);

        last.advance();
        assert_eq!(last, end);
        assert_eq!(*end.index(), [0, 0]);
        assert!(Cursor::<shape![3, 3]>::start() < end);
    }

    #[test]
    fn test_cursor_carry_and_borrow() {
        let mut cursor = Cursor::<shape![2, 3, 2]>::start();
        cursor.advance();
        cursor.advance();
        assert_eq!(*cursor.index(), [0, 1, 0]);

        for _ in 0..4 {
            cursor.advance();
        }
        assert_eq!(*cursor.index(), [1, 0, 0]);

        cursor.retreat();
        assert_eq!(*cursor.index(), [0, 2, 1]);
    }

    #[test]
    fn test_scalar_cursor() {
        let mut cursor = Cursor::<Scalar>::start();
        cursor.advance();
        assert_eq!(cursor, Cursor::end());
        cursor.retreat();
        assert_eq!(cursor, Cursor::start());
    }

    #[test]
    fn test_tensor_iterators() {
        let tensor = Tensor::<i32, shape![2, 2]>::new([[1, 2], [3, 4]]);

        assert_eq!(tensor.elements().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(tensor.elements().rev().copied().collect::<Vec<_>>(), vec![4, 3, 2, 1]);
        assert_eq!(
            tensor.iter().map(|(index, &value)| (index, value)).collect::<Vec<_>>(),
            vec![([0, 0], 1), ([0, 1], 2), ([1, 0], 3), ([1, 1], 4)]
        );

        let total: i32 = (&tensor).into_iter().map(|(_, value)| value).sum();
        assert_eq!(total, 10);

        let doubled = tensor.map(|value| value * 2);
        assert_eq!(doubled, Tensor::new([[2, 4], [6, 8]]));
    }
}
