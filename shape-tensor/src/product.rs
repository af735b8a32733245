use super::*;
use rayon::prelude::*;
use std::ops::Mul;

/// Computes the outer (tensor) product of two tensors.
///
/// The result has the axes of `lhs` followed by the axes of `rhs`, and its element at `i ++ j`
/// is `lhs[i] * rhs[j]`.
pub fn tensor_mul<T, U, S, R>(
    lhs: &Tensor<T, S>,
    rhs: &Tensor<U, R>,
) -> Tensor<<T as Mul<U>>::Output, <S as Concat<R>>::Output>
where
    S: Concat<R>,
    R: Shape,
    T: Clone + Mul<U>,
    U: Clone,
{
    lhs.outer(rhs)
}

impl<T, S: Shape> Tensor<T, S> {
    /// Computes the outer product with another tensor on a single thread.
    pub fn outer<U, R>(&self, other: &Tensor<U, R>) -> Tensor<<T as Mul<U>>::Output, <S as Concat<R>>::Output>
    where
        S: Concat<R>,
        R: Shape,
        T: Clone + Mul<U>,
        U: Clone,
    {
        tracing::trace!(lhs = ?S::dims(), rhs = ?R::dims(), "outer product");

        Tensor::from_fn(|index| {
            let (i, j) = <S as Concat<R>>::split(&index);
            self.at(i).clone() * other.at(j).clone()
        })
    }

    /// Computes the outer product with another tensor on multiple threads.
    ///
    /// Every element of the result is computed independently, threads never write to the same
    /// element. Falls back to [`Tensor::outer`] when the result is smaller than the configured
    /// threshold.
    pub fn outer_par<U, R>(
        &self,
        other: &Tensor<U, R>,
        config: &ParallelConfig,
    ) -> Result<Tensor<<T as Mul<U>>::Output, <S as Concat<R>>::Output>>
    where
        S: Concat<R>,
        R: Shape,
        T: Clone + Send + Sync + Mul<U>,
        U: Clone + Send + Sync,
        <T as Mul<U>>::Output: Default + Send,
    {
        let total_items = S::LEN * R::LEN;
        if !config.is_parallel(total_items) {
            return Ok(self.outer(other));
        }

        let chunk_size = config.get_chunk_size(total_items);
        tracing::debug!(lhs = ?S::dims(), rhs = ?R::dims(), total_items, chunk_size, "parallel outer product");

        let lhs = self.elements().collect::<Vec<_>>();
        let rhs = other.elements().collect::<Vec<_>>();

        // offsets of the result split as lhs_offset * |rhs| + rhs_offset
        let data = config.install(|| {
            (0..total_items)
                .into_par_iter()
                .with_min_len(chunk_size)
                .map(|offset| lhs[offset / R::LEN].clone() * rhs[offset % R::LEN].clone())
                .collect::<Vec<_>>()
        })?;

        Tensor::from_row_major(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_outer_product() {
        let a = Tensor::<i32, shape![3]>::new([1, 2, 3]);
        let b = Tensor::<i32, shape![3]>::new([1, 2, 3]);

        let c = tensor_mul(&a, &b);

        assert_eq!(c.shape(), [3, 3]);
        assert_eq!(c, Tensor::new([[1, 2, 3], [2, 4, 6], [3, 6, 9]]));
    }

    #[test]
    fn test_outer_product_shapes() {
        let a = Tensor::<i32, shape![2, 3]>::from_fn(|[i, j]| (i * 3 + j) as i32);
        let b = Tensor::<i32, shape![4]>::new([1, -1, 2, 0]);

        let c = a.outer(&b);
        assert_eq!(c.shape(), [2, 3, 4]);
        assert_eq!(b.outer(&a).shape(), [4, 2, 3]);

        for (i, &x) in a.iter() {
            for (j, &y) in b.iter() {
                assert_eq!(c[<shape![2, 3] as Concat<shape![4]>>::join(&i, &j)], x * y);
            }
        }
    }

    #[test]
    fn test_outer_product_with_scalar() {
        let s = Tensor::from(2.5);
        let v = Tensor::<f64, shape![2]>::new([2., 4.]);

        assert_eq!(tensor_mul(&s, &v), Tensor::new([5., 10.]));
        assert_eq!(tensor_mul(&v, &s), Tensor::new([5., 10.]));
        assert_eq!(tensor_mul(&s, &s).into_value(), 6.25);
    }

    #[test]
    fn test_outer_product_mixed_types() {
        #[derive(Clone, Debug, PartialEq)]
        struct Meters(f64);

        impl Mul<i32> for Meters {
            type Output = Meters;

            fn mul(self, rhs: i32) -> Meters {
                Meters(self.0 * rhs as f64)
            }
        }

        let a = Tensor::<Meters, shape![2]>::new([Meters(1.5), Meters(2.)]);
        let b = Tensor::<i32, shape![2]>::new([2, 3]);

        let c = a.outer(&b);
        assert_eq!(c[[1, 1]], Meters(6.));
        assert_eq!(c[[0, 0]], Meters(3.));
    }

    #[test]
    fn test_outer_product_par() -> Result<()> {
        let a = Tensor::<i64, shape![8, 6]>::from_fn(|[i, j]| (i * 6 + j) as i64);
        let b = Tensor::<i64, shape![5, 7]>::from_fn(|[i, j]| i as i64 - j as i64);
        let config = ParallelConfig::default().with_threads(4).with_min_parallel_size(0);

        let sync_result = a.outer(&b);
        let par_result = a.outer_par(&b, &config)?;

        assert_eq!(par_result.shape(), [8, 6, 5, 7]);
        assert_eq!(sync_result, par_result, "Parallel and sync outer product results differ");

        Ok(())
    }

    #[test]
    fn test_outer_product_par_below_threshold() -> Result<()> {
        let a = Tensor::<i32, shape![3]>::new([1, 2, 3]);
        let result = a.outer_par(&a, &ParallelConfig::default())?;
        assert_eq!(result, a.outer(&a));

        Ok(())
    }
}
