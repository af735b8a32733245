use super::*;
use rayon::prelude::*;
use std::ops::AddAssign;

impl<T, S: Shape> Tensor<T, S>
where
    T: Clone + Default + AddAssign,
{
    /// Contracts the axes at positions `M` and `N`, a generalized trace.
    ///
    /// Sums `self[i]` over every multi-index `i` with `i[M] == i[N]` into the result element
    /// addressed by `i` without those two positions. The result has both axes removed and the
    /// remaining axes in their original order.
    ///
    /// The axes must be distinct, exist in the shape and have equal sizes. Anything else is
    /// rejected when compiling:
    ///
    /// ```compile_fail
    /// use shape_tensor::{shape, Tensor};
    ///
    /// let t: Tensor<i32, shape![2, 3]> = Tensor::default();
    /// let _ = t.contract::<0, 1>();
    /// ```
    ///
    /// ```compile_fail
    /// use shape_tensor::{shape, Tensor};
    ///
    /// let t: Tensor<i32, shape![2, 2, 2]> = Tensor::default();
    /// let _ = t.contract::<1, 1>();
    /// ```
    ///
    /// ```compile_fail
    /// use shape_tensor::{shape, Tensor};
    ///
    /// let t: Tensor<i32, shape![3, 3]> = Tensor::default();
    /// let scalar = t.contract::<0, 1>();
    /// let _ = scalar.contract::<0, 1>();
    /// ```
    ///
    /// ```compile_fail
    /// use shape_tensor::{shape, Tensor};
    ///
    /// let t: Tensor<i32, shape![2, 3, 2]> = Tensor::default();
    /// let vector = t.contract::<0, 2>();
    /// let _ = vector.contract::<0, 1>();
    /// ```
    pub fn contract<const M: usize, const N: usize>(&self) -> Tensor<T, <S as Contract<M, N>>::Output>
    where
        S: Contract<M, N>,
    {
        const { assert!(<S as Contract<M, N>>::MATCHING, "contracted axes must have equal sizes") };

        tracing::trace!(shape = ?S::dims(), first = M, second = N, "contraction");

        let mut result = Tensor::<T, <S as Contract<M, N>>::Output>::default();

        for index in self.indices() {
            let offsets = index.as_ref();
            if offsets[M] == offsets[N] {
                *result.at_mut(<S as Contract<M, N>>::project(&index)) += self.at(index).clone();
            }
        }

        result
    }

    /// Contracts the axes at positions `M` and `N` on multiple threads.
    ///
    /// Each task sums into its own partial result which are then added together, so no update is
    /// lost. Falls back to [`Tensor::contract`] when the tensor is smaller than the configured
    /// threshold.
    pub fn contract_par<const M: usize, const N: usize>(
        &self,
        config: &ParallelConfig,
    ) -> Result<Tensor<T, <S as Contract<M, N>>::Output>>
    where
        S: Contract<M, N>,
        T: Send + Sync,
    {
        const { assert!(<S as Contract<M, N>>::MATCHING, "contracted axes must have equal sizes") };

        if !config.is_parallel(S::LEN) {
            return Ok(self.contract::<M, N>());
        }

        let chunk_size = config.get_chunk_size(S::LEN);
        tracing::debug!(shape = ?S::dims(), first = M, second = N, chunk_size, "parallel contraction");

        let source = self.elements().collect::<Vec<_>>();
        let result_len = <<S as Contract<M, N>>::Output as Shape>::LEN;

        let data = config.install(|| {
            source
                .par_iter()
                .with_min_len(chunk_size)
                .enumerate()
                .filter_map(|(offset, &value)| {
                    let index = S::unravel(offset);
                    let offsets = index.as_ref();
                    (offsets[M] == offsets[N]).then(|| {
                        let target = <S as Contract<M, N>>::project(&index);
                        (<<S as Contract<M, N>>::Output as Shape>::offset(&target), value)
                    })
                })
                .fold(
                    || vec![T::default(); result_len],
                    |mut partial, (target, value)| {
                        partial[target] += value.clone();
                        partial
                    },
                )
                .reduce(
                    || vec![T::default(); result_len],
                    |mut lhs, rhs| {
                        lhs.iter_mut().zip(rhs).for_each(|(acc, value)| *acc += value);
                        lhs
                    },
                )
        })?;

        Tensor::from_row_major(data)
    }
}

impl<T, const D: usize> Tensor<T, shape![D, D]>
where
    T: Clone + Default + AddAssign,
{
    /// Returns the sum of the diagonal of a square matrix.
    pub fn trace(&self) -> T {
        self.contract::<0, 1>().into_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_trace() {
        let matrix = Tensor::<i32, shape![3, 3]>::new([[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
        let expected = (0..3).map(|i| matrix[[i, i]]).sum::<i32>();

        assert_eq!(matrix.contract::<0, 1>().into_value(), expected);
        assert_eq!(matrix.contract::<1, 0>().into_value(), 15);
        assert_eq!(matrix.trace(), 15);
    }

    #[test]
    fn test_contract_outer_product() {
        let v = Tensor::<i32, shape![3]>::new([1, 2, 3]);
        let m = tensor_mul(&v, &v);

        assert_eq!(m.contract::<0, 1>().into_value(), 14);
    }

    #[test]
    fn test_contract_rank_three() {
        let t = Tensor::<i32, shape![2, 3, 2]>::from_fn(|[i, j, k]| (i * 6 + j * 2 + k) as i32);

        let r = t.contract::<0, 2>();
        assert_eq!(r.shape(), [3]);
        // r[j] = t[0, j, 0] + t[1, j, 1]
        assert_eq!(r, Tensor::new([7, 11, 15]));
        assert_eq!(t.contract::<2, 0>(), r);
    }

    #[test]
    fn test_contract_keeps_axis_order() {
        let t = Tensor::<i32, shape![2, 3, 2, 4]>::from_fn(|[i, j, k, l]| (i * 1000 + j * 100 + k * 10 + l) as i32);

        let r = t.contract::<0, 2>();
        assert_eq!(r.shape(), [3, 4]);
        for [j, l] in r.indices() {
            let expected = t[[0, j, 0, l]] + t[[1, j, 1, l]];
            assert_eq!(r[[j, l]], expected);
        }
    }

    #[test]
    fn test_contract_outer_product_rank_three() {
        let v = Tensor::<f64, shape![3]>::new([1., 2., 3.]);
        let r1 = tensor_mul(&v, &v);
        let r2 = tensor_mul(&v, &r1);

        // sum_i v[i] * v[i] * v[k]
        let r5 = r2.contract::<0, 2>();
        assert_eq!(r5, Tensor::new([14., 28., 42.]));
    }

    #[test]
    fn test_contract_par() -> Result<()> {
        let t = Tensor::<i64, shape![6, 5, 6, 4]>::from_fn(|[i, j, k, l]| (i * 7 + j * 5 + k * 3 + l) as i64 - 40);
        let config = ParallelConfig::default().with_threads(3).with_chunk_size(16).with_min_parallel_size(0);

        let sync_result = t.contract::<0, 2>();
        let par_result = t.contract_par::<0, 2>(&config)?;
        assert_eq!(sync_result, par_result, "Parallel and sync contraction results differ");

        let matrix = Tensor::<i64, shape![4, 4]>::from_fn(|[i, j]| (i * 4 + j) as i64);
        assert_eq!(matrix.contract_par::<1, 0>(&config)?.into_value(), 30);

        Ok(())
    }
}
