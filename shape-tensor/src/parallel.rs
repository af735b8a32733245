//! Execution settings for the parallel variants of tensor operations.

use super::*;
use std::thread;

/// Configures how `*_par` operations distribute work between threads.
///
/// By default work runs on rayon's global pool and small tensors are processed on the calling
/// thread, where the cost of spawning tasks outweighs the gain.
#[derive(Clone, Debug)]
pub struct ParallelConfig {
    num_threads: Option<usize>,
    chunk_size: Option<usize>,
    min_parallel_size: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_threads: None,
            chunk_size: None,
            min_parallel_size: 4096,
        }
    }
}

impl ParallelConfig {
    /// Sets the number of threads to use for the parallel computation.
    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads.max(1));
        self
    }

    /// Sets the chunk size for distributing work to threads.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size.max(1));
        self
    }

    /// Sets the number of elements below which work stays on the calling thread.
    pub fn with_min_parallel_size(mut self, min_parallel_size: usize) -> Self {
        self.min_parallel_size = min_parallel_size;
        self
    }

    pub(crate) fn get_num_threads(&self) -> usize {
        self.num_threads
            .unwrap_or_else(|| thread::available_parallelism().map_or(4, |n| n.get()))
    }

    /// Smallest number of items handed to a single task.
    pub(crate) fn get_chunk_size(&self, total_items: usize) -> usize {
        let num_threads = self.get_num_threads();
        self.chunk_size
            .unwrap_or_else(|| total_items.div_ceil(num_threads).max(1))
    }

    pub(crate) fn is_parallel(&self, total_items: usize) -> bool {
        total_items > 0 && total_items >= self.min_parallel_size
    }

    /// Runs `op` on a pool sized by the configuration.
    pub(crate) fn install<R, OP>(&self, op: OP) -> Result<R>
    where
        R: Send,
        OP: FnOnce() -> R + Send,
    {
        match self.num_threads {
            Some(num_threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(num_threads)
                    .build()
                    .map_err(|err| TensorError::ThreadPool(err.to_string()))?;
                Ok(pool.install(op))
            }
            None => Ok(op()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_size() {
        let config = ParallelConfig::default().with_threads(4);
        assert_eq!(config.get_num_threads(), 4);
        assert_eq!(config.get_chunk_size(10), 3);
        assert_eq!(config.get_chunk_size(0), 1);

        let config = config.with_chunk_size(0);
        assert_eq!(config.get_chunk_size(10), 1);
    }

    #[test]
    fn test_threshold() {
        let config = ParallelConfig::default().with_min_parallel_size(10);
        assert!(!config.is_parallel(0));
        assert!(!config.is_parallel(9));
        assert!(config.is_parallel(10));
    }

    #[test]
    fn test_install() -> Result<()> {
        let config = ParallelConfig::default().with_threads(2);
        let threads = config.install(rayon::current_num_threads)?;
        assert_eq!(threads, 2);

        Ok(())
    }
}
