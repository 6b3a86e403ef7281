use rayon::prelude::*;
use thiserror::Error;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The chunk length for Chunked must be valid.
    #[error("chunk length must be > 0 for Chunked strategy")]
    InvalidChunkLen(usize),
}

/// Controls how the entries of a filter bank are computed.
///
/// Every strategy yields the same kernels in the same order; only the
/// scheduling differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool, one task per bank entry.
    #[default]
    ParallelElements,

    /// Use the global Rayon thread pool, with at least `n` entries per task.
    ///
    /// Useful when the kernels are small and per-task overhead dominates.
    Chunked(usize),

    /// Run sequentially on the current thread.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

/// Trait to map a list of jobs to results with a given strategy, keeping their order.
pub trait ExecuteExt<I> {
    /// Apply a fallible operation to every job and collect the results in job order.
    ///
    /// The first error aborts the whole computation; no partial output is returned.
    ///
    /// # Arguments
    ///
    /// * `strategy` - The execution strategy.
    /// * `op` - The operation to run on each job.
    fn try_map_with<R, E, F>(self, strategy: ExecutionStrategy, op: F) -> Result<Vec<R>, E>
    where
        R: Send,
        E: Send + From<ParallelError>,
        F: Fn(I) -> Result<R, E> + Sync + Send;
}

impl<I: Send> ExecuteExt<I> for Vec<I> {
    fn try_map_with<R, E, F>(self, strategy: ExecutionStrategy, op: F) -> Result<Vec<R>, E>
    where
        R: Send,
        E: Send + From<ParallelError>,
        F: Fn(I) -> Result<R, E> + Sync + Send,
    {
        match strategy {
            ExecutionStrategy::Serial => self.into_iter().map(op).collect(),
            ExecutionStrategy::ParallelElements => self.into_par_iter().map(op).collect(),
            ExecutionStrategy::Chunked(min_len) => {
                if min_len == 0 {
                    return Err(ParallelError::InvalidChunkLen(min_len).into());
                }
                self.into_par_iter()
                    .with_min_len(min_len)
                    .map(op)
                    .collect()
            }
            ExecutionStrategy::Fixed(n) => {
                if n == 0 {
                    return Err(ParallelError::InvalidThreadCount(n).into());
                }
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| ParallelError::BuildError(e.to_string()))?;

                pool.install(|| self.into_par_iter().map(op).collect())
            }
        }
    }
}
