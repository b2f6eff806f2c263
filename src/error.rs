//! Error types

use thiserror::Error;

/// Errors raised while configuring or running a benchmark
#[derive(Debug, Error)]
pub enum BenchError {
    /// Parallel and serial reductions disagreed on identical input.
    /// Signals a broken combiner or runtime defect; never recovered from.
    #[error(
        "reduction mismatch in workload '{workload}' at trial {trial}: serial = {serial}, parallel = {parallel}"
    )]
    ReductionMismatch {
        workload: String,
        trial: u32,
        serial: String,
        parallel: String,
    },

    #[error("trial count must be at least 1")]
    InvalidTrialCount,

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, BenchError>;
