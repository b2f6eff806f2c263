//! Par Bench
//!
//! Micro-benchmark comparing serial and fork-join parallel array
//! assignment and summation.
//!
//! ## Architecture
//! - Bench: kernels, phase timing, trial runner, comparison report
//! - Config: JSON file plus `PAR_BENCH_*` environment overrides
//! - Types: workloads and timed phases

pub mod bench;
pub mod config;
pub mod error;
pub mod types;

pub use bench::{run_all_benchmarks, BenchRunner, Measurements, Report};
pub use config::Config;
pub use error::BenchError;
pub use types::{Phase, Workload};
