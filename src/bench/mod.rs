//! Benchmark module
//! Serial vs fork-join parallel assignment and reduction timings

pub mod kernels;
pub mod report;
pub mod runner;
pub mod timing;

pub use kernels::{DampedPowerSum, FromIndex, IdentitySum, Reduction};
pub use report::{Advantage, Comparison, Report};
pub use runner::BenchRunner;
pub use timing::{time_phase, Measurements};

use crate::config::Config;
use crate::error::Result;

/// Run every configured workload in order.
///
/// Stops at the first error so no report is produced for a failed run.
pub fn run_all_benchmarks(config: &Config, runner: &BenchRunner) -> Result<Vec<Report>> {
    let mut reports = Vec::with_capacity(config.workloads.len());

    for &workload in &config.workloads {
        let len = config.len_for(workload);
        let measurements = runner.run_workload(workload, len, config.runs)?;
        reports.push(Report::new(
            workload,
            len,
            config.runs,
            runner.num_threads(),
            &measurements,
        ));
    }

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Workload;

    #[test]
    fn test_run_all_benchmarks() {
        let config = Config {
            runs: 2,
            warmup_trials: 1,
            workloads: Workload::ALL.to_vec(),
            len: Some(256),
            threads: Some(2),
            ..Config::default()
        };
        let runner = BenchRunner::new(config.threads)
            .unwrap()
            .with_warmup(config.warmup_trials);

        let reports = run_all_benchmarks(&config, &runner).unwrap();
        assert_eq!(reports.len(), 3);
        for (report, workload) in reports.iter().zip(Workload::ALL) {
            assert_eq!(report.workload, workload);
            assert_eq!(report.len, 256);
            assert_eq!(report.runs, 2);
            assert_eq!(report.threads, 2);
        }
    }
}
