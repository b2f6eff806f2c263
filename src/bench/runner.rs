//! Trial loop: fresh buffers, four timed phases, running averages

use rayon::{ThreadPool, ThreadPoolBuilder};
use std::time::Duration;
use tracing::{debug, error, info};

use super::kernels::{
    assign_parallel, assign_serial, DampedPowerSum, FromIndex, IdentitySum, Reduction,
};
use super::timing::{time_phase, Measurements};
use crate::error::{BenchError, Result};
use crate::types::{BufferLayout, Phase, Workload};

/// Runs benchmark trials on a dedicated fork-join pool
pub struct BenchRunner {
    pool: ThreadPool,
    warmup_trials: u32,
}

impl BenchRunner {
    /// Build the worker pool. `None` lets rayon pick the size
    /// (available parallelism, or `RAYON_NUM_THREADS`).
    pub fn new(threads: Option<usize>) -> Result<Self> {
        let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("bench-worker-{}", i));
        if let Some(n) = threads {
            builder = builder.num_threads(n);
        }
        let pool = builder.build()?;

        info!("Worker pool ready with {} threads", pool.current_num_threads());

        Ok(Self {
            pool,
            warmup_trials: 0,
        })
    }

    pub fn with_warmup(mut self, warmup_trials: u32) -> Self {
        self.warmup_trials = warmup_trials;
        self
    }

    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run one of the built-in workloads
    pub fn run_workload(
        &self,
        workload: Workload,
        len: usize,
        trial_count: u32,
    ) -> Result<Measurements> {
        let layout = workload.layout();
        match workload {
            Workload::Integer => {
                self.run::<i32, _>(workload, len, layout, &IdentitySum, trial_count)
            }
            Workload::Long => self.run::<i64, _>(workload, len, layout, &IdentitySum, trial_count),
            Workload::Float => {
                self.run::<f64, _>(workload, len, layout, &DampedPowerSum, trial_count)
            }
        }
    }

    /// Run `trial_count` timed trials and return per-phase averages.
    ///
    /// A checked reduction that disagrees aborts the run immediately with
    /// `BenchError::ReductionMismatch`.
    pub fn run<T, R>(
        &self,
        workload: Workload,
        len: usize,
        layout: BufferLayout,
        reduction: &R,
        trial_count: u32,
    ) -> Result<Measurements>
    where
        T: FromIndex,
        R: Reduction<T>,
    {
        if trial_count == 0 {
            return Err(BenchError::InvalidTrialCount);
        }

        info!(
            workload = workload.name(),
            len,
            trials = trial_count,
            warmup = self.warmup_trials,
            "Starting workload"
        );

        for trial in 0..self.warmup_trials {
            self.trial::<T, R>(workload, trial, len, layout, reduction)?;
        }

        let mut measurements = Measurements::new();
        for trial in 0..trial_count {
            let elapsed = self.trial::<T, R>(workload, trial, len, layout, reduction)?;
            measurements.record_trial(&elapsed, trial_count);

            for phase in Phase::ALL {
                metrics::histogram!(
                    "par_bench_phase_seconds",
                    "workload" => workload.name(),
                    "phase" => phase.as_str()
                )
                .record(elapsed[phase.index()].as_secs_f64());
            }
            metrics::counter!("par_bench_trials_total", "workload" => workload.name()).increment(1);
        }

        info!(
            workload = workload.name(),
            serial_assign = measurements.average(Phase::SerialAssign),
            parallel_assign = measurements.average(Phase::ParallelAssign),
            serial_reduce = measurements.average(Phase::SerialReduce),
            parallel_reduce = measurements.average(Phase::ParallelReduce),
            "Workload finished"
        );

        Ok(measurements)
    }

    /// One trial. Allocation and drop of the buffers stay outside every
    /// timed window.
    fn trial<T, R>(
        &self,
        workload: Workload,
        trial: u32,
        len: usize,
        layout: BufferLayout,
        reduction: &R,
    ) -> Result<[Duration; 4]>
    where
        T: FromIndex,
        R: Reduction<T>,
    {
        let mut serial_buf: Vec<T> = vec![T::default(); len];
        let mut parallel_buf: Option<Vec<T>> = match layout {
            BufferLayout::Separate => Some(vec![T::default(); len]),
            BufferLayout::Shared => None,
        };
        let mut elapsed = [Duration::ZERO; 4];

        let ((), d) = time_phase(|| assign_serial(&mut serial_buf));
        elapsed[Phase::SerialAssign.index()] = d;

        {
            let target: &mut [T] = match parallel_buf.as_mut() {
                Some(buf) => buf,
                None => &mut serial_buf,
            };
            let ((), d) = time_phase(|| self.pool.install(|| assign_parallel(target)));
            elapsed[Phase::ParallelAssign.index()] = d;
        }

        let (serial_sum, d) = time_phase(|| reduction.serial(&serial_buf));
        elapsed[Phase::SerialReduce.index()] = d;

        let source: &[T] = parallel_buf.as_deref().unwrap_or(&serial_buf);
        let (parallel_sum, d) = time_phase(|| self.pool.install(|| reduction.parallel(source)));
        elapsed[Phase::ParallelReduce.index()] = d;

        if reduction.is_checked() {
            if serial_sum != parallel_sum {
                error!(
                    workload = workload.name(),
                    trial,
                    serial = %serial_sum,
                    parallel = %parallel_sum,
                    "Parallel reduction diverged from serial reduction"
                );
                return Err(BenchError::ReductionMismatch {
                    workload: workload.name().to_string(),
                    trial,
                    serial: serial_sum.to_string(),
                    parallel: parallel_sum.to_string(),
                });
            }
        } else {
            debug!(trial, serial = %serial_sum, parallel = %parallel_sum, "Unchecked reduction");
        }

        debug!(workload = workload.name(), trial, "Trial complete");

        drop(serial_buf);
        drop(parallel_buf);
        Ok(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    /// Combines partials with `max` instead of `+`, the way a lost update
    /// on a shared accumulator drops contributions.
    struct MaxCombineSum;

    impl Reduction<i32> for MaxCombineSum {
        type Output = i64;

        fn serial(&self, data: &[i32]) -> i64 {
            IdentitySum.serial(data)
        }

        fn parallel(&self, data: &[i32]) -> i64 {
            data.par_iter().map(|&x| x as i64).reduce(|| 0, i64::max)
        }
    }

    fn runner() -> BenchRunner {
        BenchRunner::new(Some(2)).unwrap()
    }

    #[test]
    fn test_all_workloads_non_negative() {
        let runner = runner();
        for workload in Workload::ALL {
            let m = runner.run_workload(workload, 1_000, 3).unwrap();
            for phase in Phase::ALL {
                assert!(m.average(phase) >= 0.0, "{} {:?}", workload, phase);
            }
        }
    }

    #[test]
    fn test_zero_trials_rejected() {
        let err = runner().run_workload(Workload::Long, 10, 0).unwrap_err();
        assert!(matches!(err, BenchError::InvalidTrialCount));
    }

    #[test]
    fn test_single_trial() {
        let m = runner().run_workload(Workload::Integer, 5, 1).unwrap();
        assert!(m.as_array().iter().all(|&avg| avg >= 0.0));
    }

    #[test]
    fn test_broken_combiner_detected() {
        let err = runner()
            .run::<i32, _>(Workload::Integer, 5, BufferLayout::Separate, &MaxCombineSum, 10)
            .unwrap_err();

        match err {
            BenchError::ReductionMismatch {
                trial,
                serial,
                parallel,
                ..
            } => {
                assert_eq!(trial, 0);
                assert_eq!(serial, "10");
                assert_eq!(parallel, "4");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_broken_combiner_detected_during_warmup() {
        let err = runner()
            .with_warmup(1)
            .run::<i32, _>(Workload::Integer, 100, BufferLayout::Shared, &MaxCombineSum, 1)
            .unwrap_err();
        assert!(matches!(err, BenchError::ReductionMismatch { .. }));
    }

    #[test]
    fn test_pool_size() {
        assert_eq!(runner().num_threads(), 2);
    }
}
