//! Phase timing and running-mean accumulation

use serde::Serialize;
use std::hint::black_box;
use std::time::{Duration, Instant};

use crate::types::Phase;

/// Average elapsed seconds per phase.
///
/// Each trial adds `elapsed / trial_count`, so after the last trial every
/// slot holds the arithmetic mean without keeping per-trial samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Measurements {
    averages: [f64; 4],
}

impl Measurements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, phase: Phase, elapsed: Duration, trial_count: u32) {
        self.averages[phase.index()] += elapsed.as_secs_f64() / trial_count as f64;
    }

    pub fn record_trial(&mut self, elapsed: &[Duration; 4], trial_count: u32) {
        for phase in Phase::ALL {
            self.record(phase, elapsed[phase.index()], trial_count);
        }
    }

    #[inline]
    pub fn average(&self, phase: Phase) -> f64 {
        self.averages[phase.index()]
    }

    pub fn as_array(&self) -> [f64; 4] {
        self.averages
    }
}

/// Time a single phase. Only `f` is inside the window.
#[inline]
pub fn time_phase<R, F>(f: F) -> (R, Duration)
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let out = black_box(f());
    let elapsed = start.elapsed();
    (out, elapsed)
}
