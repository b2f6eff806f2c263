//! Assignment and reduction loops, serial and fork-join parallel
//!
//! Parallel variants run on whatever rayon pool is current; the runner
//! wraps them in `ThreadPool::install`.

use rayon::prelude::*;
use std::fmt;

/// Element type that can be built from its own index
pub trait FromIndex: Copy + Default + Send + Sync + 'static {
    fn from_index(i: usize) -> Self;
}

impl FromIndex for i32 {
    #[inline(always)]
    fn from_index(i: usize) -> Self {
        i as i32
    }
}

impl FromIndex for i64 {
    #[inline(always)]
    fn from_index(i: usize) -> Self {
        i as i64
    }
}

impl FromIndex for f64 {
    #[inline(always)]
    fn from_index(i: usize) -> Self {
        i as f64
    }
}

/// `buf[i] = i`, in index order
pub fn assign_serial<T: FromIndex>(buf: &mut [T]) {
    for (i, slot) in buf.iter_mut().enumerate() {
        *slot = T::from_index(i);
    }
}

/// `buf[i] = i`, unordered; every worker writes a disjoint index range
pub fn assign_parallel<T: FromIndex>(buf: &mut [T]) {
    buf.par_iter_mut()
        .enumerate()
        .for_each(|(i, slot)| *slot = T::from_index(i));
}

/// A reduction with a serial and a parallel form over the same input
pub trait Reduction<T>: Sync {
    type Output: Copy + PartialEq + fmt::Debug + fmt::Display + Send;

    fn serial(&self, data: &[T]) -> Self::Output;

    /// Must combine per-worker partials with an associative operator,
    /// never through an unsynchronized shared accumulator.
    fn parallel(&self, data: &[T]) -> Self::Output;

    /// Whether serial and parallel results must match exactly
    fn is_checked(&self) -> bool {
        true
    }
}

/// Plain sum, accumulated in `i64`
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentitySum;

impl<T> Reduction<T> for IdentitySum
where
    T: Copy + Into<i64> + Send + Sync,
{
    type Output = i64;

    fn serial(&self, data: &[T]) -> i64 {
        let mut sum = 0i64;
        for &x in data {
            sum += Into::<i64>::into(x);
        }
        sum
    }

    fn parallel(&self, data: &[T]) -> i64 {
        data.par_iter().map(|&x| Into::<i64>::into(x)).sum::<i64>()
    }
}

/// Sum of `(sqrt(x) + x^1.5) / (i*i + 1)` over absolute index `i`.
///
/// Compute-bound rather than memory-bound. Floating-point addition is not
/// associative, so serial and parallel results only agree approximately.
#[derive(Debug, Clone, Copy, Default)]
pub struct DampedPowerSum;

#[inline(always)]
pub fn damped_power(i: usize, x: f64) -> f64 {
    let i = i as f64;
    (x.sqrt() + x.powf(1.5)) / (i * i + 1.0)
}

impl Reduction<f64> for DampedPowerSum {
    type Output = f64;

    fn serial(&self, data: &[f64]) -> f64 {
        let mut sum = 0.0;
        for (i, &x) in data.iter().enumerate() {
            sum += damped_power(i, x);
        }
        sum
    }

    fn parallel(&self, data: &[f64]) -> f64 {
        data.par_iter()
            .enumerate()
            .map(|(i, &x)| damped_power(i, x))
            .sum::<f64>()
    }

    fn is_checked(&self) -> bool {
        false
    }
}

/// Relative agreement within `n * EPSILON`
pub fn within_tolerance(a: f64, b: f64, n: usize) -> bool {
    let scale = a.abs().max(b.abs());
    (a - b).abs() <= n as f64 * f64::EPSILON * scale
}
