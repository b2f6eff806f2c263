//! Core types for the benchmark

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BenchError;

/// Benchmark variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Workload {
    /// `i32` elements, two buffers, checked identity sum
    Integer,
    /// `i64` elements, one buffer, checked identity sum
    Long,
    /// `f64` elements, one buffer, compute-bound transform sum (unchecked)
    Float,
}

impl Workload {
    pub const ALL: [Workload; 3] = [Workload::Integer, Workload::Long, Workload::Float];

    pub fn name(self) -> &'static str {
        match self {
            Workload::Integer => "integer",
            Workload::Long => "long",
            Workload::Float => "float",
        }
    }

    /// Default element count per buffer
    pub fn default_len(self) -> usize {
        match self {
            Workload::Integer => 10_000_000,
            Workload::Long => 2_000_000,
            Workload::Float => 1_000_000,
        }
    }

    pub fn layout(self) -> BufferLayout {
        match self {
            Workload::Integer => BufferLayout::Separate,
            Workload::Long | Workload::Float => BufferLayout::Shared,
        }
    }
}

impl fmt::Display for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Workload {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "integer" | "int" => Ok(Workload::Integer),
            "long" => Ok(Workload::Long),
            "float" | "double" => Ok(Workload::Float),
            other => Err(BenchError::Config(format!("unknown workload '{}'", other))),
        }
    }
}

/// How scratch buffers are shared between the serial and parallel phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferLayout {
    /// Serial and parallel phases work on the same buffer
    Shared,
    /// Serial phases use one buffer, parallel phases another
    Separate,
}

/// Timed phase of a trial, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    SerialAssign = 0,
    ParallelAssign = 1,
    SerialReduce = 2,
    ParallelReduce = 3,
}

impl Phase {
    pub const ALL: [Phase; 4] = [
        Phase::SerialAssign,
        Phase::ParallelAssign,
        Phase::SerialReduce,
        Phase::ParallelReduce,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::SerialAssign => "serial_assign",
            Phase::ParallelAssign => "parallel_assign",
            Phase::SerialReduce => "serial_reduce",
            Phase::ParallelReduce => "parallel_reduce",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workload_parse() {
        assert_eq!("integer".parse::<Workload>().unwrap(), Workload::Integer);
        assert_eq!(" Float ".parse::<Workload>().unwrap(), Workload::Float);
        assert!("quad".parse::<Workload>().is_err());
    }

    #[test]
    fn test_workload_defaults() {
        assert_eq!(Workload::Integer.default_len(), 10_000_000);
        assert_eq!(Workload::Integer.layout(), BufferLayout::Separate);
        assert_eq!(Workload::Float.layout(), BufferLayout::Shared);
    }

    #[test]
    fn test_phase_order() {
        for (i, phase) in Phase::ALL.iter().enumerate() {
            assert_eq!(phase.index(), i);
        }
    }
}
