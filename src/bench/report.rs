//! Serial vs parallel comparison report

use serde::Serialize;
use std::fmt;

use super::timing::Measurements;
use crate::types::{Phase, Workload};

/// Average serial and parallel times for one operation pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    pub serial: f64,
    pub parallel: f64,
    pub advantage: Option<Advantage>,
}

/// How much faster the parallel variant was
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Advantage {
    /// Seconds saved
    pub absolute: f64,
    /// Percent of the serial time saved
    pub relative_percent: f64,
}

impl Comparison {
    pub fn new(serial: f64, parallel: f64) -> Self {
        // Only a strictly faster parallel run counts
        let advantage = if parallel < serial {
            Some(Advantage {
                absolute: serial - parallel,
                relative_percent: 100.0 * (parallel - serial).abs() / serial,
            })
        } else {
            None
        };

        Self {
            serial,
            parallel,
            advantage,
        }
    }

    pub fn advantage(&self) -> Option<Advantage> {
        self.advantage
    }

    fn write_section(&self, f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
        writeln!(f, "Average {} times: ", title)?;
        writeln!(f, "\t Without OMP: {:.9} s", self.serial)?;
        writeln!(f, "\t With OMP: {:.9} s", self.parallel)?;
        if let Some(adv) = self.advantage {
            writeln!(f, "\t Absolute difference: {:.9} s in favor of OMP", adv.absolute)?;
            writeln!(f, "\t Relative difference: OMP is {:.2} % faster", adv.relative_percent)?;
        }
        Ok(())
    }
}

/// Final report for one workload
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub workload: Workload,
    pub len: usize,
    pub runs: u32,
    pub threads: usize,
    pub assignment: Comparison,
    pub summation: Comparison,
}

impl Report {
    pub fn new(
        workload: Workload,
        len: usize,
        runs: u32,
        threads: usize,
        measurements: &Measurements,
    ) -> Self {
        Self {
            workload,
            len,
            runs,
            threads,
            assignment: Comparison::new(
                measurements.average(Phase::SerialAssign),
                measurements.average(Phase::ParallelAssign),
            ),
            summation: Comparison::new(
                measurements.average(Phase::SerialReduce),
                measurements.average(Phase::ParallelReduce),
            ),
        }
    }

    pub fn header(&self) -> String {
        format!("== {} (N = {}) ==", self.workload, self.len)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // "assignement" is part of the established output format
        self.assignment.write_section(f, "assignement")?;
        self.summation.write_section(f, "summation")
    }
}
