//! Simulation statistics collection and reporting.
//!
//! This module tracks the cumulative outcome counts of a run. It provides:
//! 1. **Counters:** Hits, misses and evictions, owned by one simulator instance.
//! 2. **Derived metrics:** Total accesses and hit rate.
//! 3. **Reporting:** The cachelab summary line and `.csim_results` file format.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::sim::AccessOutcome;

/// Simulation statistics structure.
///
/// Counters only ever increase during a run and start at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Accesses that found their block resident.
    pub hits: u64,
    /// Accesses that did not.
    pub misses: u64,
    /// Misses that had to replace a valid line.
    pub evictions: u64,
}

impl SimStats {
    /// Accounts for one access outcome.
    #[inline]
    pub const fn record(&mut self, outcome: AccessOutcome) {
        match outcome {
            AccessOutcome::Hit => self.hits += 1,
            AccessOutcome::Miss => self.misses += 1,
            AccessOutcome::MissEviction => {
                self.misses += 1;
                self.evictions += 1;
            }
        }
    }

    /// Total accesses simulated (`hits + misses`).
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit, or 0.0 before any access.
    pub fn hit_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            return 0.0;
        }
        self.hits as f64 / total as f64
    }

    /// Returns `hits:H misses:M evictions:E`.
    pub fn summary_line(&self) -> String {
        format!(
            "hits:{} misses:{} evictions:{}",
            self.hits, self.misses, self.evictions
        )
    }

    /// Writes the summary line and a newline to `out` (stdout for the CLI).
    ///
    /// # Errors
    ///
    /// Propagates any write failure from `out`.
    pub fn write_summary(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}", self.summary_line())
    }

    /// Writes `H M E` followed by a newline to `path`.
    ///
    /// This is the format the cachelab driver reads back from `.csim_results`.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from creating or writing the file.
    pub fn write_results(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(
            path,
            format!("{} {} {}\n", self.hits, self.misses, self.evictions),
        )
    }
}
