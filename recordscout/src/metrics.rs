use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::ExecutionMode;

/// Tracks work done by the executors.
///
/// Clones share the same counters, so a clone can be moved into every unit
/// of a fan-out.
#[derive(Debug, Clone)]
pub struct ProcessingMetrics {
    units_evaluated: Arc<AtomicU64>,
    units_cancelled: Arc<AtomicU64>,
    matches_found: Arc<AtomicU64>,
    fan_outs: Arc<AtomicU64>,
}

impl ProcessingMetrics {
    /// Creates a new ProcessingMetrics instance
    pub fn new() -> Self {
        Self {
            units_evaluated: Arc::new(AtomicU64::new(0)),
            units_cancelled: Arc::new(AtomicU64::new(0)),
            matches_found: Arc::new(AtomicU64::new(0)),
            fan_outs: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Records one unit that ran its predicate
    pub fn record_evaluation(&self, matched: bool) {
        self.units_evaluated.fetch_add(1, Ordering::Relaxed);
        if matched {
            self.matches_found.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Records one unit that skipped its work after cancellation
    pub fn record_cancelled(&self) {
        let total = self.units_cancelled.fetch_add(1, Ordering::Relaxed) + 1;
        debug!("Unit cancelled, total cancelled: {}", total);
    }

    /// Records the launch of one fan-out over `units` records
    pub fn record_fan_out(&self, units: usize) {
        let total = self.fan_outs.fetch_add(1, Ordering::Relaxed) + 1;
        debug!("Fan-out #{} launching {} units", total, units);
    }

    /// Gets current statistics
    pub fn get_stats(&self) -> ProcessingStats {
        ProcessingStats {
            units_evaluated: self.units_evaluated.load(Ordering::Relaxed),
            units_cancelled: self.units_cancelled.load(Ordering::Relaxed),
            matches_found: self.matches_found.load(Ordering::Relaxed),
            fan_outs: self.fan_outs.load(Ordering::Relaxed),
        }
    }

    /// Logs current statistics
    pub fn log_stats(&self) {
        let stats = self.get_stats();
        info!(
            "Processing stats:\n\
             Units evaluated: {}\n\
             Units cancelled: {}\n\
             Matches found: {}\n\
             Fan-outs: {}",
            stats.units_evaluated, stats.units_cancelled, stats.matches_found, stats.fan_outs
        );
    }
}

impl Default for ProcessingMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of the executor counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStats {
    pub units_evaluated: u64,
    pub units_cancelled: u64,
    pub matches_found: u64,
    pub fan_outs: u64,
}

/// Outcome of one full processing pass over the record set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessReport {
    /// Units that ran to completion
    pub completed: usize,
    /// Wall-clock time from launch to the last unit finishing
    pub elapsed: Duration,
    /// Strategy that produced the report
    pub mode: ExecutionMode,
}

impl ProcessReport {
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

impl fmt::Display for ProcessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Whole milliseconds keep the output readable
        let elapsed = Duration::from_millis(self.elapsed.as_millis() as u64);
        write!(
            f,
            "Processed {} records in {} ({})",
            self.completed,
            humantime::format_duration(elapsed),
            self.mode.label()
        )
    }
}
