use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crossbeam_channel::unbounded;
use parking_lot::Mutex;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, trace};

use super::cancel::CancellationToken;
use super::matcher::RecordMatcher;
use crate::config::ExecutionMode;
use crate::errors::{LookupError, LookupResult};
use crate::metrics::ProcessingMetrics;
use crate::record::Record;

/// A strategy for running one unit of work per record.
///
/// Implemented by the concurrent fan-out engine and by the sequential
/// baseline, so callers can swap one for the other without changing the
/// predicate logic.
pub trait Executor: Send + Sync {
    /// Strategy implemented by this executor
    fn mode(&self) -> ExecutionMode;

    /// Returns a record the matcher accepts, or `None` once every record
    /// has been rejected
    fn find_first(&self, records: Vec<Record>, matcher: Arc<RecordMatcher>) -> Option<Record>;

    /// Returns every record the matcher accepts
    fn find_all(&self, records: Vec<Record>, matcher: &RecordMatcher) -> Vec<Record>;

    /// Runs the matcher on every record and returns the number of completed units
    fn run_all(&self, records: Vec<Record>, matcher: &RecordMatcher) -> usize;
}

/// What a unit reports back to the first-match aggregator
#[derive(Debug)]
enum Outcome {
    Match(Record),
    Miss,
    Cancelled,
}

/// Fans out one unit of work per record onto a bounded worker pool and
/// fans the outcomes back in.
///
/// Every call launches exactly N units for N records. The pool caps how many
/// of them run at the same time; the rest wait in the pool's queue.
pub struct ConcurrentExecutor {
    pool: ThreadPool,
    metrics: ProcessingMetrics,
}

impl ConcurrentExecutor {
    /// Creates an executor backed by `thread_count` worker threads
    pub fn new(thread_count: NonZeroUsize, metrics: ProcessingMetrics) -> LookupResult<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(thread_count.get())
            .thread_name(|i| format!("recordscout-worker-{}", i))
            .build()
            .map_err(|e| LookupError::config_error(format!("failed to build worker pool: {}", e)))?;

        debug!("Worker pool ready with {} threads", thread_count);
        Ok(Self { pool, metrics })
    }

    pub fn thread_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn metrics(&self) -> &ProcessingMetrics {
        &self.metrics
    }
}

impl Executor for ConcurrentExecutor {
    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Concurrent
    }

    /// First-match policy.
    ///
    /// Consumes outcomes until one unit reports a match or every unit has
    /// reported. On a match the shared token is cancelled so that units which
    /// have not started yet skip their work instead of running unobserved.
    fn find_first(&self, records: Vec<Record>, matcher: Arc<RecordMatcher>) -> Option<Record> {
        let units = records.len();
        self.metrics.record_fan_out(units);

        let (tx, rx) = unbounded();
        let cancel = CancellationToken::new();

        for record in records {
            let tx = tx.clone();
            let cancel = cancel.clone();
            let matcher = Arc::clone(&matcher);
            let metrics = self.metrics.clone();

            self.pool.spawn(move || {
                let outcome = if cancel.is_cancelled() {
                    trace!("Skipping record {} after cancellation", record.id);
                    metrics.record_cancelled();
                    Outcome::Cancelled
                } else {
                    let matched = matcher.evaluate(&record);
                    metrics.record_evaluation(matched);
                    if matched {
                        Outcome::Match(record)
                    } else {
                        Outcome::Miss
                    }
                };
                // The aggregator stops listening after the first match
                let _ = tx.send(outcome);
            });
        }
        // Only the units hold senders now; the channel closes when the last one reports
        drop(tx);

        let mut reported = 0;
        for outcome in rx.iter() {
            reported += 1;
            if let Outcome::Match(record) = outcome {
                cancel.cancel();
                debug!(
                    "First match (record {}) after {} of {} units",
                    record.id, reported, units
                );
                return Some(record);
            }
        }

        debug!("No match after all {} units reported", reported);
        None
    }

    /// All-matches policy.
    ///
    /// Matching units append to a shared accumulator, one record per lock
    /// acquisition. The scope returns only after every unit has finished.
    fn find_all(&self, records: Vec<Record>, matcher: &RecordMatcher) -> Vec<Record> {
        let units = records.len();
        self.metrics.record_fan_out(units);

        let accumulator = Mutex::new(Vec::new());
        self.pool.scope(|s| {
            for record in records {
                let accumulator = &accumulator;
                let metrics = &self.metrics;
                s.spawn(move |_| {
                    let matched = matcher.evaluate(&record);
                    metrics.record_evaluation(matched);
                    if matched {
                        accumulator.lock().push(record);
                    }
                });
            }
        });

        let matches = accumulator.into_inner();
        debug!("{} of {} units matched", matches.len(), units);
        matches
    }

    fn run_all(&self, records: Vec<Record>, matcher: &RecordMatcher) -> usize {
        let units = records.len();
        self.metrics.record_fan_out(units);

        let completed = AtomicUsize::new(0);
        self.pool.scope(|s| {
            for record in records {
                let completed = &completed;
                let metrics = &self.metrics;
                s.spawn(move |_| {
                    matcher.evaluate(&record);
                    metrics.record_evaluation(false);
                    completed.fetch_add(1, Ordering::AcqRel);
                });
            }
        });

        completed.into_inner()
    }
}
