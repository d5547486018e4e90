use std::sync::Arc;

use tracing::debug;

use super::executor::Executor;
use super::matcher::RecordMatcher;
use crate::config::ExecutionMode;
use crate::metrics::ProcessingMetrics;
use crate::record::Record;

/// Runs the same predicate logic strictly in input order on the calling
/// thread. Serves as the deterministic, higher-latency comparison point for
/// the concurrent executor.
#[derive(Debug, Clone, Default)]
pub struct SequentialExecutor {
    metrics: ProcessingMetrics,
}

impl SequentialExecutor {
    pub fn new(metrics: ProcessingMetrics) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> &ProcessingMetrics {
        &self.metrics
    }
}

impl Executor for SequentialExecutor {
    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Sequential
    }

    fn find_first(&self, records: Vec<Record>, matcher: Arc<RecordMatcher>) -> Option<Record> {
        for (visited, record) in records.into_iter().enumerate() {
            let matched = matcher.evaluate(&record);
            self.metrics.record_evaluation(matched);
            if matched {
                debug!("Sequential match (record {}) at position {}", record.id, visited);
                return Some(record);
            }
        }
        None
    }

    fn find_all(&self, records: Vec<Record>, matcher: &RecordMatcher) -> Vec<Record> {
        let matches: Vec<Record> = records
            .into_iter()
            .filter(|record| {
                let matched = matcher.evaluate(record);
                self.metrics.record_evaluation(matched);
                matched
            })
            .collect();
        debug!("Sequential scan found {} matches", matches.len());
        matches
    }

    fn run_all(&self, records: Vec<Record>, matcher: &RecordMatcher) -> usize {
        let mut completed = 0;
        for record in &records {
            matcher.evaluate(record);
            self.metrics.record_evaluation(false);
            completed += 1;
        }
        completed
    }
}
