use std::time::Instant;

use tracing::{info, trace};

use super::executor::Executor;
use super::matcher::RecordMatcher;
use crate::config::Delays;
use crate::metrics::ProcessReport;
use crate::record::Record;

/// Times a full heavy-processing pass over a record set.
///
/// The processor does not care which executor it is handed; it runs the
/// heavy unit on every record and reports how many units completed, how long
/// the whole pass took, and which strategy did the work.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    matcher: RecordMatcher,
}

impl BatchProcessor {
    /// Creates a processor whose units cost `delays.process_ms` each
    pub fn new(delays: &Delays) -> Self {
        Self {
            matcher: RecordMatcher::heavy(delays),
        }
    }

    /// Runs one unit per record with `executor` and measures the pass
    pub fn process(&self, executor: &dyn Executor, records: Vec<Record>) -> ProcessReport {
        let mode = executor.mode();
        let units = records.len();
        trace!("Processing {} records ({})", units, mode);

        let start = Instant::now();
        let completed = executor.run_all(records, &self.matcher);
        let elapsed = start.elapsed();

        let report = ProcessReport {
            completed,
            elapsed,
            mode,
        };
        info!("{}", report);
        report
    }
}
