use std::thread;
use std::time::Duration;

use tracing::trace;

use crate::config::Delays;
use crate::record::Record;

/// The test applied to each record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `record.id == id`
    Identity(u64),
    /// Case-insensitive substring match on the name; holds the lowered query
    NameContains(String),
    /// No test at all; every record counts as processed
    Heavy,
}

impl Predicate {
    /// Applies the predicate without any simulated cost
    pub fn test(&self, record: &Record) -> bool {
        match self {
            Predicate::Identity(id) => record.id == *id,
            Predicate::NameContains(query) => record.name.to_lowercase().contains(query.as_str()),
            Predicate::Heavy => true,
        }
    }
}

/// Evaluates a predicate against one record at a time, paying a fixed
/// simulated processing cost per evaluation.
///
/// The delay stands in for real per-record I/O or CPU work. It is what makes
/// the concurrent and sequential strategies measurably different, so it is
/// configurable but never skipped.
#[derive(Debug, Clone)]
pub struct RecordMatcher {
    predicate: Predicate,
    delay: Duration,
}

impl RecordMatcher {
    /// Creates a matcher with an explicit predicate and delay
    pub fn new(predicate: Predicate, delay: Duration) -> Self {
        Self { predicate, delay }
    }

    /// Matches the record with the given identifier
    pub fn identity(id: u64, delays: &Delays) -> Self {
        Self::new(Predicate::Identity(id), delays.identity())
    }

    /// Matches records whose name contains `query`, ignoring case
    pub fn name_contains(query: &str, delays: &Delays) -> Self {
        Self::new(Predicate::NameContains(query.to_lowercase()), delays.search())
    }

    /// The benchmark unit: no predicate, only the processing cost
    pub fn heavy(delays: &Delays) -> Self {
        Self::new(Predicate::Heavy, delays.process())
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Pays the simulated cost, then applies the predicate
    pub fn evaluate(&self, record: &Record) -> bool {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        let matched = self.predicate.test(record);
        trace!("Evaluated record {}: matched={}", record.id, matched);
        matched
    }
}
