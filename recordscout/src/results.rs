/// Search result types.
///
/// A `SearchOutput` produced by the concurrent engine lists its records in the
/// order the worker units happened to acquire the accumulator lock, which
/// changes from run to run. Only the sequential baseline guarantees input
/// order. Compare concurrent results as sets (see [`SearchOutput::ids`]).
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// The complete result of a search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutput {
    /// Matching records, unordered for concurrent runs
    pub records: Vec<Record>,
    /// Number of matching records
    pub total: usize,
}

impl SearchOutput {
    /// Creates a new empty search output
    pub fn new() -> Self {
        Default::default()
    }

    /// Builds an output from a list of matches
    pub fn from_records(records: Vec<Record>) -> Self {
        let total = records.len();
        Self { records, total }
    }

    /// Adds one matching record
    pub fn add_record(&mut self, record: Record) {
        self.total += 1;
        self.records.push(record);
    }

    /// Merges another search output into this one
    pub fn merge(&mut self, other: SearchOutput) {
        self.total += other.total;
        self.records.extend(other.records);
    }

    /// Identifiers of the matching records as an ordered set
    pub fn ids(&self) -> BTreeSet<u64> {
        self.records.iter().map(|r| r.id).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
