use std::sync::Arc;

use tracing::{debug, info};

use super::executor::{ConcurrentExecutor, Executor};
use super::matcher::RecordMatcher;
use super::processor::BatchProcessor;
use super::sequential::SequentialExecutor;
use crate::config::{Delays, EngineConfig, ExecutionMode};
use crate::errors::{LookupError, LookupResult};
use crate::metrics::{ProcessReport, ProcessingMetrics};
use crate::record::{NewRecord, Record};
use crate::results::SearchOutput;
use crate::store::RecordStore;

/// Read, search and process operations over a record store.
///
/// Every operation snapshots the store with [`RecordStore::list`] before
/// dispatching work, so units only ever see clones. The caller picks the
/// strategy per call; both strategies share the same predicates and delays.
pub struct RecordEngine {
    store: Arc<RecordStore>,
    concurrent: ConcurrentExecutor,
    sequential: SequentialExecutor,
    processor: BatchProcessor,
    delays: Delays,
    default_mode: ExecutionMode,
    metrics: ProcessingMetrics,
}

impl RecordEngine {
    /// Creates an engine over an existing store
    pub fn new(store: Arc<RecordStore>, config: &EngineConfig) -> LookupResult<Self> {
        let metrics = ProcessingMetrics::new();
        let concurrent = ConcurrentExecutor::new(config.thread_count, metrics.clone())?;

        Ok(Self {
            store,
            concurrent,
            sequential: SequentialExecutor::new(metrics.clone()),
            processor: BatchProcessor::new(&config.delays),
            delays: config.delays,
            default_mode: config.mode,
            metrics,
        })
    }

    /// Creates an engine over a freshly seeded store of `config.seed_count` records
    pub fn from_config(config: &EngineConfig) -> LookupResult<Self> {
        Self::new(Arc::new(RecordStore::seeded(config.seed_count)), config)
    }

    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    /// Strategy used when the caller does not pick one
    pub fn default_mode(&self) -> ExecutionMode {
        self.default_mode
    }

    pub fn metrics(&self) -> &ProcessingMetrics {
        &self.metrics
    }

    fn executor(&self, mode: ExecutionMode) -> &dyn Executor {
        match mode {
            ExecutionMode::Concurrent => &self.concurrent,
            ExecutionMode::Sequential => &self.sequential,
        }
    }

    /// Returns every record in store order
    pub fn list_all(&self) -> Vec<Record> {
        self.store.list()
    }

    /// Looks a record up by identifier, one unit per record
    pub fn find_by_id(&self, id: u64, mode: ExecutionMode) -> LookupResult<Record> {
        info!("Looking up record {} ({})", id, mode);
        let matcher = Arc::new(RecordMatcher::identity(id, &self.delays));

        self.executor(mode)
            .find_first(self.store.list(), matcher)
            .ok_or_else(|| {
                debug!("Record {} not found", id);
                LookupError::not_found(id)
            })
    }

    /// Returns every record whose name contains `query`, ignoring case.
    ///
    /// An empty or blank query is rejected as invalid input. Concurrent results
    /// come back in completion order; compare them as sets.
    pub fn search(&self, query: &str, mode: ExecutionMode) -> LookupResult<SearchOutput> {
        if query.trim().is_empty() {
            return Err(LookupError::invalid_input("search query must not be empty"));
        }

        info!("Starting search for '{}' ({})", query, mode);
        let matcher = RecordMatcher::name_contains(query, &self.delays);
        let output = SearchOutput::from_records(
            self.executor(mode).find_all(self.store.list(), &matcher),
        );

        info!("Search complete. Found {} matches", output.total);
        Ok(output)
    }

    /// Runs the heavy processing unit over every record and times the pass
    pub fn process_all(&self, mode: ExecutionMode) -> ProcessReport {
        let report = self
            .processor
            .process(self.executor(mode), self.store.list());
        self.metrics.log_stats();
        report
    }

    /// Appends a new record with the next identifier and a creation timestamp
    pub fn create(&self, new: NewRecord) -> Record {
        let record = self.store.insert(new);
        info!("Created record {}", record.id);
        record
    }

    /// Replaces the fields of an existing record, keeping its id and creation time
    pub fn update(&self, id: u64, new: NewRecord) -> LookupResult<Record> {
        let record = self
            .store
            .replace(id, new)
            .ok_or_else(|| LookupError::not_found(id))?;
        info!("Updated record {}", id);
        Ok(record)
    }

    /// Removes a record
    pub fn delete(&self, id: u64) -> LookupResult<Record> {
        let record = self
            .store
            .remove_by_id(id)
            .ok_or_else(|| LookupError::not_found(id))?;
        info!("Deleted record {}", id);
        Ok(record)
    }
}

/// Parses a textual record identifier.
///
/// Surrounding whitespace is ignored. Anything that is not an unsigned
/// integer is invalid input.
pub fn parse_id(raw: &str) -> LookupResult<u64> {
    let trimmed = raw.trim();
    trimmed
        .parse::<u64>()
        .map_err(|_| LookupError::invalid_input(format!("'{}' is not a valid record id", trimmed)))
}
