use chrono::Utc;
use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::record::{NewRecord, Record};
use crate::seed::seed_records;

#[derive(Debug)]
struct StoreInner {
    records: Vec<Record>,
    next_id: u64,
}

/// Owns the record collection behind a single reader/writer lock.
///
/// Reads (`list`, `find_by_id`, `len`) take the shared side of the lock and
/// may run alongside each other. Writes (`insert`, `replace`, `remove_by_id`)
/// take the exclusive side. The backing vector is never handed out; every
/// accessor returns clones.
#[derive(Debug)]
pub struct RecordStore {
    inner: RwLock<StoreInner>,
}

impl RecordStore {
    /// Creates an empty store whose first assigned id is 1
    pub fn new() -> Self {
        Self::from_records(Vec::new())
    }

    /// Creates a store populated with `count` deterministic synthetic records
    pub fn seeded(count: usize) -> Self {
        debug!("Seeding store with {} records", count);
        Self::from_records(seed_records(count))
    }

    /// Creates a store from explicit records, keeping their order.
    ///
    /// The next assigned id is one past the largest id present.
    pub fn from_records(records: Vec<Record>) -> Self {
        let next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        Self {
            inner: RwLock::new(StoreInner { records, next_id }),
        }
    }

    /// Returns an independent copy of all records in insertion order
    pub fn list(&self) -> Vec<Record> {
        self.inner.read().records.clone()
    }

    /// Returns a copy of the record with the given id, if any
    pub fn find_by_id(&self, id: u64) -> Option<Record> {
        self.inner.read().records.iter().find(|r| r.id == id).cloned()
    }

    /// Appends a new record, assigning the next id and a creation timestamp
    pub fn insert(&self, new: NewRecord) -> Record {
        let mut inner = self.inner.write();
        let id = inner.next_id;
        inner.next_id += 1;

        let record = new.into_record(id, Some(Utc::now()));
        inner.records.push(record.clone());
        trace!("Inserted record {}", id);
        record
    }

    /// Replaces the fields of an existing record in place.
    ///
    /// The id and original creation timestamp are preserved. Returns `None`
    /// when no record has the given id.
    pub fn replace(&self, id: u64, new: NewRecord) -> Option<Record> {
        let mut inner = self.inner.write();
        let slot = inner.records.iter_mut().find(|r| r.id == id)?;

        let record = new.into_record(id, slot.created_at);
        *slot = record.clone();
        trace!("Replaced record {}", id);
        Some(record)
    }

    /// Removes the record with the given id, compacting the collection
    pub fn remove_by_id(&self, id: u64) -> Option<Record> {
        let mut inner = self.inner.write();
        let index = inner.records.iter().position(|r| r.id == id)?;
        trace!("Removed record {}", id);
        Some(inner.records.remove(index))
    }

    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}
