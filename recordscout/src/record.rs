/// Record types shared by the store and the engine.
///
/// Records always travel by value. The store hands out clones, the executors
/// move those clones into their units of work, and aggregated results are
/// owned `Vec<Record>`s. No unit ever holds a reference into the store's
/// backing collection, so a write that lands while a fan-out is in flight can
/// never be observed half-applied.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single entry of the record set
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier, assigned by the store and never reused
    pub id: u64,
    /// Display name, the target of substring search
    pub name: String,
    /// Contact address (not validated)
    pub email: String,
    /// Creation time, stamped only for records created through `insert`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record {
    /// Creates a record without a creation timestamp
    pub fn new(id: u64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            created_at: None,
        }
    }
}

/// Caller-supplied fields for creating or replacing a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    pub name: String,
    pub email: String,
}

impl NewRecord {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Turns the payload into a stored record with the given id and timestamp
    pub(crate) fn into_record(self, id: u64, created_at: Option<DateTime<Utc>>) -> Record {
        Record {
            id,
            name: self.name,
            email: self.email,
            created_at,
        }
    }
}
