//! Record persistence: a key-value store of screening results, keyed by
//! exact input text.

pub mod error;
pub mod fs;
#[cfg(any(test, feature = "mock"))]
pub mod memory;


pub use error::{StoreError, StoreResult};
pub use fs::FsRecordStore;
#[cfg(any(test, feature = "mock"))]
pub use memory::MemoryRecordStore;

use serde::{Deserialize, Serialize};

/// Persisted pairing of an input string and its computed output label.
///
/// A record only exists once the remote scorer has answered; there is no
/// partially-filled state, so a half-done request can never be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Normalized input text, the dedup key. Non-empty.
    pub input: String,

    /// Output label produced by the scorer (a short code such as `"0"`).
    pub output: String,

    /// Unix timestamp of when the result was obtained.
    pub created_at: i64,
}

impl Record {
    /// Creates a record stamped with the current time.
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            created_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// Store of screening records, one per distinct input string.
pub trait RecordStore: Send + Sync {
    /// Returns every persisted record, order unspecified.
    fn find_all(&self) -> StoreResult<Vec<Record>>;

    /// Exact-match lookup by input text.
    fn find_by_input(&self, input: &str) -> StoreResult<Option<Record>>;

    /// Inserts `record` unless a record with the same input already exists.
    ///
    /// Returns the record that is stored after the call: on a duplicate save
    /// the existing record wins, so an earlier answer is never clobbered.
    fn save(&self, record: Record) -> StoreResult<Record>;
}
