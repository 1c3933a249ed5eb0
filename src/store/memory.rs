//! In-memory store (tests and the `mock` feature).

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use super::{Record, RecordStore, StoreError, StoreResult};

/// HashMap-backed store with a failure toggle for error-path tests.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RwLock<HashMap<String, Record>>,
    unavailable: AtomicBool,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent operation fail with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                path: PathBuf::from("<memory>"),
            });
        }
        Ok(())
    }
}

impl RecordStore for MemoryRecordStore {
    fn find_all(&self) -> StoreResult<Vec<Record>> {
        self.check_available()?;
        Ok(self.records.read().values().cloned().collect())
    }

    fn find_by_input(&self, input: &str) -> StoreResult<Option<Record>> {
        self.check_available()?;
        Ok(self.records.read().get(input).cloned())
    }

    fn save(&self, record: Record) -> StoreResult<Record> {
        self.check_available()?;
        let mut records = self.records.write();
        Ok(records
            .entry(record.input.clone())
            .or_insert(record)
            .clone())
    }
}
