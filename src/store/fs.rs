//! Filesystem-backed store (simple file-per-record layout).

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{Record, RecordStore, StoreError, StoreResult};

const RECORD_EXTENSION: &str = "json";

const TEMP_EXTENSION: &str = "json.tmp";

/// Stores one JSON document per record under a data directory.
///
/// File stems are the blake3 hash of the input text, so lookups address a
/// single file instead of scanning. Writes go through a temp file and a
/// rename, so a crash mid-write never leaves a torn record behind.
#[derive(Debug, Clone)]
pub struct FsRecordStore {
    data_path: PathBuf,
}

impl FsRecordStore {
    /// Creates a store rooted at `data_path`.
    pub fn new(data_path: PathBuf) -> Self {
        Self { data_path }
    }

    /// Returns the root data directory.
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Ensures the root data directory exists.
    pub fn ensure_data_path(&self) -> StoreResult<()> {
        if !self.data_path.exists() {
            fs::create_dir_all(&self.data_path).map_err(|_| StoreError::Unavailable {
                path: self.data_path.clone(),
            })?;
        }
        Ok(())
    }

    fn record_key(input: &str) -> String {
        blake3::hash(input.as_bytes()).to_hex().to_string()
    }

    fn record_path(&self, input: &str) -> PathBuf {
        self.data_path
            .join(format!("{}.{}", Self::record_key(input), RECORD_EXTENSION))
    }

    fn temp_path(&self, input: &str) -> PathBuf {
        self.data_path
            .join(format!("{}.{}", Self::record_key(input), TEMP_EXTENSION))
    }

    fn read_record(path: &Path) -> StoreResult<Record> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl RecordStore for FsRecordStore {
    fn find_all(&self) -> StoreResult<Vec<Record>> {
        if !self.data_path.exists() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();

        for entry in fs::read_dir(&self.data_path)? {
            let path = entry?.path();

            if let Some(ext) = path.extension()
                && ext == RECORD_EXTENSION
            {
                records.push(Self::read_record(&path)?);
            }
        }

        Ok(records)
    }

    fn find_by_input(&self, input: &str) -> StoreResult<Option<Record>> {
        let path = self.record_path(input);

        if !path.exists() {
            return Ok(None);
        }

        let record = Self::read_record(&path)?;

        // Hash collision guard: the stored input must match exactly.
        if record.input == input {
            Ok(Some(record))
        } else {
            Ok(None)
        }
    }

    fn save(&self, record: Record) -> StoreResult<Record> {
        self.ensure_data_path()?;

        if let Some(existing) = self.find_by_input(&record.input)? {
            return Ok(existing);
        }

        let bytes = serde_json::to_vec(&record)?;

        let temp_path = self.temp_path(&record.input);
        let final_path = self.record_path(&record.input);

        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }

        fs::rename(&temp_path, &final_path)?;

        Ok(record)
    }
}
