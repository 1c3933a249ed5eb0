//! Store error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by record stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing storage location is unreachable.
    #[error("storage unavailable at {path}")]
    Unavailable {
        /// Storage location.
        path: PathBuf,
    },

    /// A read or write failed at the filesystem level.
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be encoded or decoded.
    #[error("record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
