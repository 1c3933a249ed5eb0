//! Broker error types.

use thiserror::Error;

use crate::scorer::ScorerError;
use crate::store::StoreError;

/// Errors surfaced by [`InvocationBroker`](super::InvocationBroker).
///
/// Scorer and store failures pass through unhandled; the broker performs no
/// local recovery and fabricates no fallback output.
#[derive(Debug, Error)]
pub enum BrokerError {
    /// The input text was empty; nothing to screen.
    #[error("input must not be empty")]
    EmptyInput,

    /// The remote scorer call failed or returned an unusable payload.
    #[error(transparent)]
    Scorer(#[from] ScorerError),

    /// The record store rejected a read or write.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience result type for broker operations.
pub type BrokerResult<T> = Result<T, BrokerError>;
