//! Scorer error types.

use thiserror::Error;

/// Errors returned by remote scorer invocations.
#[derive(Debug, Error)]
pub enum ScorerError {
    /// The remote call could not complete (network or remote error).
    #[error("scorer invocation failed: {message}")]
    Transport {
        /// Error message.
        message: String,
    },

    /// The call completed but the payload did not yield an output label.
    #[error("malformed scorer response: {reason}")]
    MalformedResponse {
        /// What was wrong with the payload.
        reason: String,
    },
}

/// Convenience result type for scorer operations.
pub type ScorerResult<T> = Result<T, ScorerError>;
