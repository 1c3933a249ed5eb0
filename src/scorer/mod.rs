//! Remote scoring client: an opaque text-to-label function invoked over HTTP.

pub mod error;
pub mod http;
#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use error::{ScorerError, ScorerResult};
pub use http::LambdaScorer;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockScorer;

use serde::Serialize;

/// Content-type marker carried in every score request.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Payload sent to the remote scoring function. Never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreRequest {
    /// Raw input text to classify.
    pub input: String,

    /// Content-type marker the remote function expects inside the payload.
    #[serde(rename = "Content-Type")]
    pub content_type: &'static str,
}

impl ScoreRequest {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            content_type: CONTENT_TYPE_JSON,
        }
    }
}

/// Remote, stateless scoring function, shared concurrently across requests.
///
/// `invoke` runs in request-response mode: it resolves only once the remote
/// function has fully completed, returning its raw UTF-8 payload. Transport
/// failures surface as [`ScorerError::Transport`]; they must never be
/// mistaken for an answer.
pub trait RemoteScorer: Send + Sync {
    /// Performs one synchronous remote call.
    fn invoke(
        &self,
        request: &ScoreRequest,
    ) -> impl std::future::Future<Output = ScorerResult<String>> + Send;
}

/// Extracts the `output` label from a raw scorer payload.
///
/// The parse is synchronous and local. A payload that is not JSON, lacks an
/// `output` field, or carries a non-string `output` yields
/// [`ScorerError::MalformedResponse`], a distinct condition from a
/// transport failure, so callers can tell "no answer" from "bad answer".
pub fn parse_output(payload: &str) -> ScorerResult<String> {
    let value: serde_json::Value =
        serde_json::from_str(payload).map_err(|e| ScorerError::MalformedResponse {
            reason: format!("payload is not valid JSON: {}", e),
        })?;

    let output = value
        .get("output")
        .ok_or_else(|| ScorerError::MalformedResponse {
            reason: "payload has no `output` field".to_string(),
        })?;

    output
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ScorerError::MalformedResponse {
            reason: "`output` field is not a string".to_string(),
        })
}
