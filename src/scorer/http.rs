//! HTTP client for a Lambda-style remote scoring function.

use tracing::debug;

use super::{RemoteScorer, ScoreRequest, ScorerError, ScorerResult};

const INVOCATION_TYPE_HEADER: &str = "X-Amz-Invocation-Type";

const LOG_TYPE_HEADER: &str = "X-Amz-Log-Type";

/// Blocks until the remote function completes and returns its full output,
/// as opposed to fire-and-forget dispatch.
const INVOCATION_REQUEST_RESPONSE: &str = "RequestResponse";

/// Captures the tail of the remote execution log; this client discards it.
const LOG_TYPE_TAIL: &str = "Tail";

/// Invokes a named remote scoring function in request-response mode.
///
/// Timeouts and cancellation are governed entirely by the [`reqwest::Client`]
/// this scorer is built with; no independent timeout policy is applied here.
#[derive(Debug, Clone)]
pub struct LambdaScorer {
    client: reqwest::Client,
    invoke_url: String,
    function_name: String,
}

impl LambdaScorer {
    /// Creates a scorer for `function_name` deployed in `region`.
    pub fn new(client: reqwest::Client, function_name: &str, region: &str) -> Self {
        let endpoint = format!("https://lambda.{}.amazonaws.com", region);
        Self::with_endpoint(client, function_name, &endpoint)
    }

    /// Creates a scorer against an explicit base endpoint (local stubs).
    pub fn with_endpoint(client: reqwest::Client, function_name: &str, endpoint: &str) -> Self {
        let invoke_url = format!(
            "{}/2015-03-31/functions/{}/invocations",
            endpoint.trim_end_matches('/'),
            function_name
        );

        Self {
            client,
            invoke_url,
            function_name: function_name.to_string(),
        }
    }

    /// Returns the configured function identifier.
    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    /// Returns the full invocation URL.
    pub fn invoke_url(&self) -> &str {
        &self.invoke_url
    }
}

impl RemoteScorer for LambdaScorer {
    async fn invoke(&self, request: &ScoreRequest) -> ScorerResult<String> {
        debug!(function = %self.function_name, "Invoking remote scorer");

        let response = self
            .client
            .post(&self.invoke_url)
            .header(INVOCATION_TYPE_HEADER, INVOCATION_REQUEST_RESPONSE)
            .header(LOG_TYPE_HEADER, LOG_TYPE_TAIL)
            .json(request)
            .send()
            .await
            .map_err(|e| ScorerError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScorerError::Transport {
                message: format!("remote function returned status {}", status),
            });
        }

        let bytes = response.bytes().await.map_err(|e| ScorerError::Transport {
            message: e.to_string(),
        })?;

        String::from_utf8(bytes.to_vec()).map_err(|_| ScorerError::MalformedResponse {
            reason: "payload is not valid UTF-8".to_string(),
        })
    }
}
