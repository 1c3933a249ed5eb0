//! Scripted scorer for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use super::{RemoteScorer, ScoreRequest, ScorerError, ScorerResult};

enum ScriptedResult {
    Payload(String),
    TransportError(String),
    Pending,
}

/// Mock scorer returning scripted payloads and counting invocations.
///
/// With an empty script every call answers `{"output":"0"}`.
#[derive(Default)]
pub struct MockScorer {
    script: Mutex<VecDeque<ScriptedResult>>,
    invocations: AtomicUsize,
    seen_inputs: Mutex<Vec<String>>,
}

impl MockScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw payload to return from the next invocation.
    pub fn push_payload(&self, payload: impl Into<String>) {
        self.script
            .lock()
            .push_back(ScriptedResult::Payload(payload.into()));
    }

    /// Queues an output label, wrapped in the scorer response envelope.
    pub fn push_output(&self, output: &str) {
        self.push_payload(format!(r#"{{"output":"{}"}}"#, output));
    }

    /// Queues a transport failure.
    pub fn push_transport_error(&self, message: impl Into<String>) {
        self.script
            .lock()
            .push_back(ScriptedResult::TransportError(message.into()));
    }

    /// Queues an invocation that never resolves (for cancellation tests).
    pub fn push_pending(&self) {
        self.script.lock().push_back(ScriptedResult::Pending);
    }

    /// Number of times `invoke` was called.
    pub fn invocation_count(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }

    /// Inputs seen by `invoke`, in call order.
    pub fn seen_inputs(&self) -> Vec<String> {
        self.seen_inputs.lock().clone()
    }
}

impl RemoteScorer for MockScorer {
    async fn invoke(&self, request: &ScoreRequest) -> ScorerResult<String> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        self.seen_inputs.lock().push(request.input.clone());

        let scripted = self.script.lock().pop_front();
        match scripted {
            Some(ScriptedResult::Payload(payload)) => Ok(payload),
            Some(ScriptedResult::TransportError(message)) => {
                Err(ScorerError::Transport { message })
            }
            Some(ScriptedResult::Pending) => std::future::pending().await,
            None => Ok(r#"{"output":"0"}"#.to_string()),
        }
    }
}
