//! Invocation broker: dedup lookup, remote call, persist.

pub mod error;


pub use error::{BrokerError, BrokerResult};

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, instrument};

use crate::scorer::{RemoteScorer, ScoreRequest, parse_output};
use crate::store::{Record, RecordStore};

type InputGate = Arc<tokio::sync::Mutex<()>>;

/// Orchestrates check-then-invoke-then-persist for screening requests.
///
/// Generic over its store and scorer so tests substitute mocks; the broker
/// itself keeps no per-request state beyond the in-flight claim table.
pub struct InvocationBroker<S: RecordStore, C: RemoteScorer> {
    store: S,
    scorer: C,
    inflight: Mutex<HashMap<String, InputGate>>,
}

impl<S: RecordStore, C: RemoteScorer> InvocationBroker<S, C> {
    pub fn new(store: S, scorer: C) -> Self {
        Self {
            store,
            scorer,
            inflight: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn scorer(&self) -> &C {
        &self.scorer
    }

    /// Returns the output label for `input`, invoking the remote scorer at
    /// most once per distinct input.
    ///
    /// A stored record short-circuits the call entirely. On a miss the scorer
    /// result is persisted before returning; on any failure nothing is
    /// persisted, so a later identical request retries from the lookup.
    #[instrument(skip(self, input), fields(input_len = input.len()))]
    pub async fn process_input(&self, input: &str) -> BrokerResult<String> {
        if input.is_empty() {
            return Err(BrokerError::EmptyInput);
        }

        // Per-input claim: concurrent duplicates serialize here, so the
        // second request observes the first one's record instead of invoking
        // the scorer again. The guard releases on drop, covering requests
        // cancelled mid-flight.
        let claim = self.claim(input);
        let _claimed = claim.gate.lock().await;
        self.process_claimed(input).await
    }

    /// Returns every persisted record, order unspecified.
    pub fn view_all_records(&self) -> BrokerResult<Vec<Record>> {
        Ok(self.store.find_all()?)
    }

    async fn process_claimed(&self, input: &str) -> BrokerResult<String> {
        if let Some(record) = self.store.find_by_input(input)? {
            info!("Cache hit, skipping scorer invocation");
            return Ok(record.output);
        }

        debug!("Cache miss, invoking remote scorer");
        let request = ScoreRequest::new(input);
        let payload = self.scorer.invoke(&request).await?;
        let output = parse_output(&payload)?;

        self.store.save(Record::new(input, output.clone()))?;
        info!(output = %output, "Scored and persisted");

        Ok(output)
    }

    fn claim(&self, input: &str) -> ClaimGuard<'_, S, C> {
        let gate = self
            .inflight
            .lock()
            .entry(input.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone();

        ClaimGuard {
            broker: self,
            input: input.to_string(),
            gate,
        }
    }

    fn release(&self, input: &str, gate: &InputGate) {
        let mut inflight = self.inflight.lock();
        // Two strong refs left (the table's and the guard's) means no other
        // request holds this gate, so the entry can go.
        if Arc::strong_count(gate) == 2 {
            inflight.remove(input);
        }
    }

    #[cfg(test)]
    fn inflight_len(&self) -> usize {
        self.inflight.lock().len()
    }
}

/// Holds one request's claim on an input gate; releasing happens in `Drop`,
/// so an abandoned request cannot leak its inflight entry.
struct ClaimGuard<'a, S: RecordStore, C: RemoteScorer> {
    broker: &'a InvocationBroker<S, C>,
    input: String,
    gate: InputGate,
}

impl<S: RecordStore, C: RemoteScorer> Drop for ClaimGuard<'_, S, C> {
    fn drop(&mut self) {
        self.broker.release(&self.input, &self.gate);
    }
}

#[cfg(any(test, feature = "mock"))]
pub type MockInvocationBroker =
    InvocationBroker<crate::store::MemoryRecordStore, crate::scorer::MockScorer>;

#[cfg(any(test, feature = "mock"))]
impl MockInvocationBroker {
    /// Creates a broker backed by an in-memory store and a scripted scorer.
    pub fn new_mock() -> Self {
        Self::new(
            crate::store::MemoryRecordStore::new(),
            crate::scorer::MockScorer::new(),
        )
    }
}
