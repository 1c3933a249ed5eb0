use std::sync::Arc;

use crate::broker::InvocationBroker;
use crate::scorer::RemoteScorer;
use crate::store::RecordStore;

pub struct HandlerState<S: RecordStore + 'static, C: RemoteScorer + 'static> {
    pub broker: Arc<InvocationBroker<S, C>>,
}

// Manual impl: the store and scorer live behind the Arc, so cloning the
// state must not require them to be Clone.
impl<S: RecordStore, C: RemoteScorer> Clone for HandlerState<S, C> {
    fn clone(&self) -> Self {
        Self {
            broker: Arc::clone(&self.broker),
        }
    }
}

impl<S: RecordStore, C: RemoteScorer> HandlerState<S, C> {
    pub fn new(broker: Arc<InvocationBroker<S, C>>) -> Self {
        Self { broker }
    }
}
