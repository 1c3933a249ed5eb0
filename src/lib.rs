//! Screengate library crate (used by the server binary and integration tests).
//!
//! Screengate sits in front of a remote text-scoring function and makes its
//! invocation idempotent: each distinct input is scored at most once, the
//! result is persisted, and repeat requests are answered from the store.
//!
//! # Public API Surface
//!
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`InvocationBroker`], [`BrokerError`] - Check-then-invoke-then-persist core
//! - [`RecordStore`], [`FsRecordStore`], [`Record`] - Persistence
//! - [`RemoteScorer`], [`LambdaScorer`] - Remote scoring function client
//! - [`ScreeningOutcome`], [`format_statement`] - Display formatting
//! - [`gateway`] - Axum HTTP surface
//!
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod broker;
pub mod config;
pub mod formatter;
pub mod gateway;
pub mod scorer;
pub mod store;

pub use broker::{BrokerError, BrokerResult, InvocationBroker};
#[cfg(any(test, feature = "mock"))]
pub use broker::MockInvocationBroker;

pub use config::{Config, ConfigError, DEFAULT_DATA_PATH, DEFAULT_PORT};

pub use formatter::{
    AT_RISK_STATEMENT, HEALTHY_STATEMENT, ScreeningOutcome, Statement, UNKNOWN_STATEMENT,
    format_statement,
};

pub use scorer::{
    CONTENT_TYPE_JSON, LambdaScorer, RemoteScorer, ScoreRequest, ScorerError, ScorerResult,
    parse_output,
};
#[cfg(any(test, feature = "mock"))]
pub use scorer::MockScorer;

pub use store::{FsRecordStore, Record, RecordStore, StoreError, StoreResult};
#[cfg(any(test, feature = "mock"))]
pub use store::MemoryRecordStore;
