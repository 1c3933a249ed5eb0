//! Maps raw output codes to user-facing statements.
//!
//! This is a pure total function: every code maps to exactly one message,
//! and the formatted value is never written back to the store.

use serde::{Deserialize, Serialize};

/// Message shown when no concerning signal was detected.
pub const HEALTHY_STATEMENT: &str =
    "YAY! You don't seem to be showing any signs of depression! Keep it up!";

/// Message shown when the screening flagged a concerning signal.
pub const AT_RISK_STATEMENT: &str =
    "You show some signs of depression. Please consider seeing a therapist!";

/// Fallback for output codes outside the known set.
pub const UNKNOWN_STATEMENT: &str = "Sorry, something went terribly wrong. Please try again...";

/// Closed set of outcomes an output code can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreeningOutcome {
    /// Output `"0"`: no concerning signal.
    Healthy,
    /// Output `"1"`: concerning signal, follow-up recommended.
    AtRisk,
    /// Anything else, including malformed or missing codes.
    Unknown,
}

impl ScreeningOutcome {
    /// Maps a raw output code; codes outside `"0"`/`"1"` are `Unknown`.
    pub fn from_code(code: &str) -> Self {
        match code {
            "0" => Self::Healthy,
            "1" => Self::AtRisk,
            _ => Self::Unknown,
        }
    }

    /// Returns the display message for this outcome.
    pub fn statement(self) -> &'static str {
        match self {
            Self::Healthy => HEALTHY_STATEMENT,
            Self::AtRisk => AT_RISK_STATEMENT,
            Self::Unknown => UNKNOWN_STATEMENT,
        }
    }
}

/// Display envelope returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub statement: String,
}

/// Total mapping from an output code to its display envelope.
pub fn format_statement(output: &str) -> Statement {
    Statement {
        statement: ScreeningOutcome::from_code(output).statement().to_string(),
    }
}
