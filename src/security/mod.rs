//! Safety gate between a typed command and its execution.
//!
//! This module holds the advisory verdict types, the policy applied when the
//! advisory service cannot answer, and the executor that ties review,
//! confirmation and dispatch together.

pub mod confirm;
pub mod executor;

use serde::{Deserialize, Serialize};

pub use confirm::{is_affirmative, Confirmer};
pub use executor::{CycleOutcome, SafetyGate};

/// Verdict returned by the advisory model for one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Safe,
    /// The model flagged the command; carries its one-sentence reason.
    Warning(String),
}

/// Result of one review attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Review {
    Verdict(Verdict),
    /// Timeout, transport failure, bad status or an unrecognised reply.
    Unavailable(String),
}

/// What to do when the advisory service cannot produce a verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnavailablePolicy {
    /// Fail open: run the command as if it had been judged safe.
    #[default]
    Allow,
    /// Fail closed: refuse to run unreviewed commands.
    Block,
}
