//! Verdict Consensus
//!
//! Concurrent provider fan-out and weighted consensus aggregation.
//! One round dispatches the same query to every provider on the roster,
//! tolerates any subset failing, and folds whatever arrived into a single
//! consensus probability vector.

use thiserror::Error;

pub mod aggregate;
pub mod client;
pub mod fanout;
pub mod weights;

pub use aggregate::Consensus;
pub use client::ProviderClient;
pub use fanout::{ProviderPool, RoundOutcome};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConsensusError {
    /// Every provider on the roster was absent this round.
    #[error("No valid predictions received")]
    NoPredictions,

    /// Providers disagree on the number of classes.
    #[error("Probability vector length mismatch: expected {expected}, got {got}")]
    VectorLengthMismatch { expected: usize, got: usize },

    /// Providers returned zero-length probability vectors.
    #[error("Empty probability vector")]
    EmptyVector,
}
