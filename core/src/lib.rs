//! Verdict Core Library
//!
//! Domain types shared across the Verdict consensus service

pub mod features;
pub mod prediction;

pub use features::{FeatureError, Features};
pub use prediction::{AbsenceReason, Prediction, ProviderOutcome};

/// Stable key identifying one prediction provider (its endpoint URL)
pub type ProviderId = String;
