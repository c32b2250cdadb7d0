//! Provider prediction documents and per-round outcomes

use serde::{Deserialize, Serialize};
use std::fmt;

/// One provider's answer for a single round, exactly as received.
///
/// Providers may attach extra fields (a model type tag, a status marker);
/// those are dropped on receipt. The document is never mutated afterwards
/// and is reproduced verbatim in response payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted class index.
    pub prediction: u32,
    /// Class probability vector, one entry per class.
    pub probability: Vec<f64>,
    /// Human-readable class name.
    pub iris_type: String,
    /// Accuracy the provider reports for itself.
    pub model_accuracy: f64,
}

/// Result-or-absence outcome of one provider call.
///
/// Failures are data, not errors: an absent provider is excluded from the
/// round but never aborts it.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome {
    Present(Prediction),
    Absent(AbsenceReason),
}

impl ProviderOutcome {
    pub fn is_present(&self) -> bool {
        matches!(self, ProviderOutcome::Present(_))
    }

    pub fn present(&self) -> Option<&Prediction> {
        match self {
            ProviderOutcome::Present(prediction) => Some(prediction),
            ProviderOutcome::Absent(_) => None,
        }
    }
}

/// Why a provider produced no usable prediction this round.
#[derive(Debug, Clone, PartialEq)]
pub enum AbsenceReason {
    /// Connection failure or timeout before any response arrived.
    Unreachable(String),

    /// Provider answered with a non-success HTTP status.
    BadStatus(u16),

    /// Provider answered but the body did not decode as a prediction.
    MalformedPayload(String),
}

impl fmt::Display for AbsenceReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable(detail) => write!(f, "unreachable: {}", detail),
            Self::BadStatus(code) => write!(f, "HTTP status {}", code),
            Self::MalformedPayload(detail) => write!(f, "malformed payload: {}", detail),
        }
    }
}
