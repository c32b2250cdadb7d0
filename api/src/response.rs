//! Client-facing response documents
//!
//! Field order here is the wire order clients see; the three prediction
//! responses share a common prefix and differ only in the reputation
//! material they append.

use serde::Serialize;

use verdict_core::Prediction;
use verdict_ledger::ProviderStatus;

/// Response for an unweighted consensus round.
#[derive(Debug, Serialize)]
pub struct ConsensusResponse {
    pub status: &'static str,
    pub consensus_prediction: usize,
    pub consensus_probability: Vec<f64>,
    pub iris_type: String,
    pub average_model_accuracy: f64,
    pub number_of_models_responded: usize,
    pub individual_predictions: Vec<Prediction>,
}

/// Response for a decay-weighted consensus round. `current_weights` are the
/// normalized weights the round was averaged under, not the post-update
/// weights.
#[derive(Debug, Serialize)]
pub struct WeightedResponse {
    pub status: &'static str,
    pub consensus_prediction: usize,
    pub consensus_probability: Vec<f64>,
    pub iris_type: String,
    pub average_model_accuracy: f64,
    pub number_of_models_responded: usize,
    pub current_weights: Vec<f64>,
    pub individual_predictions: Vec<Prediction>,
}

/// Response for a stake-weighted consensus round, carrying each responder's
/// post-round standing instead of an accuracy average.
#[derive(Debug, Serialize)]
pub struct StakeResponse {
    pub status: &'static str,
    pub consensus_prediction: usize,
    pub consensus_probability: Vec<f64>,
    pub iris_type: String,
    pub number_of_models_responded: usize,
    pub model_statuses: Vec<ProviderStatus>,
    pub individual_predictions: Vec<Prediction>,
}
