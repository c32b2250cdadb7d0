//! Prediction round handlers
//!
//! The three prediction endpoints share one round shape: validate features,
//! fan out to every provider, fold the responders into a consensus, then
//! diverge in how reputation is read and written. Plain consensus touches no
//! ledger at all; the weighted and staked variants read their ledger for
//! voting weights and write the round's distances back to it.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use verdict_consensus::{aggregate, weights, ConsensusError};
use verdict_core::{FeatureError, Features, Prediction};
use verdict_ledger::StakeDocument;

use crate::error::ApiResult;
use crate::response::{ConsensusResponse, StakeResponse, WeightedResponse};
use crate::state::ApiState;

/// Query parameters for the prediction endpoints.
///
/// Values arrive as raw strings so a missing parameter and a malformed one
/// can be reported separately.
#[derive(Debug, Deserialize)]
pub struct PredictQuery {
    pub sepal_length: Option<String>,
    pub sepal_width: Option<String>,
    pub petal_length: Option<String>,
    pub petal_width: Option<String>,
}

impl PredictQuery {
    fn features(&self) -> Result<Features, FeatureError> {
        Features::parse(
            self.sepal_length.as_deref(),
            self.sepal_width.as_deref(),
            self.petal_length.as_deref(),
            self.petal_width.as_deref(),
        )
    }
}

/// GET /consensus_predict
///
/// Equal-weight consensus across whoever responds. Reads and writes no
/// reputation state.
pub async fn consensus_predict(
    State(state): State<ApiState>,
    Query(query): Query<PredictQuery>,
) -> ApiResult<Json<ConsensusResponse>> {
    let features = query.features()?;

    let round = state.providers.dispatch(&features).await;
    let present = round.present();
    if present.is_empty() {
        return Err(ConsensusError::NoPredictions.into());
    }

    let predictions: Vec<&Prediction> = present.iter().map(|(_, p)| *p).collect();
    let uniform = weights::uniform(predictions.len());
    let consensus = aggregate::form_consensus(&predictions, &uniform)?;

    tracing::info!(
        "🔮 Consensus round: {}/{} providers agreed on class {}",
        predictions.len(),
        state.providers.roster().len(),
        consensus.prediction
    );

    Ok(Json(ConsensusResponse {
        status: "success",
        consensus_prediction: consensus.prediction,
        consensus_probability: consensus.probability,
        iris_type: predictions[0].iris_type.clone(),
        average_model_accuracy: aggregate::mean_accuracy(&predictions),
        number_of_models_responded: predictions.len(),
        individual_predictions: predictions.iter().map(|p| (*p).clone()).collect(),
    }))
}

/// GET /weighted_predict
///
/// Consensus under decay weights. The round is averaged with each
/// responder's current weight, then every responder's distance from the
/// result is folded back into the weight ledger.
pub async fn weighted_predict(
    State(state): State<ApiState>,
    Query(query): Query<PredictQuery>,
) -> ApiResult<Json<WeightedResponse>> {
    let features = query.features()?;

    let round = state.providers.dispatch(&features).await;
    let present = round.present();
    if present.is_empty() {
        return Err(ConsensusError::NoPredictions.into());
    }

    let ids: Vec<&str> = present.iter().map(|(id, _)| *id).collect();
    let predictions: Vec<&Prediction> = present.iter().map(|(_, p)| *p).collect();

    let raw = state.weights.weights_for(&ids).await;
    let normalized = weights::normalize(&raw);
    let consensus = aggregate::form_consensus(&predictions, &normalized)?;

    let distances: Vec<(&str, f64)> = ids
        .iter()
        .zip(&predictions)
        .map(|(id, p)| {
            (
                *id,
                aggregate::euclidean_distance(&p.probability, &consensus.probability),
            )
        })
        .collect();
    state.weights.apply_round(&distances).await?;

    tracing::info!(
        "🔮 Weighted round: {}/{} providers, class {}",
        predictions.len(),
        state.providers.roster().len(),
        consensus.prediction
    );

    Ok(Json(WeightedResponse {
        status: "success",
        consensus_prediction: consensus.prediction,
        consensus_probability: consensus.probability,
        iris_type: predictions[0].iris_type.clone(),
        average_model_accuracy: aggregate::mean_accuracy(&predictions),
        number_of_models_responded: predictions.len(),
        // The weights the round was actually averaged under.
        current_weights: normalized,
        individual_predictions: predictions.iter().map(|p| (*p).clone()).collect(),
    }))
}

/// GET /stake_predict
///
/// Consensus under stake-derived weights, with slashing. Responders too far
/// from the round's consensus lose stake, and the response carries each
/// responder's post-round standing.
pub async fn stake_predict(
    State(state): State<ApiState>,
    Query(query): Query<PredictQuery>,
) -> ApiResult<Json<StakeResponse>> {
    let features = query.features()?;

    let round = state.providers.dispatch(&features).await;
    let present = round.present();
    if present.is_empty() {
        return Err(ConsensusError::NoPredictions.into());
    }

    let ids: Vec<&str> = present.iter().map(|(id, _)| *id).collect();
    let predictions: Vec<&Prediction> = present.iter().map(|(_, p)| *p).collect();

    let raw = state.stakes.weights_for(&ids).await;
    let normalized = weights::normalize(&raw);
    let consensus = aggregate::form_consensus(&predictions, &normalized)?;

    let distances: Vec<(&str, f64)> = ids
        .iter()
        .zip(&predictions)
        .map(|(id, p)| {
            (
                *id,
                aggregate::euclidean_distance(&p.probability, &consensus.probability),
            )
        })
        .collect();
    let statuses = state.stakes.apply_round(&distances).await?;

    tracing::info!(
        "🔮 Stake round: {}/{} providers, class {}",
        predictions.len(),
        state.providers.roster().len(),
        consensus.prediction
    );

    Ok(Json(StakeResponse {
        status: "success",
        consensus_prediction: consensus.prediction,
        consensus_probability: consensus.probability,
        iris_type: predictions[0].iris_type.clone(),
        number_of_models_responded: predictions.len(),
        model_statuses: statuses,
        individual_predictions: predictions.iter().map(|p| (*p).clone()).collect(),
    }))
}

/// GET /stakes
///
/// The full stake ledger: every provider's record plus the slash history.
pub async fn get_stakes(State(state): State<ApiState>) -> Json<StakeDocument> {
    Json(state.stakes.snapshot().await)
}

/// GET /health
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "verdict-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
