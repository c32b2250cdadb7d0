//! API Error Handling

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use verdict_consensus::ConsensusError;
use verdict_core::FeatureError;
use verdict_ledger::LedgerError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Anything that can fail a prediction round, lifted from the layer it
/// failed in.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Feature(#[from] FeatureError),

    #[error(transparent)]
    Consensus(#[from] ConsensusError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Clients get one failure envelope regardless of which layer the
        // round died in.
        let body = json!({
            "status": "error",
            "message": self.to_string(),
        });
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_layer_maps_to_bad_request() {
        let errors = [
            ApiError::from(FeatureError::Missing("sepal_length")),
            ApiError::from(ConsensusError::NoPredictions),
        ];

        for error in errors {
            let response = error.into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_message_passes_through_transparently() {
        let error = ApiError::from(ConsensusError::NoPredictions);
        assert_eq!(error.to_string(), "No valid predictions received");
    }
}
