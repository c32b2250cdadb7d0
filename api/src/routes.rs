use axum::routing::get;
use axum::Router;

use crate::handlers::{
    consensus_predict, get_stakes, health_check, stake_predict, weighted_predict,
};
use crate::ApiState;

/// All prediction and ledger endpoints.
pub fn create_routes() -> Router<ApiState> {
    Router::new()
        .route("/consensus_predict", get(consensus_predict))
        .route("/weighted_predict", get(weighted_predict))
        .route("/stake_predict", get(stake_predict))
        .route("/stakes", get(get_stakes))
        .route("/health", get(health_check))
}
