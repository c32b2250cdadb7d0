mod error;
mod handlers;
mod response;
mod routes;
mod state;

pub use error::{ApiError, ApiResult};
pub use response::{ConsensusResponse, StakeResponse, WeightedResponse};
pub use state::ApiState;

use axum::http::{header::CONTENT_TYPE, Method};
use axum::Router;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};

/// The full application router with CORS applied.
pub fn router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([CONTENT_TYPE]);

    routes::create_routes().with_state(state).layer(cors)
}

pub async fn start_server(
    addr: SocketAddr,
    state: ApiState,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🚀 API server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
