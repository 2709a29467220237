use axum::extract::State;
use axum::Json;
use imitation_protocol::http::HealthResponse;
use std::sync::Arc;

use crate::app::AppState;

/// GET /health — liveness probe, returns server metadata.
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        env: std::env::var("IMITATION_ENV").unwrap_or_else(|_| "dev".to_string()),
        version: state.app_version.clone(),
    })
}
