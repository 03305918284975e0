//! GET /api/health - health check endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    pub model_loaded: bool,
    pub model_name: String,
}

/// Health check endpoint for monitoring.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "kousei-server".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model_loaded: state.checker.has_neural(),
        model_name: state.model_name.clone(),
    })
}
