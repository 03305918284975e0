//! GET /api/models - supported model identifiers.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

/// Model identifiers the checker knows how to load.
pub const AVAILABLE_MODELS: &[&str] = &[
    "bert-base-uncased",
    "bert-base-cased",
    "distilbert-base-uncased",
    "roberta-base",
];

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub available_models: Vec<String>,
    pub current_model: String,
    pub model_loaded: bool,
}

/// List supported models and the configured one.
pub async fn available_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    Json(ModelsResponse {
        available_models: AVAILABLE_MODELS.iter().map(|m| m.to_string()).collect(),
        current_model: state.model_name.clone(),
        model_loaded: state.checker.has_neural(),
    })
}
