//! GET /api/stats - dashboard payload: store counts and recent checks.

use axum::{extract::State, Json};
use serde::Serialize;

use kousei_core::checker::HomophoneGroup;
use kousei_store::{CheckRecord, StoreStats};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// How many history rows the dashboard shows.
const RECENT_CHECKS: usize = 20;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub store: StoreStats,
    pub recent_checks: Vec<CheckRecord>,
    pub homophone_groups: Vec<HomophoneGroup>,
    pub model_loaded: bool,
}

/// Collect dashboard statistics.
pub async fn store_stats(State(state): State<AppState>) -> ApiResult<Json<StatsResponse>> {
    let checker = state.checker.clone();
    let store = state.store.clone();

    let response = tokio::task::spawn_blocking(move || -> ApiResult<StatsResponse> {
        let store = store
            .lock()
            .map_err(|_| ApiError::Internal("store lock poisoned".into()))?;
        Ok(StatsResponse {
            store: store.stats()?,
            recent_checks: store.recent_checks(RECENT_CHECKS)?,
            homophone_groups: checker.homophone_groups().to_vec(),
            model_loaded: checker.has_neural(),
        })
    })
    .await
    .map_err(|e| ApiError::Internal(format!("stats task failed: {e}")))??;

    Ok(Json(response))
}
