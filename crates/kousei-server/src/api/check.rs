//! POST /api/check - run a spell check.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use kousei_core::types::{CheckMode, Correction, DetectedIssue};
use kousei_core::TextStats;
use kousei_store::NewCheck;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub original_text: String,
    pub corrected_text: String,
    pub confidence_score: f32,
    pub corrections_made: Vec<Correction>,
    pub suggestions: Vec<DetectedIssue>,
    pub text_statistics: TextStats,
    pub mode: CheckMode,
}

/// Run a check over the submitted text.
///
/// Checking is CPU-bound (potentially a model forward pass per flagged
/// word), so it runs on the blocking pool. Each check is recorded in the
/// history table; a recording failure is logged, not surfaced.
pub async fn check_text(
    State(state): State<AppState>,
    Json(request): Json<CheckRequest>,
) -> ApiResult<Json<CheckResponse>> {
    if request.text.trim().is_empty() {
        return Err(ApiError::BadRequest("text must not be empty".into()));
    }

    let checker = state.checker.clone();
    let store = state.store.clone();
    let text = request.text;

    let response = tokio::task::spawn_blocking(move || -> ApiResult<CheckResponse> {
        let report = checker.check(&text)?;
        let stats = TextStats::analyze(&text);

        match store.lock() {
            Ok(store) => {
                let record = NewCheck {
                    input: report.input.clone(),
                    corrected: report.corrected.clone(),
                    corrections: report.corrections.len() as u32,
                    confidence: report.confidence,
                };
                if let Err(e) = store.record_check(&record) {
                    warn!("failed to record check: {e}");
                }
            }
            Err(_) => warn!("store lock poisoned, check not recorded"),
        }

        Ok(CheckResponse {
            original_text: report.input,
            corrected_text: report.corrected,
            confidence_score: report.confidence,
            corrections_made: report.corrections,
            suggestions: report.issues,
            text_statistics: stats,
            mode: report.mode,
        })
    })
    .await
    .map_err(|e| ApiError::Internal(format!("check task failed: {e}")))??;

    Ok(Json(response))
}
