//! API error type with JSON responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("invalid request: {0}")]
    BadRequest(String),

    /// Resource not found (404)
    #[error("resource not found: {0}")]
    NotFound(String),

    /// Checker not available (503)
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Internal server error (500)
    #[error("internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

impl From<kousei_core::CheckError> for ApiError {
    fn from(e: kousei_core::CheckError) -> Self {
        match e {
            kousei_core::CheckError::EmptyInput => {
                ApiError::BadRequest("text must not be empty".into())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<kousei_store::StoreError> for ApiError {
    fn from(e: kousei_store::StoreError) -> Self {
        ApiError::Internal(e.to_string())
    }
}
