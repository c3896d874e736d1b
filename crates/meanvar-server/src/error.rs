//! API error types.
//!
//! Every failure maps to the same response: HTTP 401 with `{"msg": "error"}`.
//! The cause is logged, never returned to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use meanvar_core::AnalyticsError;
use serde::Serialize;
use thiserror::Error;

/// API error type.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or incomplete request body.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Analysis failed.
    #[error("Analysis failed: {0}")]
    Analytics(#[from] AnalyticsError),
}

impl ApiError {
    /// Stable label for logging.
    pub fn kind(&self) -> String {
        match self {
            ApiError::BadRequest(_) => "bad_request".to_string(),
            ApiError::Analytics(e) => e.kind().to_string(),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always `"error"`.
    pub msg: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(kind = %self.kind(), "request failed: {}", self);

        (StatusCode::UNAUTHORIZED, Json(ErrorResponse { msg: "error" })).into_response()
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
