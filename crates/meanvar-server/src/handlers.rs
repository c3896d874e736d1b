//! HTTP request handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::debug;

use crate::dto::{HealthResponse, MinVarRequest, MinVarResponse};
use crate::error::{ApiError, ApiResult};
use crate::routes::AppState;

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        source: state.analyzer.provider_name().to_string(),
    })
}

/// Minimum-variance and market portfolio analysis for two tickers.
///
/// Body rejections are turned into [`ApiError`] so that malformed JSON gets
/// the same opaque response as an analysis failure.
pub async fn min_var_portfolio(
    State(state): State<AppState>,
    payload: Result<Json<MinVarRequest>, JsonRejection>,
) -> ApiResult<Json<MinVarResponse>> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let risk_free_rate = request.risk_free_rate.value()?;

    debug!(
        "minVarPortfolio {}/{} at rf = {}",
        request.stock1, request.stock2, risk_free_rate
    );

    let report = state
        .analyzer
        .analyze(&request.stock1, &request.stock2, risk_free_rate)
        .await?;

    Ok(Json(MinVarResponse::try_from(&report)?))
}
