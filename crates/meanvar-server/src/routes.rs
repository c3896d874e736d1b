//! Route definitions.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use meanvar_data::PairAnalyzer;

use crate::handlers;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    /// Fetch-and-analyze pipeline.
    pub analyzer: Arc<PairAnalyzer>,
}

/// Create the router.
pub fn create_router(analyzer: Arc<PairAnalyzer>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/minVarPortfolio", post(handlers::min_var_portfolio))
        .with_state(AppState { analyzer })
}
