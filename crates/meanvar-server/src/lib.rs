//! # Meanvar Server
//!
//! HTTP front end for two-asset mean-variance analytics.
//!
//! ## Endpoints
//!
//! - `POST /minVarPortfolio`: minimum-variance portfolio, market portfolio,
//!   capital allocation scenarios and frontier for `{stock1, stock2, riskFreeRate}`
//! - `GET /health`: liveness and version
//!
//! Every failure is answered with HTTP 401 and `{"msg": "error"}`.
//!
//! ## Usage
//!
//! ```ignore
//! use meanvar_server::Server;
//!
//! let server = Server::new(config, analyzer);
//! server.start().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use meanvar_data::PairAnalyzer;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use routes::{create_router, AppState};

/// The Meanvar server.
pub struct Server {
    config: ServerConfig,
    analyzer: Arc<PairAnalyzer>,
}

impl Server {
    /// Create a new server.
    pub fn new(config: ServerConfig, analyzer: Arc<PairAnalyzer>) -> Self {
        Self { config, analyzer }
    }

    /// Build the router.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.analyzer.clone())
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Start the server.
    pub async fn start(&self) -> Result<(), std::io::Error> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        info!(
            "Starting Meanvar server on {} ({} prices)",
            addr,
            self.analyzer.provider_name()
        );

        // Host names resolve here; an unknown host is an error
        let listener = TcpListener::bind((self.config.host.as_str(), self.config.port)).await?;
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

/// Shutdown signal handler.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install CTRL+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down...");
}
