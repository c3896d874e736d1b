//! Meanvar server entry point.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use meanvar_data::{create_provider, PairAnalyzer};
use meanvar_server::{Server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Meanvar server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/meanvar.toml".to_string());

    let server_config = if std::path::Path::new(&config_path).exists() {
        info!("Loading configuration from {}", config_path);
        ServerConfig::from_file(&config_path)
            .with_context(|| format!("invalid configuration file {}", config_path))?
    } else {
        info!("Using default configuration");
        ServerConfig::default()
    };

    let provider = create_provider(server_config.source, server_config.data_dir.as_deref())
        .context("failed to create price source")?;

    let analyzer = PairAnalyzer::new(provider)
        .with_config(server_config.engine.clone())?
        .with_window(server_config.window)?;

    info!(
        "Price window {} .. {}, {} sampling",
        server_config.window.start, server_config.window.end, server_config.engine.interval
    );

    let server = Server::new(server_config, Arc::new(analyzer));
    server.start().await?;

    Ok(())
}
