//! Meanvar CLI - two-asset mean-variance analytics from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Minimum-variance and market portfolio for a pair (prompts for anything missing)
//! meanvar analyze AAPL MSFT 0.02
//!
//! # Same analysis from local CSV files, monthly closes, as JSON
//! meanvar --source csv --data-dir ./prices --interval monthly --format json analyze AAPL MSFT 0.02
//!
//! # Efficient frontier with an HTML chart
//! meanvar frontier AAPL MSFT --plot frontier.html
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so table and JSON output stay clean
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let format = cli.format;

    match &cli.command {
        Commands::Analyze(args) => commands::analyze::execute(args, &cli.data, format).await?,
        Commands::Frontier(args) => commands::frontier::execute(args, &cli.data, format).await?,
    }

    Ok(())
}
