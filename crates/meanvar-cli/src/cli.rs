//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use meanvar_core::{MarketMethod, SamplingInterval};
use meanvar_data::SourceKind;

use crate::commands::{AnalyzeArgs, FrontierArgs};

/// Meanvar - minimum-variance and market portfolios for a pair of stocks
#[derive(Parser)]
#[command(name = "meanvar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub data: DataOptions,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where prices come from and how they are analyzed.
#[derive(Args, Debug, Clone)]
pub struct DataOptions {
    /// Price source: yahoo or csv
    #[arg(long, default_value = "yahoo", env = "MEANVAR_SOURCE", global = true)]
    pub source: SourceKind,

    /// Directory of <TICKER>.csv files (csv source)
    #[arg(long, env = "MEANVAR_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// First date of the price window (YYYY-MM-DD). Defaults to 2018-06-01.
    #[arg(long, global = true)]
    pub start: Option<String>,

    /// End of the price window, exclusive (YYYY-MM-DD). Defaults to 2019-06-01.
    #[arg(long, global = true)]
    pub end: Option<String>,

    /// Sampling interval: daily or monthly
    #[arg(long, default_value = "daily", global = true)]
    pub interval: SamplingInterval,

    /// Market portfolio method: brent or closed-form
    #[arg(long, default_value = "brent", global = true)]
    pub method: MarketMethod,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Minimum-variance portfolio, market portfolio and allocation scenarios
    Analyze(AnalyzeArgs),

    /// Sample the efficient frontier, optionally as an HTML chart
    Frontier(FrontierArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}
