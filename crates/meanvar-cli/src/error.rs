//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Risk-free rate is not a finite number.
    #[error("Invalid risk-free rate: {0}. Use a decimal such as 0.02.")]
    InvalidRate(String),

    /// Missing required argument.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// Analysis failed.
    #[error("Analysis failed: {0}")]
    Analysis(#[from] meanvar_core::AnalyticsError),

    /// Price source could not be created.
    #[error("Price source error: {0}")]
    Source(#[from] meanvar_data::DataError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
