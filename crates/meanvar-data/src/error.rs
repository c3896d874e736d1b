//! Error types for price history retrieval.

use chrono::NaiveDate;
use meanvar_core::AnalyticsError;
use thiserror::Error;

/// A specialized Result type for price history operations.
pub type DataResult<T> = Result<T, DataError>;

/// Errors raised by price history providers.
#[derive(Debug, Error)]
pub enum DataError {
    /// The provider does not know the ticker.
    #[error("unknown ticker: {0}")]
    UnknownTicker(String),

    /// The ticker exists but has no closes in the requested window.
    #[error("no prices for {ticker} between {start} and {end}")]
    EmptyWindow {
        /// Requested ticker.
        ticker: String,
        /// Window start.
        start: NaiveDate,
        /// Window end.
        end: NaiveDate,
    },

    /// Remote service could not be reached or returned an error.
    #[error("network error: {0}")]
    Network(String),

    /// Response or file content could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(String),

    /// Malformed request (bad ticker symbol, invalid window).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl DataError {
    /// Stable label for logging.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            DataError::UnknownTicker(_) => "unknown_ticker",
            DataError::EmptyWindow { .. } => "empty_window",
            DataError::Network(_) => "network",
            DataError::Parse(_) => "parse",
            DataError::Io(_) => "io",
            DataError::InvalidRequest(_) => "invalid_request",
        }
    }
}

impl From<std::io::Error> for DataError {
    fn from(e: std::io::Error) -> Self {
        DataError::Io(e.to_string())
    }
}

impl From<csv::Error> for DataError {
    fn from(e: csv::Error) -> Self {
        DataError::Parse(e.to_string())
    }
}

/// Every retrieval failure is "data unavailable" to the analytics engine.
impl From<DataError> for AnalyticsError {
    fn from(e: DataError) -> Self {
        AnalyticsError::data_unavailable(e.to_string())
    }
}
