//! CLI command implementations.

pub mod analyze;
pub mod frontier;

pub use analyze::AnalyzeArgs;
pub use frontier::FrontierArgs;

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use meanvar_core::{EngineConfig, HistoryWindow};
use meanvar_data::{create_provider, PairAnalyzer};
use tracing::debug;

use crate::cli::DataOptions;
use crate::error::{CliError, CliResult};

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Parses a risk-free rate given as a decimal fraction.
pub fn parse_rate(s: &str) -> CliResult<f64> {
    match s.trim().parse::<f64>() {
        Ok(rate) if rate.is_finite() => Ok(rate),
        _ => Err(CliError::InvalidRate(s.to_string())),
    }
}

/// Returns `value` or asks for it on `input`.
///
/// An empty answer or end of input is a missing argument.
pub fn value_or_prompt<R: BufRead, W: Write>(
    value: Option<String>,
    label: &str,
    input: &mut R,
    prompt: &mut W,
) -> CliResult<String> {
    if let Some(value) = value {
        return Ok(value);
    }

    write!(prompt, "{}: ", label)?;
    prompt.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();
    if answer.is_empty() {
        return Err(CliError::MissingArgument(label.to_string()));
    }
    Ok(answer.to_string())
}

/// History window from the global options, falling back to the default window.
pub fn history_window(options: &DataOptions) -> CliResult<HistoryWindow> {
    let default = HistoryWindow::default();
    let start = match &options.start {
        Some(s) => parse_date(s)?,
        None => default.start,
    };
    let end = match &options.end {
        Some(s) => parse_date(s)?,
        None => default.end,
    };
    Ok(HistoryWindow::new(start, end)?)
}

/// Builds the fetch-and-analyze pipeline from the global options.
pub fn build_analyzer(options: &DataOptions) -> CliResult<PairAnalyzer> {
    let window = history_window(options)?;
    let config = EngineConfig::new()
        .with_interval(options.interval)
        .with_market_method(options.method);

    let provider = create_provider(options.source, options.data_dir.as_deref())?;
    debug!(
        "{} prices over {} .. {}, {} sampling",
        provider.name(),
        window.start,
        window.end,
        options.interval
    );

    Ok(PairAnalyzer::new(provider)
        .with_config(config)?
        .with_window(window)?)
}
