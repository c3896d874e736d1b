//! Output formatting utilities.

use colored::Colorize;
use rust_decimal::prelude::*;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Formats and prints rows based on the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
    }
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
    Ok(())
}

/// Prints data as JSON.
fn print_json<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Scales a fraction to percent and rounds to 2 decimals, as the HTTP API does.
///
/// Non-finite input yields `None`.
pub fn percent_value(value: f64) -> Option<Decimal> {
    ratio_value(value * 100.0)
}

/// Rounds without scaling, for ratios such as Sharpe.
pub fn ratio_value(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value).map(|d| d.round_dp(2))
}

/// Formats a fraction as a percentage string with 2 decimals.
pub fn format_percent(value: f64) -> String {
    match percent_value(value) {
        Some(d) => format!("{:.2}%", d),
        None => "n/a".to_string(),
    }
}

/// Formats a ratio with 2 decimals.
pub fn format_ratio(value: f64) -> String {
    match ratio_value(value) {
        Some(d) => format!("{:.2}", d),
        None => "n/a".to_string(),
    }
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a key-value pair formatted as percentage.
    pub fn from_percent(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, format_percent(value))
    }

    /// Creates a key-value pair formatted as a plain ratio.
    pub fn from_ratio(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, format_ratio(value))
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.130769), "13.08%");
        assert_eq!(format_percent(-0.5), "-50.00%");
        assert_eq!(format_percent(0.0), "0.00%");
        assert_eq!(format_percent(f64::NAN), "n/a");
    }

    #[test]
    fn test_format_ratio_is_not_scaled() {
        assert_eq!(format_ratio(0.7211), "0.72");
        assert_eq!(format_ratio(1.0), "1.00");
    }

    #[test]
    fn test_key_value() {
        let kv = KeyValue::from_percent("Mean", 0.085);
        assert_eq!(kv.key, "Mean");
        assert_eq!(kv.value, "8.50%");
    }
}
