//! Price history provider trait.
//!
//! A provider maps a ticker symbol and a calendar window to a series of
//! closing prices. Implementations:
//! - [`YahooPriceSource`](crate::YahooPriceSource): Yahoo Finance (feature `yahoo`)
//! - [`CsvPriceSource`](crate::CsvPriceSource): one `<TICKER>.csv` per ticker
//! - [`InMemoryPriceSource`](crate::InMemoryPriceSource): fixed series

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::Datelike;
use meanvar_core::{HistoryWindow, PricePoint, PriceSeries, SamplingInterval};
use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};

/// Kind of price source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Yahoo Finance chart API.
    #[default]
    Yahoo,
    /// CSV files on disk.
    Csv,
    /// Fixed in-memory series.
    Memory,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::Yahoo => "yahoo",
            SourceKind::Csv => "csv",
            SourceKind::Memory => "memory",
        };
        f.write_str(name)
    }
}

impl FromStr for SourceKind {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yahoo" => Ok(SourceKind::Yahoo),
            "csv" | "file" => Ok(SourceKind::Csv),
            "memory" => Ok(SourceKind::Memory),
            other => Err(DataError::InvalidRequest(format!(
                "unknown price source '{}'",
                other
            ))),
        }
    }
}

/// Request for one ticker's closing prices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    /// Ticker symbol as given by the caller.
    pub ticker: String,
    /// Calendar window, start inclusive and end exclusive.
    pub window: HistoryWindow,
    /// Sampling interval.
    pub interval: SamplingInterval,
}

impl HistoryRequest {
    /// Creates a request.
    pub fn new(ticker: impl Into<String>, window: HistoryWindow, interval: SamplingInterval) -> Self {
        Self {
            ticker: ticker.into(),
            window,
            interval,
        }
    }

    /// Trimmed ticker, rejecting symbols that are empty or contain
    /// characters outside `[A-Za-z0-9.^=-]`.
    pub fn symbol(&self) -> DataResult<&str> {
        let symbol = self.ticker.trim();
        let valid = !symbol.is_empty()
            && symbol.len() <= 16
            && symbol
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='));
        if !valid {
            return Err(DataError::InvalidRequest(format!(
                "invalid ticker symbol '{}'",
                self.ticker
            )));
        }
        Ok(symbol)
    }

    /// Builds the series for this request from raw closes.
    ///
    /// Keeps points inside the window; for monthly requests keeps the last
    /// close of each calendar month, dated at that close.
    pub fn select(&self, points: impl IntoIterator<Item = PricePoint>) -> DataResult<PriceSeries> {
        let in_window: Vec<PricePoint> = points
            .into_iter()
            .filter(|p| self.window.contains(p.date) && p.close.is_finite())
            .collect();

        let series = PriceSeries::new(self.ticker.trim(), in_window);
        let series = match self.interval {
            SamplingInterval::Daily => series,
            SamplingInterval::Monthly => month_ends(series),
        };

        if series.is_empty() {
            return Err(DataError::EmptyWindow {
                ticker: self.ticker.clone(),
                start: self.window.start,
                end: self.window.end,
            });
        }
        Ok(series)
    }
}

fn month_ends(series: PriceSeries) -> PriceSeries {
    let mut points: Vec<PricePoint> = Vec::new();
    for point in series.points() {
        match points.last_mut() {
            Some(last)
                if last.date.year() == point.date.year()
                    && last.date.month() == point.date.month() =>
            {
                *last = *point
            }
            _ => points.push(*point),
        }
    }
    PriceSeries::new(series.ticker(), points)
}

/// Source of closing-price histories.
#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &'static str;

    /// Fetches closing prices for one ticker.
    ///
    /// Fails with `UnknownTicker`, `EmptyWindow`, `Network` or `Parse`.
    async fn history(&self, request: &HistoryRequest) -> DataResult<PriceSeries>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn request(interval: SamplingInterval) -> HistoryRequest {
        HistoryRequest::new(
            "AAPL",
            HistoryWindow::new(d(2019, 1, 1), d(2019, 3, 1)).unwrap(),
            interval,
        )
    }

    #[test]
    fn test_symbol_validation() {
        assert_eq!(request(SamplingInterval::Daily).symbol().unwrap(), "AAPL");

        let mut bad = request(SamplingInterval::Daily);
        bad.ticker = "../etc/passwd".into();
        assert!(bad.symbol().is_err());
        bad.ticker = "  ".into();
        assert!(bad.symbol().is_err());
        bad.ticker = "BRK-B".into();
        assert!(bad.symbol().is_ok());
        bad.ticker = "^GSPC".into();
        assert!(bad.symbol().is_ok());
    }

    #[test]
    fn test_select_filters_window() {
        let points = vec![
            PricePoint::new(d(2018, 12, 31), 1.0),
            PricePoint::new(d(2019, 1, 2), 2.0),
            PricePoint::new(d(2019, 2, 28), 3.0),
            PricePoint::new(d(2019, 3, 1), 4.0),
        ];
        let series = request(SamplingInterval::Daily).select(points).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.close_on(d(2019, 1, 2)), Some(2.0));
    }

    #[test]
    fn test_select_monthly_keeps_month_end() {
        let points = vec![
            PricePoint::new(d(2019, 1, 2), 1.0),
            PricePoint::new(d(2019, 1, 31), 2.0),
            PricePoint::new(d(2019, 2, 1), 3.0),
            PricePoint::new(d(2019, 2, 27), 4.0),
        ];
        let series = request(SamplingInterval::Monthly).select(points).unwrap();
        let closes: Vec<f64> = series.points().iter().map(|p| p.close).collect();
        assert_eq!(closes, vec![2.0, 4.0]);
    }

    #[test]
    fn test_select_empty_window() {
        let points = vec![PricePoint::new(d(2020, 1, 2), 1.0)];
        let err = request(SamplingInterval::Daily).select(points).unwrap_err();
        assert!(matches!(err, DataError::EmptyWindow { .. }));
    }

    #[test]
    fn test_source_kind_parse() {
        assert_eq!("yahoo".parse::<SourceKind>().unwrap(), SourceKind::Yahoo);
        assert_eq!("CSV".parse::<SourceKind>().unwrap(), SourceKind::Csv);
        assert!("bloomberg".parse::<SourceKind>().is_err());
    }
}
