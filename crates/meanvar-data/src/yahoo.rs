//! Yahoo Finance price histories.

use async_trait::async_trait;
use chrono::{DateTime, Datelike, NaiveDate};
use meanvar_core::{PricePoint, PriceSeries, SamplingInterval};
use time::{Month, OffsetDateTime};
use yahoo_finance_api as yahoo;

use crate::error::{DataError, DataResult};
use crate::provider::{HistoryRequest, PriceHistoryProvider};

/// Yahoo Finance chart API source.
///
/// Uses adjusted closes so that splits and dividends do not show up as returns.
pub struct YahooPriceSource {
    connector: yahoo::YahooConnector,
}

impl YahooPriceSource {
    /// Create a new Yahoo Finance source.
    pub fn new() -> DataResult<Self> {
        let connector =
            yahoo::YahooConnector::new().map_err(|e| DataError::Network(e.to_string()))?;
        Ok(Self { connector })
    }
}

fn interval_code(interval: SamplingInterval) -> &'static str {
    match interval {
        SamplingInterval::Daily => "1d",
        SamplingInterval::Monthly => "1mo",
    }
}

fn to_offset(date: NaiveDate) -> DataResult<OffsetDateTime> {
    let invalid = |e: time::error::ComponentRange| DataError::InvalidRequest(e.to_string());
    let month = Month::try_from(date.month() as u8).map_err(invalid)?;
    let day = time::Date::from_calendar_date(date.year(), month, date.day() as u8).map_err(invalid)?;
    Ok(day.midnight().assume_utc())
}

fn to_date(timestamp: i64) -> DataResult<NaiveDate> {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| DataError::Parse(format!("timestamp {} out of range", timestamp)))
}

fn classify(symbol: &str, error: yahoo::YahooError) -> DataError {
    let message = error.to_string();
    if message.contains("404") || message.contains("Not Found") {
        DataError::UnknownTicker(symbol.to_string())
    } else {
        DataError::Network(message)
    }
}

#[async_trait]
impl PriceHistoryProvider for YahooPriceSource {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    async fn history(&self, request: &HistoryRequest) -> DataResult<PriceSeries> {
        let symbol = request.symbol()?;
        let start = to_offset(request.window.start)?;
        let end = to_offset(request.window.end)?;

        let response = self
            .connector
            .get_quote_history_interval(symbol, start, end, interval_code(request.interval))
            .await
            .map_err(|e| classify(symbol, e))?;

        let quotes = response.quotes().map_err(|_| DataError::EmptyWindow {
            ticker: symbol.to_string(),
            start: request.window.start,
            end: request.window.end,
        })?;

        let mut points = Vec::with_capacity(quotes.len());
        for quote in quotes {
            let timestamp = i64::try_from(quote.timestamp)
                .map_err(|_| DataError::Parse("timestamp out of range".to_string()))?;
            points.push(PricePoint::new(to_date(timestamp)?, quote.adjclose));
        }

        log::debug!("fetched {} quotes for {} from Yahoo Finance", points.len(), symbol);
        request.select(points)
    }
}
