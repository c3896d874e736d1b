//! CSV price histories, one file per ticker.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use meanvar_core::{PricePoint, PriceSeries};
use serde::Deserialize;

use crate::error::{DataError, DataResult};
use crate::provider::{HistoryRequest, PriceHistoryProvider};

/// CSV record: `date,close` with ISO dates.
#[derive(Debug, Deserialize)]
struct CloseRecord {
    date: NaiveDate,
    close: f64,
}

/// Reads `<dir>/<TICKER>.csv` files.
///
/// Tickers are looked up as given, then upper-cased.
#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    dir: PathBuf,
}

impl CsvPriceSource {
    /// Create a source reading from `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Data directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn locate(&self, symbol: &str) -> Option<PathBuf> {
        for name in [symbol.to_string(), symbol.to_ascii_uppercase()] {
            let path = self.dir.join(format!("{}.csv", name));
            if tokio::fs::metadata(&path).await.is_ok() {
                return Some(path);
            }
        }
        None
    }
}

/// Parses `date,close` CSV content.
pub fn parse_closes(content: &str) -> DataResult<Vec<PricePoint>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut points = Vec::new();
    for result in reader.deserialize() {
        let record: CloseRecord = result?;
        points.push(PricePoint::new(record.date, record.close));
    }
    Ok(points)
}

#[async_trait]
impl PriceHistoryProvider for CsvPriceSource {
    fn name(&self) -> &'static str {
        "csv"
    }

    async fn history(&self, request: &HistoryRequest) -> DataResult<PriceSeries> {
        let symbol = request.symbol()?;
        let path = self
            .locate(symbol)
            .await
            .ok_or_else(|| DataError::UnknownTicker(symbol.to_string()))?;

        let content = tokio::fs::read_to_string(&path).await?;
        let points = parse_closes(&content)
            .map_err(|e| DataError::Parse(format!("{}: {}", path.display(), e)))?;

        log::debug!("read {} closes for {} from {}", points.len(), symbol, path.display());
        request.select(points)
    }
}
