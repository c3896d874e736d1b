//! In-memory price histories.

use std::collections::HashMap;

use async_trait::async_trait;
use meanvar_core::PriceSeries;

use crate::error::{DataError, DataResult};
use crate::provider::{HistoryRequest, PriceHistoryProvider};

/// Fixed price histories keyed by upper-case ticker.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPriceSource {
    series: HashMap<String, PriceSeries>,
}

impl InMemoryPriceSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a series under its ticker.
    #[must_use]
    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.insert(series);
        self
    }

    /// Adds or replaces a series.
    pub fn insert(&mut self, series: PriceSeries) {
        self.series
            .insert(series.ticker().to_ascii_uppercase(), series);
    }

    /// Number of tickers held.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Returns true if no series are held.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[async_trait]
impl PriceHistoryProvider for InMemoryPriceSource {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn history(&self, request: &HistoryRequest) -> DataResult<PriceSeries> {
        let symbol = request.symbol()?;
        let series = self
            .series
            .get(&symbol.to_ascii_uppercase())
            .ok_or_else(|| DataError::UnknownTicker(symbol.to_string()))?;
        request.select(series.points().iter().copied())
    }
}
