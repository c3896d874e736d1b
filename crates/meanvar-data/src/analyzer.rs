//! Fetch-and-analyze pipeline for a ticker pair.

use std::sync::Arc;

use meanvar_core::{
    AnalyticsResult, AssetStatistics, EngineConfig, HistoryWindow, PortfolioEngine, PortfolioReport,
    PriceSeries,
};

use crate::error::DataError;
use crate::provider::{HistoryRequest, PriceHistoryProvider};

/// Fetches two price histories and runs the portfolio engine on them.
///
/// Cheap to clone and safe to share between requests.
#[derive(Clone)]
pub struct PairAnalyzer {
    provider: Arc<dyn PriceHistoryProvider>,
    engine: PortfolioEngine,
    window: HistoryWindow,
}

impl std::fmt::Debug for PairAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PairAnalyzer")
            .field("provider", &self.provider.name())
            .field("engine", &self.engine)
            .field("window", &self.window)
            .finish()
    }
}

impl PairAnalyzer {
    /// Create an analyzer with the default engine and window.
    pub fn new(provider: Arc<dyn PriceHistoryProvider>) -> Self {
        Self {
            provider,
            engine: PortfolioEngine::default(),
            window: HistoryWindow::default(),
        }
    }

    /// Replaces the engine configuration.
    pub fn with_config(mut self, config: EngineConfig) -> AnalyticsResult<Self> {
        self.engine = PortfolioEngine::new(config)?;
        Ok(self)
    }

    /// Replaces the history window.
    pub fn with_window(mut self, window: HistoryWindow) -> AnalyticsResult<Self> {
        window.validate()?;
        self.window = window;
        Ok(self)
    }

    /// Portfolio engine.
    pub fn engine(&self) -> &PortfolioEngine {
        &self.engine
    }

    /// History window.
    pub fn window(&self) -> HistoryWindow {
        self.window
    }

    /// Name of the underlying provider.
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Fetches both histories concurrently.
    ///
    /// Any provider failure becomes `DataUnavailable`.
    pub async fn fetch(
        &self,
        first: &str,
        second: &str,
    ) -> AnalyticsResult<(PriceSeries, PriceSeries)> {
        let interval = self.engine.config().interval;
        let first_request = HistoryRequest::new(first, self.window, interval);
        let second_request = HistoryRequest::new(second, self.window, interval);

        let result = tokio::try_join!(
            self.provider.history(&first_request),
            self.provider.history(&second_request)
        );

        result.map_err(|e: DataError| {
            log::warn!(
                "{} provider failed for {}/{}: {} ({})",
                self.provider.name(),
                first,
                second,
                e,
                e.label()
            );
            e.into()
        })
    }

    /// Fetches both histories and derives annualized statistics.
    pub async fn statistics(&self, first: &str, second: &str) -> AnalyticsResult<AssetStatistics> {
        let (a, b) = self.fetch(first, second).await?;
        self.engine.derive(&a, &b)
    }

    /// Fetches both histories and runs the full analysis.
    pub async fn analyze(
        &self,
        first: &str,
        second: &str,
        risk_free_rate: f64,
    ) -> AnalyticsResult<PortfolioReport> {
        let statistics = self.statistics(first, second).await?;
        log::debug!(
            "analyzing {}/{} over {} observations at rf = {}",
            first,
            second,
            statistics.observations,
            risk_free_rate
        );
        self.engine.analyze(&statistics, risk_free_rate)
    }
}
