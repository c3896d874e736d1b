//! Analysis orchestration.

use crate::analytics::{
    derive_statistics, frontier_points, half_market, leveraged_market, market_portfolio,
    min_variance_portfolio, FrontierSampler,
};
use crate::config::EngineConfig;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::types::{AssetStatistics, PortfolioReport, PriceSeries};

/// Runs a complete two-asset analysis under one configuration.
///
/// The engine holds no per-request state; a single instance can serve any
/// number of concurrent analyses.
#[derive(Debug, Clone, Default)]
pub struct PortfolioEngine {
    config: EngineConfig,
}

impl PortfolioEngine {
    /// Creates an engine, validating the configuration.
    pub fn new(config: EngineConfig) -> AnalyticsResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Derives annualized statistics from two price histories.
    pub fn derive(
        &self,
        first: &PriceSeries,
        second: &PriceSeries,
    ) -> AnalyticsResult<AssetStatistics> {
        derive_statistics(first, second, &self.config)
    }

    /// Lazy frontier sample for `statistics`.
    #[must_use]
    pub fn frontier(&self, statistics: &AssetStatistics) -> FrontierSampler {
        FrontierSampler::new(
            statistics.returns,
            statistics.covariance,
            self.config.frontier_steps,
        )
    }

    /// Minimum-variance portfolio, market portfolio, both allocation
    /// scenarios and the frontier sample.
    pub fn analyze(
        &self,
        statistics: &AssetStatistics,
        risk_free_rate: f64,
    ) -> AnalyticsResult<PortfolioReport> {
        if !risk_free_rate.is_finite() {
            return Err(AnalyticsError::validation(format!(
                "risk-free rate {} is not a finite number",
                risk_free_rate
            )));
        }

        let tolerance = self.config.degeneracy_tolerance;
        let returns = &statistics.returns;
        let covariance = &statistics.covariance;

        let min_variance = min_variance_portfolio(returns, covariance, tolerance)?;
        let market = market_portfolio(returns, covariance, risk_free_rate, &self.config)?;
        let half = half_market(&market.stats, risk_free_rate, tolerance)?;
        let leveraged = leveraged_market(&market.stats, risk_free_rate, tolerance)?;
        let frontier = frontier_points(returns, covariance, self.config.frontier_steps)?;

        log::debug!(
            "analysis complete: mvp wA = {:.4}, market wA = {:.4}, sharpe = {:.4}",
            min_variance.weights.a,
            market.weights.a,
            market.sharpe
        );

        Ok(PortfolioReport {
            statistics: *statistics,
            risk_free_rate,
            min_variance,
            market,
            half_market: half,
            leveraged_market: leveraged,
            frontier,
        })
    }

    /// Derives statistics from prices and runs [`analyze`](Self::analyze).
    pub fn analyze_prices(
        &self,
        first: &PriceSeries,
        second: &PriceSeries,
        risk_free_rate: f64,
    ) -> AnalyticsResult<PortfolioReport> {
        let statistics = self.derive(first, second)?;
        self.analyze(&statistics, risk_free_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CovarianceMatrix, ReturnVector};
    use crate::ErrorKind;

    #[test]
    fn test_rejects_invalid_config() {
        let config = EngineConfig::new().with_frontier_steps(0);
        assert!(PortfolioEngine::new(config).is_err());
    }

    #[test]
    fn test_rejects_nan_rate() {
        let stats = AssetStatistics::new(
            ReturnVector::new(0.1, 0.2),
            CovarianceMatrix::new(0.04, 0.09, 0.0).unwrap(),
            100,
        );
        let err = PortfolioEngine::default().analyze(&stats, f64::NAN).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_frontier_uses_configured_steps() {
        let engine = PortfolioEngine::new(EngineConfig::new().with_frontier_steps(4)).unwrap();
        let stats = AssetStatistics::new(
            ReturnVector::new(0.1, 0.2),
            CovarianceMatrix::new(0.04, 0.09, 0.0).unwrap(),
            100,
        );
        assert_eq!(engine.frontier(&stats).len(), 5);
    }
}
