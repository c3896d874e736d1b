//! Portfolio weights and analysis results.

use serde::{Deserialize, Serialize};

use super::AssetStatistics;
use crate::error::{AnalyticsError, AnalyticsResult};

/// Tolerance on `wA + wB = 1`.
const BUDGET_TOLERANCE: f64 = 1e-9;

/// Fully invested weights `(wA, wB)` with `wA + wB = 1`.
///
/// Individual weights may be negative or above one (short positions).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioWeights {
    /// Weight of asset A.
    pub a: f64,
    /// Weight of asset B.
    pub b: f64,
}

impl PortfolioWeights {
    /// Creates weights, rejecting pairs that are not fully invested.
    pub fn new(a: f64, b: f64) -> AnalyticsResult<Self> {
        if !a.is_finite() || !b.is_finite() {
            return Err(AnalyticsError::validation("weights must be finite"));
        }
        if (a + b - 1.0).abs() > BUDGET_TOLERANCE {
            return Err(AnalyticsError::validation(format!(
                "weights {} + {} do not sum to 1",
                a, b
            )));
        }
        Ok(Self { a, b })
    }

    /// Weights with `a` in the first asset and the remainder in the second.
    #[must_use]
    pub fn from_first(a: f64) -> Self {
        Self { a, b: 1.0 - a }
    }

    /// Returns true if both weights lie in `[lower, upper]` (with `tolerance`).
    #[must_use]
    pub fn within(&self, lower: f64, upper: f64, tolerance: f64) -> bool {
        [self.a, self.b]
            .iter()
            .all(|w| *w >= lower - tolerance && *w <= upper + tolerance)
    }
}

/// Mean and standard deviation of a portfolio's return.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioStats {
    /// Expected annual return.
    pub mean: f64,
    /// Annual standard deviation.
    pub stdev: f64,
}

/// Minimum-variance portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinVariancePortfolio {
    /// Closed-form weights.
    pub weights: PortfolioWeights,
    /// Mean and volatility at those weights.
    pub stats: PortfolioStats,
}

/// Long-only maximum-Sharpe portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketPortfolio {
    /// Optimal weights.
    pub weights: PortfolioWeights,
    /// Mean and volatility at those weights.
    pub stats: PortfolioStats,
    /// Sharpe ratio at those weights.
    pub sharpe: f64,
}

/// A mix of the market portfolio and the risk-free asset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Fraction of capital in the market portfolio (1.5 = 50% borrowed).
    pub market_weight: f64,
    /// Expected return of the mix.
    pub mean: f64,
    /// Standard deviation of the mix.
    pub stdev: f64,
}

/// One sample of the efficient frontier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrontierPoint {
    /// Weights of the sample.
    pub weights: PortfolioWeights,
    /// Expected return.
    #[serde(rename = "return")]
    pub expected_return: f64,
    /// Standard deviation.
    pub volatility: f64,
}

/// Full result of one two-asset analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReport {
    /// Annualized inputs.
    pub statistics: AssetStatistics,
    /// Risk-free rate used.
    pub risk_free_rate: f64,
    /// Minimum-variance portfolio.
    pub min_variance: MinVariancePortfolio,
    /// Market (tangency) portfolio.
    pub market: MarketPortfolio,
    /// 50% market, 50% risk-free.
    pub half_market: ScenarioResult,
    /// 150% market, -50% risk-free.
    pub leveraged_market: ScenarioResult,
    /// Efficient frontier sample, by increasing weight in asset A.
    pub frontier: Vec<FrontierPoint>,
}
