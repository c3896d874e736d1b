//! Capital allocation line scenarios.
//!
//! Mixing the market portfolio `(rm, σm)` with a risk-free asset `rf` moves
//! along a straight line in the mean/volatility plane:
//!
//! ```text
//! σ = (mean - rf) · σm / (rm - rf)
//! ```

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::types::{PortfolioStats, ScenarioResult};

/// Market weight of the "50/50" scenario.
pub const HALF_MARKET_WEIGHT: f64 = 0.5;

/// Market weight of the "150% market / -50% risk-free" scenario.
pub const LEVERAGED_MARKET_WEIGHT: f64 = 1.5;

/// Volatility of a capital allocation line portfolio with expected `mean`.
///
/// # Errors
///
/// `DegenerateInput` when `|rm - rf| <= tolerance`: the market portfolio
/// earns no excess return and the line is undefined.
pub fn stdev_with_risk_free(
    risk_free_rate: f64,
    mean: f64,
    market_mean: f64,
    market_stdev: f64,
    tolerance: f64,
) -> AnalyticsResult<f64> {
    let excess = market_mean - risk_free_rate;
    if excess.abs() <= tolerance {
        return Err(AnalyticsError::degenerate(
            "market portfolio earns no excess return over the risk-free rate",
        ));
    }
    Ok((mean - risk_free_rate) * market_stdev / excess)
}

/// Portfolio holding `market_weight` in the market and the rest risk-free.
pub fn capital_allocation(
    market: &PortfolioStats,
    risk_free_rate: f64,
    market_weight: f64,
    tolerance: f64,
) -> AnalyticsResult<ScenarioResult> {
    if !market_weight.is_finite() {
        return Err(AnalyticsError::validation("market weight must be finite"));
    }
    let mean = market_weight * market.mean + (1.0 - market_weight) * risk_free_rate;
    let stdev = stdev_with_risk_free(risk_free_rate, mean, market.mean, market.stdev, tolerance)?;
    Ok(ScenarioResult {
        market_weight,
        mean,
        stdev,
    })
}

/// Half in the market portfolio, half risk-free.
pub fn half_market(
    market: &PortfolioStats,
    risk_free_rate: f64,
    tolerance: f64,
) -> AnalyticsResult<ScenarioResult> {
    capital_allocation(market, risk_free_rate, HALF_MARKET_WEIGHT, tolerance)
}

/// 150% in the market portfolio, financed by borrowing 50% at the risk-free rate.
pub fn leveraged_market(
    market: &PortfolioStats,
    risk_free_rate: f64,
    tolerance: f64,
) -> AnalyticsResult<ScenarioResult> {
    capital_allocation(market, risk_free_rate, LEVERAGED_MARKET_WEIGHT, tolerance)
}
