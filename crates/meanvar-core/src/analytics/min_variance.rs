//! Closed-form minimum-variance portfolio.
//!
//! For two assets with variances `vA`, `vB` and covariance `c`, the weights
//! minimizing variance subject to `wA + wB = 1` are
//!
//! ```text
//! wB = (vA - c) / (vA + vB - 2c),   wA = 1 - wB
//! ```
//!
//! The denominator is the variance of `A - B`; it vanishes when the assets
//! are perfectly correlated with equal variance.

use crate::analytics::stats::portfolio_stats;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::types::{CovarianceMatrix, MinVariancePortfolio, PortfolioWeights, ReturnVector};

/// Minimum-variance weights.
///
/// # Errors
///
/// `DegenerateInput` if `|vA + vB - 2c| <= tolerance`; `DataIntegrity` if the
/// denominator is negative (covariance matrix not positive semi-definite).
pub fn min_variance_weights(
    covariance: &CovarianceMatrix,
    tolerance: f64,
) -> AnalyticsResult<PortfolioWeights> {
    let (va, vb, c) = (
        covariance.var_a(),
        covariance.var_b(),
        covariance.covariance(),
    );
    let denominator = va + vb - 2.0 * c;

    if denominator.abs() <= tolerance {
        log::warn!(
            "minimum-variance denominator {:.3e} is zero: assets are collinear",
            denominator
        );
        return Err(AnalyticsError::degenerate(
            "assets are perfectly correlated with equal variance",
        ));
    }
    if denominator < 0.0 {
        return Err(AnalyticsError::integrity(format!(
            "variance of the spread is negative ({:.3e})",
            denominator
        )));
    }

    let wb = (va - c) / denominator;
    Ok(PortfolioWeights::from_first(1.0 - wb))
}

/// Minimum-variance portfolio with its mean and volatility.
pub fn min_variance_portfolio(
    returns: &ReturnVector,
    covariance: &CovarianceMatrix,
    tolerance: f64,
) -> AnalyticsResult<MinVariancePortfolio> {
    let weights = min_variance_weights(covariance, tolerance)?;
    let stats = portfolio_stats(&weights, returns, covariance)?;
    Ok(MinVariancePortfolio { weights, stats })
}
