//! Portfolio mean, volatility and Sharpe ratio.

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::types::{CovarianceMatrix, PortfolioStats, PortfolioWeights, ReturnVector};

/// Negative variance tolerated as rounding noise before it is rejected.
const RADICAND_TOLERANCE: f64 = 1e-14;

/// Expected return `wA*rA + wB*rB`.
#[must_use]
pub fn portfolio_mean(weights: &PortfolioWeights, returns: &ReturnVector) -> f64 {
    weights.a * returns.a + weights.b * returns.b
}

/// Variance `wA²vA + wB²vB + 2wAwB·cov` (not clamped).
#[must_use]
pub fn portfolio_variance(weights: &PortfolioWeights, covariance: &CovarianceMatrix) -> f64 {
    let (wa, wb) = (weights.a, weights.b);
    wa * wa * covariance.var_a()
        + wb * wb * covariance.var_b()
        + 2.0 * wa * wb * covariance.covariance()
}

/// Standard deviation of the portfolio return.
///
/// A negative variance can only come from a covariance matrix that is not
/// positive semi-definite and is reported as a data integrity error.
pub fn portfolio_std(
    weights: &PortfolioWeights,
    covariance: &CovarianceMatrix,
) -> AnalyticsResult<f64> {
    let variance = portfolio_variance(weights, covariance);
    if !variance.is_finite() {
        return Err(AnalyticsError::integrity("portfolio variance is not finite"));
    }
    if variance < -RADICAND_TOLERANCE {
        return Err(AnalyticsError::integrity(format!(
            "negative portfolio variance {:.3e} at weights ({}, {})",
            variance, weights.a, weights.b
        )));
    }
    Ok(variance.max(0.0).sqrt())
}

/// Sharpe ratio `(mean - rf) / stdev`.
pub fn sharpe_ratio(mean: f64, stdev: f64, risk_free_rate: f64) -> AnalyticsResult<f64> {
    if !(stdev > 0.0) {
        return Err(AnalyticsError::degenerate(format!(
            "Sharpe ratio undefined for volatility {}",
            stdev
        )));
    }
    Ok((mean - risk_free_rate) / stdev)
}

/// Mean and standard deviation at `weights`.
pub fn portfolio_stats(
    weights: &PortfolioWeights,
    returns: &ReturnVector,
    covariance: &CovarianceMatrix,
) -> AnalyticsResult<PortfolioStats> {
    Ok(PortfolioStats {
        mean: portfolio_mean(weights, returns),
        stdev: portfolio_std(weights, covariance)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_and_std() {
        let returns = ReturnVector::new(0.10, 0.20);
        let cov = CovarianceMatrix::new(0.04, 0.09, 0.0).unwrap();
        let w = PortfolioWeights::from_first(0.5);

        let stats = portfolio_stats(&w, &returns, &cov).unwrap();
        assert_relative_eq!(stats.mean, 0.15, epsilon = 1e-12);
        assert_relative_eq!(stats.stdev, (0.25_f64 * 0.04 + 0.25 * 0.09).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_single_asset_std_is_own_volatility() {
        let cov = CovarianceMatrix::new(0.04, 0.09, 0.01).unwrap();
        let std_a = portfolio_std(&PortfolioWeights::from_first(1.0), &cov).unwrap();
        let std_b = portfolio_std(&PortfolioWeights::from_first(0.0), &cov).unwrap();
        assert_relative_eq!(std_a, 0.2, epsilon = 1e-12);
        assert_relative_eq!(std_b, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_radicand_rejected() {
        // |cov| > sqrt(vA vB): not a valid covariance matrix
        let cov = CovarianceMatrix::new(0.01, 0.01, -0.05).unwrap();
        let err = portfolio_std(&PortfolioWeights::from_first(0.5), &cov).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataIntegrity);
    }

    #[test]
    fn test_rounding_noise_clamps_to_zero() {
        // Perfectly anti-correlated pair, nudged just past -1 correlation
        let cov = CovarianceMatrix::new(1e-4, 1e-4, -1e-4 - 4e-16).unwrap();
        let w = PortfolioWeights::from_first(0.5);
        let variance = portfolio_variance(&w, &cov);
        assert!(variance < 0.0 && variance > -RADICAND_TOLERANCE);

        assert_eq!(portfolio_std(&w, &cov).unwrap(), 0.0);
    }

    #[test]
    fn test_radicand_just_below_tolerance_rejected() {
        let cov = CovarianceMatrix::new(1e-4, 1e-4, -1e-4 - 4e-14).unwrap();
        let w = PortfolioWeights::from_first(0.5);
        assert!(portfolio_variance(&w, &cov) < -RADICAND_TOLERANCE);

        let err = portfolio_std(&w, &cov).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataIntegrity);
    }

    #[test]
    fn test_sharpe() {
        assert_relative_eq!(sharpe_ratio(0.12, 0.2, 0.02).unwrap(), 0.5, epsilon = 1e-12);
        let err = sharpe_ratio(0.12, 0.0, 0.02).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DegenerateInput);
    }
}
