//! Market (maximum-Sharpe) portfolio.
//!
//! With `wB = 1 - wA` the feasible set is the segment `wA ∈ [lo, hi]`, and
//! the Sharpe ratio along it is
//!
//! ```text
//! S(w) = (a + b·w) / sqrt(α·w² + β·w + γ)
//! a = rB - rf,  b = rA - rB
//! α = vA + vB - 2c,  β = 2(c - vB),  γ = vB
//! ```
//!
//! `S'(w) = 0` reduces to a linear equation, so `S` has at most one
//! stationary point on the segment. [`MarketMethod::Brent`] searches the
//! negative Sharpe ratio with a bounded Brent minimizer; [`MarketMethod::ClosedForm`]
//! evaluates the stationary point directly. Both finish by comparing against
//! the segment endpoints so that corner solutions land exactly on the bounds.

use meanvar_math::optimization::{minimize_bounded, OptimizationConfig};

use crate::analytics::stats::{portfolio_stats, sharpe_ratio};
use crate::config::{EngineConfig, MarketMethod};
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::types::{CovarianceMatrix, MarketPortfolio, PortfolioWeights, ReturnVector};

/// Allowed violation of the weight bounds and budget constraint.
const FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// Sharpe ratio along the feasible segment, parameterized by `wA`.
#[derive(Debug, Clone, Copy)]
struct SharpeLine {
    a: f64,
    b: f64,
    alpha: f64,
    beta: f64,
    gamma: f64,
}

impl SharpeLine {
    fn new(returns: &ReturnVector, covariance: &CovarianceMatrix, risk_free_rate: f64) -> Self {
        let (va, vb, c) = (
            covariance.var_a(),
            covariance.var_b(),
            covariance.covariance(),
        );
        Self {
            a: returns.b - risk_free_rate,
            b: returns.a - returns.b,
            alpha: va + vb - 2.0 * c,
            beta: 2.0 * (c - vb),
            gamma: vb,
        }
    }

    fn variance(&self, w: f64) -> f64 {
        (self.alpha * w + self.beta) * w + self.gamma
    }

    fn sharpe(&self, w: f64) -> f64 {
        (self.a + self.b * w) / self.variance(w).sqrt()
    }

    /// Smallest variance on `[lo, hi]`.
    fn min_variance_on(&self, lo: f64, hi: f64) -> f64 {
        let mut candidates = vec![self.variance(lo), self.variance(hi)];
        if self.alpha > 0.0 {
            let vertex = -self.beta / (2.0 * self.alpha);
            if (lo..=hi).contains(&vertex) {
                candidates.push(self.variance(vertex));
            }
        }
        candidates.into_iter().fold(f64::INFINITY, f64::min)
    }

    /// The unique stationary point of the Sharpe ratio, if any.
    fn stationary_point(&self) -> Option<f64> {
        let slope = 0.5 * self.b * self.beta - self.a * self.alpha;
        let intercept = self.b * self.gamma - 0.5 * self.a * self.beta;
        let w = -intercept / slope;
        (slope != 0.0 && w.is_finite()).then_some(w)
    }

    /// Candidate with the highest Sharpe ratio.
    fn best_of(&self, candidates: &[f64]) -> f64 {
        candidates
            .iter()
            .copied()
            .filter(|w| w.is_finite())
            .fold((f64::NAN, f64::NEG_INFINITY), |(best_w, best_s), w| {
                let s = self.sharpe(w);
                if s > best_s {
                    (w, s)
                } else {
                    (best_w, best_s)
                }
            })
            .0
    }
}

/// Long-only maximum-Sharpe portfolio.
///
/// # Errors
///
/// - `Validation` if `risk_free_rate` is not finite or the bounds are infeasible.
/// - `OptimizationFailure` if the portfolio variance reaches zero on the
///   feasible segment, the solver does not converge, or the result violates
///   the constraints.
/// - `DataIntegrity` if the variance is negative somewhere on the segment.
pub fn market_portfolio(
    returns: &ReturnVector,
    covariance: &CovarianceMatrix,
    risk_free_rate: f64,
    config: &EngineConfig,
) -> AnalyticsResult<MarketPortfolio> {
    if !risk_free_rate.is_finite() {
        return Err(AnalyticsError::validation("risk-free rate must be finite"));
    }

    let (lo, hi) = config.weight_bounds.first_asset_range();
    if !(lo <= hi) {
        return Err(AnalyticsError::validation("weight bounds are infeasible"));
    }

    let line = SharpeLine::new(returns, covariance, risk_free_rate);

    let min_var = line.min_variance_on(lo, hi);
    if min_var < -config.degeneracy_tolerance {
        return Err(AnalyticsError::integrity(format!(
            "portfolio variance {:.3e} is negative on the feasible segment",
            min_var
        )));
    }
    if min_var <= config.degeneracy_tolerance {
        return Err(AnalyticsError::optimization(
            "portfolio volatility reaches zero on the feasible segment",
        ));
    }

    let w = match config.market_method {
        MarketMethod::Brent => {
            let solver: OptimizationConfig = config.solver.into();
            let result = minimize_bounded(
                |w| -line.sharpe(w),
                lo,
                hi,
                Some(config.initial_weight),
                &solver,
            )?;
            log::debug!(
                "market portfolio search converged in {} iterations at wA = {:.6}",
                result.iterations,
                result.minimizer
            );
            line.best_of(&[result.minimizer, lo, hi])
        }
        MarketMethod::ClosedForm => {
            let mut candidates = vec![lo, hi];
            if let Some(w) = line.stationary_point().filter(|w| (lo..=hi).contains(w)) {
                candidates.push(w);
            }
            line.best_of(&candidates)
        }
    };

    let weights = PortfolioWeights::from_first(w);
    let bounds = config.weight_bounds;
    if !w.is_finite() || !weights.within(bounds.lower, bounds.upper, FEASIBILITY_TOLERANCE) {
        return Err(AnalyticsError::optimization(format!(
            "infeasible market weights ({}, {})",
            weights.a, weights.b
        )));
    }

    let stats = portfolio_stats(&weights, returns, covariance)?;
    let sharpe = sharpe_ratio(stats.mean, stats.stdev, risk_free_rate)?;

    Ok(MarketPortfolio {
        weights,
        stats,
        sharpe,
    })
}
