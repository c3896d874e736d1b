//! Efficient frontier sampling.

use std::iter::FusedIterator;

use crate::analytics::stats::portfolio_stats;
use crate::error::AnalyticsResult;
use crate::types::{CovarianceMatrix, FrontierPoint, PortfolioWeights, ReturnVector};

/// Lazy sample of the two-asset frontier.
///
/// Yields `steps + 1` points with `wA = k / steps` for `k = 0..=steps`, in
/// increasing `wA`. Cloning restarts from the clone's current position, so a
/// fresh sampler can be iterated any number of times.
#[derive(Debug, Clone)]
pub struct FrontierSampler {
    returns: ReturnVector,
    covariance: CovarianceMatrix,
    steps: usize,
    next: usize,
}

impl FrontierSampler {
    /// Creates a sampler with `steps` intervals (at least one).
    #[must_use]
    pub fn new(returns: ReturnVector, covariance: CovarianceMatrix, steps: usize) -> Self {
        Self {
            returns,
            covariance,
            steps: steps.max(1),
            next: 0,
        }
    }

    fn point(&self, k: usize) -> AnalyticsResult<FrontierPoint> {
        let weights = if k == self.steps {
            PortfolioWeights::from_first(1.0)
        } else {
            PortfolioWeights::from_first(k as f64 / self.steps as f64)
        };
        let stats = portfolio_stats(&weights, &self.returns, &self.covariance)?;
        Ok(FrontierPoint {
            weights,
            expected_return: stats.mean,
            volatility: stats.stdev,
        })
    }
}

impl Iterator for FrontierSampler {
    type Item = AnalyticsResult<FrontierPoint>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.steps {
            return None;
        }
        let k = self.next;
        self.next += 1;
        Some(self.point(k))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.steps + 1).saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FrontierSampler {}

impl FusedIterator for FrontierSampler {}

/// Collects the full frontier sample.
pub fn frontier_points(
    returns: &ReturnVector,
    covariance: &CovarianceMatrix,
    steps: usize,
) -> AnalyticsResult<Vec<FrontierPoint>> {
    FrontierSampler::new(*returns, *covariance, steps).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sampler() -> FrontierSampler {
        FrontierSampler::new(
            ReturnVector::new(0.10, 0.20),
            CovarianceMatrix::new(0.04, 0.09, 0.01).unwrap(),
            10,
        )
    }

    #[test]
    fn test_eleven_points_in_order() {
        let points: Vec<_> = sampler().collect::<AnalyticsResult<_>>().unwrap();
        assert_eq!(points.len(), 11);
        for (k, point) in points.iter().enumerate() {
            assert_relative_eq!(point.weights.a, k as f64 / 10.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_endpoints_are_single_assets() {
        let points = frontier_points(
            &ReturnVector::new(0.10, 0.20),
            &CovarianceMatrix::new(0.04, 0.09, 0.01).unwrap(),
            10,
        )
        .unwrap();

        let first = points.first().unwrap();
        assert_eq!(first.weights.a, 0.0);
        assert_relative_eq!(first.expected_return, 0.20, epsilon = 1e-15);
        assert_relative_eq!(first.volatility, 0.3, epsilon = 1e-15);

        let last = points.last().unwrap();
        assert_eq!(last.weights.a, 1.0);
        assert_relative_eq!(last.expected_return, 0.10, epsilon = 1e-15);
        assert_relative_eq!(last.volatility, 0.2, epsilon = 1e-15);
    }

    #[test]
    fn test_restartable_and_exact_size() {
        let sampler = sampler();
        assert_eq!(sampler.len(), 11);

        let mut partial = sampler.clone();
        partial.next();
        partial.next();
        assert_eq!(partial.len(), 9);

        let again: Vec<_> = sampler.clone().map(|p| p.unwrap().weights.a).collect();
        let once_more: Vec<_> = sampler.map(|p| p.unwrap().weights.a).collect();
        assert_eq!(again, once_more);

        let mut done = partial.skip(9);
        assert!(done.next().is_none());
        assert!(done.next().is_none());
    }
}
