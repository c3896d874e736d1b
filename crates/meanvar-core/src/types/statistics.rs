//! Annualized two-asset return statistics.

use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Annualized expected returns of asset A and asset B.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnVector {
    /// Expected return of asset A.
    pub a: f64,
    /// Expected return of asset B.
    pub b: f64,
}

impl ReturnVector {
    /// Creates a return vector.
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }
}

/// Symmetric 2×2 matrix of annualized return covariances.
///
/// Variances are finite and non-negative; the off-diagonal is stored once so
/// symmetry holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[[f64; 2]; 2]", into = "[[f64; 2]; 2]")]
pub struct CovarianceMatrix {
    var_a: f64,
    var_b: f64,
    cov: f64,
}

impl CovarianceMatrix {
    /// Creates a covariance matrix from the two variances and the covariance.
    pub fn new(var_a: f64, var_b: f64, cov: f64) -> AnalyticsResult<Self> {
        if !var_a.is_finite() || !var_b.is_finite() || !cov.is_finite() {
            return Err(AnalyticsError::integrity("covariance entries must be finite"));
        }
        if var_a < 0.0 || var_b < 0.0 {
            return Err(AnalyticsError::integrity(format!(
                "negative variance ({}, {})",
                var_a, var_b
            )));
        }
        Ok(Self { var_a, var_b, cov })
    }

    /// Creates a covariance matrix from rows, rejecting asymmetric input.
    pub fn from_rows(rows: [[f64; 2]; 2]) -> AnalyticsResult<Self> {
        let (upper, lower) = (rows[0][1], rows[1][0]);
        let scale = upper.abs().max(lower.abs()).max(1.0);
        if (upper - lower).abs() > 1e-12 * scale {
            return Err(AnalyticsError::integrity(format!(
                "covariance matrix is not symmetric ({} vs {})",
                upper, lower
            )));
        }
        Self::new(rows[0][0], rows[1][1], upper)
    }

    /// Variance of asset A.
    #[must_use]
    pub fn var_a(&self) -> f64 {
        self.var_a
    }

    /// Variance of asset B.
    #[must_use]
    pub fn var_b(&self) -> f64 {
        self.var_b
    }

    /// Covariance between A and B.
    #[must_use]
    pub fn covariance(&self) -> f64 {
        self.cov
    }

    /// Standard deviation of asset A.
    #[must_use]
    pub fn std_a(&self) -> f64 {
        self.var_a.sqrt()
    }

    /// Standard deviation of asset B.
    #[must_use]
    pub fn std_b(&self) -> f64 {
        self.var_b.sqrt()
    }

    /// Correlation between A and B, if both variances are positive.
    #[must_use]
    pub fn correlation(&self) -> Option<f64> {
        let denom = self.std_a() * self.std_b();
        (denom > 0.0).then(|| self.cov / denom)
    }

    /// Returns true if `cov² <= var_a * var_b` (up to rounding).
    #[must_use]
    pub fn is_positive_semidefinite(&self) -> bool {
        let det = self.var_a * self.var_b - self.cov * self.cov;
        det >= -1e-14 * (self.var_a * self.var_b).max(1e-300)
    }

    /// Row-major matrix.
    #[must_use]
    pub fn to_rows(&self) -> [[f64; 2]; 2] {
        [[self.var_a, self.cov], [self.cov, self.var_b]]
    }

    /// Scales every entry by `factor` (annualization).
    pub fn scaled(&self, factor: f64) -> AnalyticsResult<Self> {
        Self::new(self.var_a * factor, self.var_b * factor, self.cov * factor)
    }
}

impl TryFrom<[[f64; 2]; 2]> for CovarianceMatrix {
    type Error = AnalyticsError;

    fn try_from(rows: [[f64; 2]; 2]) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<CovarianceMatrix> for [[f64; 2]; 2] {
    fn from(matrix: CovarianceMatrix) -> Self {
        matrix.to_rows()
    }
}

/// Annualized statistics of an asset pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssetStatistics {
    /// Annualized expected returns.
    pub returns: ReturnVector,
    /// Annualized covariance matrix.
    pub covariance: CovarianceMatrix,
    /// Number of periodic return observations used.
    pub observations: usize,
}

impl AssetStatistics {
    /// Creates a statistics bundle.
    #[must_use]
    pub fn new(returns: ReturnVector, covariance: CovarianceMatrix, observations: usize) -> Self {
        Self {
            returns,
            covariance,
            observations,
        }
    }
}
