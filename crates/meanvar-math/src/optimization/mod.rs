//! Optimization algorithms.
//!
//! This module provides the scalar minimizer used for the maximum-Sharpe
//! portfolio search:
//!
//! - [`minimize_bounded`]: Brent's method on a closed interval, combining
//!   golden-section steps with parabolic interpolation.

mod brent;

pub use brent::minimize_bounded;

/// Default absolute tolerance on the minimizer location.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations.
pub const DEFAULT_MAX_ITERATIONS: u32 = 500;

/// Configuration for optimization algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizationConfig {
    /// Absolute tolerance on the minimizer location.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl OptimizationConfig {
    /// Creates a new optimization configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a scalar minimization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizationResult {
    /// Location of the minimum.
    pub minimizer: f64,
    /// Objective value at the minimizer.
    pub objective_value: f64,
    /// Number of iterations used.
    pub iterations: u32,
}
