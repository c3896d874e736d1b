//! Error types for portfolio analytics.
//!
//! Failures fall into a small taxonomy so callers can log or test the kind
//! while presenting a single opaque error to end users.

use std::fmt;

use meanvar_math::MathError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Errors that can occur during portfolio analytics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// Price history is empty, unreachable or too short.
    #[error("Data unavailable: {reason}")]
    DataUnavailable {
        /// What was missing.
        reason: String,
    },

    /// A closed-form or scenario formula would divide by zero.
    #[error("Degenerate input: {reason}")]
    DegenerateInput {
        /// Which formula degenerated.
        reason: String,
    },

    /// The market portfolio search failed or produced an infeasible result.
    #[error("Optimization failed: {reason}")]
    OptimizationFailure {
        /// Solver diagnostics.
        reason: String,
    },

    /// Malformed request or configuration.
    #[error("Validation error: {reason}")]
    Validation {
        /// The rejected input.
        reason: String,
    },

    /// Statistics violate an invariant (negative variance, asymmetry).
    #[error("Data integrity error: {reason}")]
    DataIntegrity {
        /// The violated invariant.
        reason: String,
    },
}

/// Coarse error classification, stable across message changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// See [`AnalyticsError::DataUnavailable`].
    DataUnavailable,
    /// See [`AnalyticsError::DegenerateInput`].
    DegenerateInput,
    /// See [`AnalyticsError::OptimizationFailure`].
    OptimizationFailure,
    /// See [`AnalyticsError::Validation`].
    Validation,
    /// See [`AnalyticsError::DataIntegrity`].
    DataIntegrity,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::DataUnavailable => "data_unavailable",
            ErrorKind::DegenerateInput => "degenerate_input",
            ErrorKind::OptimizationFailure => "optimization_failure",
            ErrorKind::Validation => "validation",
            ErrorKind::DataIntegrity => "data_integrity",
        };
        f.write_str(label)
    }
}

impl AnalyticsError {
    /// Creates a data unavailable error.
    #[must_use]
    pub fn data_unavailable(reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            reason: reason.into(),
        }
    }

    /// Creates a degenerate input error.
    #[must_use]
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateInput {
            reason: reason.into(),
        }
    }

    /// Creates an optimization failure.
    #[must_use]
    pub fn optimization(reason: impl Into<String>) -> Self {
        Self::OptimizationFailure {
            reason: reason.into(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Creates a data integrity error.
    #[must_use]
    pub fn integrity(reason: impl Into<String>) -> Self {
        Self::DataIntegrity {
            reason: reason.into(),
        }
    }

    /// Returns the error classification.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalyticsError::DataUnavailable { .. } => ErrorKind::DataUnavailable,
            AnalyticsError::DegenerateInput { .. } => ErrorKind::DegenerateInput,
            AnalyticsError::OptimizationFailure { .. } => ErrorKind::OptimizationFailure,
            AnalyticsError::Validation { .. } => ErrorKind::Validation,
            AnalyticsError::DataIntegrity { .. } => ErrorKind::DataIntegrity,
        }
    }
}

impl From<MathError> for AnalyticsError {
    fn from(err: MathError) -> Self {
        AnalyticsError::optimization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AnalyticsError::degenerate("assets are collinear");
        assert_eq!(err.to_string(), "Degenerate input: assets are collinear");
        assert_eq!(err.kind(), ErrorKind::DegenerateInput);
    }

    #[test]
    fn test_math_error_maps_to_optimization_failure() {
        let err: AnalyticsError = MathError::convergence_failed(500, 1e-3).into();
        assert_eq!(err.kind(), ErrorKind::OptimizationFailure);
        assert!(err.to_string().contains("500 iterations"));
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(ErrorKind::DataUnavailable.to_string(), "data_unavailable");
        assert_eq!(
            AnalyticsError::validation("x").kind().to_string(),
            "validation"
        );
    }
}
