//! # Meanvar Math
//!
//! Numerical utilities for the Meanvar portfolio analytics library.
//!
//! This crate provides:
//!
//! - **Optimization**: Bounded scalar minimization (Brent's method)
//! - **Statistics**: Sample means, covariances and percentage changes
//!
//! ## Design Philosophy
//!
//! - **Small surface**: Only what two-asset mean-variance analytics needs
//! - **Numerical Stability**: Explicit errors instead of NaN propagation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod optimization;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::optimization::{
        minimize_bounded, OptimizationConfig, OptimizationResult,
    };
    pub use crate::statistics::{mean, pct_change, sample_covariance};
}

pub use error::{MathError, MathResult};
