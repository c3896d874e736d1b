//! # Meanvar Core
//!
//! Classical mean-variance analytics for a pair of assets.
//!
//! Given two closing-price histories (or pre-computed annualized statistics),
//! the engine computes:
//!
//! - **Minimum-variance portfolio**: closed-form weights, mean and volatility
//! - **Market portfolio**: the long-only maximum-Sharpe mix of the two assets
//! - **Capital allocation scenarios**: 50/50 and 150/-50 mixes of the market
//!   portfolio with the risk-free asset
//! - **Efficient frontier**: 11 sampled `(return, volatility)` points
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: All calculations are stateless with explicit inputs
//! - **Explicit failures**: Degenerate inputs are rejected, never turned into NaN
//! - **Config-driven**: Annualization, bounds and solver settings live in [`EngineConfig`]
//!
//! ## Quick Start
//!
//! ```rust
//! use meanvar_core::prelude::*;
//!
//! let returns = ReturnVector::new(0.10, 0.20);
//! let covariance = CovarianceMatrix::new(0.04, 0.09, 0.0).unwrap();
//! let statistics = AssetStatistics::new(returns, covariance, 250);
//!
//! let engine = PortfolioEngine::default();
//! let report = engine.analyze(&statistics, 0.02).unwrap();
//!
//! assert!((report.min_variance.weights.a - 0.6923).abs() < 1e-4);
//! assert_eq!(report.frontier.len(), 11);
//! ```
//!
//! ## Module Overview
//!
//! - [`analytics`] - Derivation, portfolio statistics, optimizers and scenarios
//! - [`config`] - Engine and history window configuration
//! - [`engine`] - [`PortfolioEngine`] orchestrating a full analysis
//! - [`types`] - Price series, statistics and result types

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod analytics;
pub mod config;
pub mod engine;
pub mod error;
pub mod types;

pub use error::{AnalyticsError, AnalyticsResult, ErrorKind};

pub use config::{EngineConfig, HistoryWindow, MarketMethod, SamplingInterval, WeightBounds};
pub use engine::PortfolioEngine;
pub use types::{
    AssetStatistics, CovarianceMatrix, FrontierPoint, MarketPortfolio, MinVariancePortfolio,
    PortfolioReport, PortfolioStats, PortfolioWeights, PricePoint, PriceSeries, ReturnVector,
    ScenarioResult,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analytics::{
        capital_allocation, derive_statistics, frontier_points, half_market, leveraged_market,
        market_portfolio, min_variance_portfolio, min_variance_weights, portfolio_mean,
        portfolio_stats, portfolio_std, sharpe_ratio, stdev_with_risk_free, FrontierSampler,
    };
    pub use crate::config::{
        EngineConfig, HistoryWindow, MarketMethod, SamplingInterval, SolverSettings, WeightBounds,
    };
    pub use crate::engine::PortfolioEngine;
    pub use crate::error::{AnalyticsError, AnalyticsResult, ErrorKind};
    pub use crate::types::*;
}
