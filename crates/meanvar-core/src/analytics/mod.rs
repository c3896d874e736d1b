//! Two-asset mean-variance analytics.
//!
//! - [`returns`]: Price histories to annualized returns and covariance
//! - [`stats`]: Portfolio mean, volatility and Sharpe ratio
//! - [`min_variance`]: Closed-form minimum-variance weights
//! - [`market`]: Long-only maximum-Sharpe portfolio
//! - [`scenarios`]: Capital allocation line mixes
//! - [`frontier`]: Efficient frontier sampling

pub mod frontier;
pub mod market;
pub mod min_variance;
pub mod returns;
pub mod scenarios;
pub mod stats;

pub use frontier::{frontier_points, FrontierSampler};
pub use market::market_portfolio;
pub use min_variance::{min_variance_portfolio, min_variance_weights};
pub use returns::{annualize_return, derive_statistics};
pub use scenarios::{capital_allocation, half_market, leveraged_market, stdev_with_risk_free};
pub use stats::{portfolio_mean, portfolio_stats, portfolio_std, portfolio_variance, sharpe_ratio};
