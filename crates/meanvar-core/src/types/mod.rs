//! Domain types for mean-variance analytics.
//!
//! - [`PriceSeries`]: Dated closing prices for one ticker
//! - [`ReturnVector`] / [`CovarianceMatrix`]: Annualized two-asset statistics
//! - [`PortfolioWeights`]: A fully invested weight pair
//! - [`PortfolioReport`]: Everything one analysis produces

mod portfolio;
mod prices;
mod statistics;

pub use portfolio::{
    FrontierPoint, MarketPortfolio, MinVariancePortfolio, PortfolioReport, PortfolioStats,
    PortfolioWeights, ScenarioResult,
};
pub use prices::{PricePoint, PriceSeries};
pub use statistics::{AssetStatistics, CovarianceMatrix, ReturnVector};
