//! Request and response bodies.
//!
//! Response figures are percentages (value × 100) rounded to two decimals;
//! the Sharpe ratio is a plain ratio rounded to two decimals.

use meanvar_core::{FrontierPoint, PortfolioReport, PortfolioWeights, ScenarioResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

/// Risk-free rate given either as a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RateInput {
    /// `0.02`
    Number(f64),
    /// `"0.02"`
    Text(String),
}

impl RateInput {
    /// Parsed, finite rate.
    pub fn value(&self) -> ApiResult<f64> {
        let rate = match self {
            RateInput::Number(n) => *n,
            RateInput::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| ApiError::BadRequest(format!("riskFreeRate '{}' is not a number", s)))?,
        };
        if !rate.is_finite() {
            return Err(ApiError::BadRequest("riskFreeRate must be finite".to_string()));
        }
        Ok(rate)
    }
}

/// `POST /minVarPortfolio` request.
#[derive(Debug, Clone, Deserialize)]
pub struct MinVarRequest {
    /// First ticker.
    pub stock1: String,
    /// Second ticker.
    pub stock2: String,
    /// Annual risk-free rate as a decimal fraction.
    #[serde(rename = "riskFreeRate")]
    pub risk_free_rate: RateInput,
}

/// Converts a fraction to a percentage rounded to two decimals.
pub fn percent(value: f64) -> ApiResult<Decimal> {
    rounded(value * 100.0)
}

/// Rounds to two decimals.
pub fn rounded(value: f64) -> ApiResult<Decimal> {
    Decimal::try_from(value)
        .map(|d| d.round_dp(2))
        .map_err(|_| ApiError::BadRequest(format!("value {} is not representable", value)))
}

/// Weighted portfolio figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioDto {
    /// Weight of the first stock, percent.
    pub fs: Decimal,
    /// Weight of the second stock, percent.
    pub ss: Decimal,
    /// Expected annual return, percent.
    pub mean: Decimal,
    /// Annual standard deviation, percent.
    pub stdev: Decimal,
}

impl PortfolioDto {
    fn new(weights: &PortfolioWeights, mean: f64, stdev: f64) -> ApiResult<Self> {
        Ok(Self {
            fs: percent(weights.a)?,
            ss: percent(weights.b)?,
            mean: percent(mean)?,
            stdev: percent(stdev)?,
        })
    }
}

/// Market portfolio figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketDto {
    /// Weight of the first stock, percent.
    pub fs: Decimal,
    /// Weight of the second stock, percent.
    pub ss: Decimal,
    /// Expected annual return, percent.
    pub mean: Decimal,
    /// Annual standard deviation, percent.
    pub stdev: Decimal,
    /// Sharpe ratio.
    pub sharpe: Decimal,
}

/// Market and risk-free mix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioDto {
    /// Expected annual return, percent.
    pub mean: Decimal,
    /// Annual standard deviation, percent.
    pub stdev: Decimal,
}

impl TryFrom<&ScenarioResult> for ScenarioDto {
    type Error = ApiError;

    fn try_from(scenario: &ScenarioResult) -> ApiResult<Self> {
        Ok(Self {
            mean: percent(scenario.mean)?,
            stdev: percent(scenario.stdev)?,
        })
    }
}

impl TryFrom<&FrontierPoint> for PortfolioDto {
    type Error = ApiError;

    fn try_from(point: &FrontierPoint) -> ApiResult<Self> {
        Self::new(&point.weights, point.expected_return, point.volatility)
    }
}

/// `POST /minVarPortfolio` response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinVarResponse {
    /// Always `"success"`.
    pub msg: &'static str,
    /// Minimum-variance portfolio.
    pub mvp: PortfolioDto,
    /// Market portfolio.
    pub case1: MarketDto,
    /// 50% market, 50% risk-free.
    pub case2: ScenarioDto,
    /// 150% market, -50% risk-free.
    pub case3: ScenarioDto,
    /// Frontier sample by increasing weight in the first stock.
    pub frontier: Vec<PortfolioDto>,
}

impl TryFrom<&PortfolioReport> for MinVarResponse {
    type Error = ApiError;

    fn try_from(report: &PortfolioReport) -> ApiResult<Self> {
        let mvp = &report.min_variance;
        let market = &report.market;

        Ok(Self {
            msg: "success",
            mvp: PortfolioDto::new(&mvp.weights, mvp.stats.mean, mvp.stats.stdev)?,
            case1: MarketDto {
                fs: percent(market.weights.a)?,
                ss: percent(market.weights.b)?,
                mean: percent(market.stats.mean)?,
                stdev: percent(market.stats.stdev)?,
                sharpe: rounded(market.sharpe)?,
            },
            case2: ScenarioDto::try_from(&report.half_market)?,
            case3: ScenarioDto::try_from(&report.leveraged_market)?,
            frontier: report
                .frontier
                .iter()
                .map(PortfolioDto::try_from)
                .collect::<ApiResult<_>>()?,
        })
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"ok"`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Price source name.
    pub source: String,
}
