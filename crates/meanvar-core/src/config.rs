//! Configuration for the analytics engine.
//!
//! Every constant that shapes a result (annualization factor, starting
//! weight, bounds, solver tolerance, history window) is a field here rather
//! than a literal in the formulas.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use meanvar_math::optimization::{OptimizationConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Sampling interval of the price histories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingInterval {
    /// One close per calendar day.
    #[default]
    Daily,
    /// One close per month.
    Monthly,
}

impl SamplingInterval {
    /// Periods per year used for annualization.
    #[must_use]
    pub fn periods_per_year(self) -> u32 {
        match self {
            SamplingInterval::Daily => 365,
            SamplingInterval::Monthly => 12,
        }
    }

    /// Lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SamplingInterval::Daily => "daily",
            SamplingInterval::Monthly => "monthly",
        }
    }
}

impl fmt::Display for SamplingInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SamplingInterval {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "1d" | "d" => Ok(SamplingInterval::Daily),
            "monthly" | "1mo" | "m" => Ok(SamplingInterval::Monthly),
            other => Err(AnalyticsError::validation(format!(
                "unknown sampling interval '{}'",
                other
            ))),
        }
    }
}

/// Method used to locate the market portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketMethod {
    /// Bounded Brent search on the negative Sharpe ratio.
    #[default]
    Brent,
    /// Exact stationary point of the Sharpe ratio plus both endpoints.
    ClosedForm,
}

impl FromStr for MarketMethod {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "brent" => Ok(MarketMethod::Brent),
            "closed-form" | "closed" => Ok(MarketMethod::ClosedForm),
            other => Err(AnalyticsError::validation(format!(
                "unknown market method '{}'",
                other
            ))),
        }
    }
}

/// Per-asset weight bounds for the market portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightBounds {
    /// Minimum weight of either asset.
    pub lower: f64,
    /// Maximum weight of either asset.
    pub upper: f64,
}

impl Default for WeightBounds {
    fn default() -> Self {
        Self {
            lower: 0.0,
            upper: 1.0,
        }
    }
}

impl WeightBounds {
    /// Feasible range of the first asset's weight.
    ///
    /// Both `wA` and `wB = 1 - wA` must lie within the bounds, so the range
    /// is `[max(lower, 1 - upper), min(upper, 1 - lower)]`.
    #[must_use]
    pub fn first_asset_range(&self) -> (f64, f64) {
        (
            self.lower.max(1.0 - self.upper),
            self.upper.min(1.0 - self.lower),
        )
    }
}

/// Solver tolerance and iteration limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Absolute tolerance on the weight.
    pub tolerance: f64,
    /// Maximum iterations.
    pub max_iterations: u32,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl From<SolverSettings> for OptimizationConfig {
    fn from(settings: SolverSettings) -> Self {
        OptimizationConfig::new(settings.tolerance, settings.max_iterations)
    }
}

/// Configuration for the analytics engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Sampling interval of the input prices.
    pub interval: SamplingInterval,

    /// Overrides the interval's periods per year.
    pub periods_per_year: Option<u32>,

    /// Drop periods where both assets are unchanged.
    /// If None, enabled for monthly data only.
    pub drop_flat_periods: Option<bool>,

    /// Starting weight of the first asset for the market portfolio search.
    pub initial_weight: f64,

    /// Long-only bounds for the market portfolio.
    pub weight_bounds: WeightBounds,

    /// Market portfolio method.
    pub market_method: MarketMethod,

    /// Solver settings for [`MarketMethod::Brent`].
    pub solver: SolverSettings,

    /// Number of frontier intervals; the sample has `frontier_steps + 1` points.
    pub frontier_steps: usize,

    /// Denominators with magnitude at or below this are treated as zero.
    pub degeneracy_tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            interval: SamplingInterval::Daily,
            periods_per_year: None,
            drop_flat_periods: None,
            initial_weight: 0.5,
            weight_bounds: WeightBounds::default(),
            market_method: MarketMethod::Brent,
            solver: SolverSettings::default(),
            frontier_steps: 10,
            degeneracy_tolerance: 1e-12,
        }
    }
}

impl EngineConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sampling interval.
    #[must_use]
    pub fn with_interval(mut self, interval: SamplingInterval) -> Self {
        self.interval = interval;
        self
    }

    /// Overrides the annualization factor.
    #[must_use]
    pub fn with_periods_per_year(mut self, periods: u32) -> Self {
        self.periods_per_year = Some(periods);
        self
    }

    /// Sets whether flat periods are dropped.
    #[must_use]
    pub fn with_drop_flat_periods(mut self, drop: bool) -> Self {
        self.drop_flat_periods = Some(drop);
        self
    }

    /// Sets the market portfolio method.
    #[must_use]
    pub fn with_market_method(mut self, method: MarketMethod) -> Self {
        self.market_method = method;
        self
    }

    /// Sets the market portfolio starting weight.
    #[must_use]
    pub fn with_initial_weight(mut self, weight: f64) -> Self {
        self.initial_weight = weight;
        self
    }

    /// Sets the market portfolio weight bounds.
    #[must_use]
    pub fn with_weight_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.weight_bounds = WeightBounds { lower, upper };
        self
    }

    /// Sets the number of frontier intervals.
    #[must_use]
    pub fn with_frontier_steps(mut self, steps: usize) -> Self {
        self.frontier_steps = steps;
        self
    }

    /// Effective periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        self.periods_per_year
            .unwrap_or_else(|| self.interval.periods_per_year())
    }

    /// Whether periods with no change in either asset are dropped.
    #[must_use]
    pub fn drops_flat_periods(&self) -> bool {
        self.drop_flat_periods
            .unwrap_or(self.interval == SamplingInterval::Monthly)
    }

    /// Checks internal consistency.
    pub fn validate(&self) -> AnalyticsResult<()> {
        if self.periods_per_year() == 0 {
            return Err(AnalyticsError::validation("periods per year must be positive"));
        }
        if self.frontier_steps == 0 {
            return Err(AnalyticsError::validation("frontier needs at least one step"));
        }
        if !(self.degeneracy_tolerance >= 0.0) {
            return Err(AnalyticsError::validation(
                "degeneracy tolerance must be non-negative",
            ));
        }
        if !(self.solver.tolerance > 0.0) || self.solver.max_iterations == 0 {
            return Err(AnalyticsError::validation("invalid solver settings"));
        }

        let (lo, hi) = self.weight_bounds.first_asset_range();
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Err(AnalyticsError::validation(format!(
                "weight bounds [{}, {}] admit no fully invested portfolio",
                self.weight_bounds.lower, self.weight_bounds.upper
            )));
        }
        if !(lo..=hi).contains(&self.initial_weight) {
            return Err(AnalyticsError::validation(format!(
                "initial weight {} outside [{}, {}]",
                self.initial_weight, lo, hi
            )));
        }
        Ok(())
    }
}

/// Calendar window of the price histories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryWindow {
    /// First date (inclusive).
    pub start: NaiveDate,
    /// Last date (exclusive).
    pub end: NaiveDate,
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2018, 6, 1).unwrap_or(NaiveDate::MIN),
            end: NaiveDate::from_ymd_opt(2019, 6, 1).unwrap_or(NaiveDate::MIN),
        }
    }
}

impl HistoryWindow {
    /// Creates a window, rejecting empty ranges.
    pub fn new(start: NaiveDate, end: NaiveDate) -> AnalyticsResult<Self> {
        let window = Self { start, end };
        window.validate()?;
        Ok(window)
    }

    /// Checks that the window is non-empty.
    pub fn validate(&self) -> AnalyticsResult<()> {
        if self.start >= self.end {
            return Err(AnalyticsError::validation(format!(
                "history window {} .. {} is empty",
                self.start, self.end
            )));
        }
        Ok(())
    }

    /// Whether `date` falls inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}
