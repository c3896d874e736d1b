//! Return and covariance derivation from price histories.
//!
//! Both series are aligned on common dates, converted to period-over-period
//! percentage changes, and summarized as per-asset means and a sample
//! covariance. Means are annualized by compounding, `(1 + m)^P - 1`, and
//! covariances by linear scaling, `cov * P`, where `P` is the number of
//! periods per year of the sampling interval.

use std::collections::HashMap;

use meanvar_math::statistics::{mean, pct_change, sample_covariance};

use crate::config::EngineConfig;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::types::{AssetStatistics, CovarianceMatrix, PriceSeries, ReturnVector};

/// Minimum number of periodic returns for a sample covariance.
const MIN_OBSERVATIONS: usize = 2;

/// Compounds a mean periodic return to an annual figure.
#[must_use]
pub fn annualize_return(periodic_mean: f64, periods_per_year: u32) -> f64 {
    (1.0 + periodic_mean).powf(f64::from(periods_per_year)) - 1.0
}

/// Closes of both series on the dates they share, in date order.
fn align(first: &PriceSeries, second: &PriceSeries) -> (Vec<f64>, Vec<f64>) {
    let lookup: HashMap<_, _> = second
        .points()
        .iter()
        .map(|p| (p.date, p.close))
        .collect();

    first
        .points()
        .iter()
        .filter_map(|p| lookup.get(&p.date).map(|close_b| (p.close, *close_b)))
        .unzip()
}

/// Derives annualized returns and covariance for an asset pair.
///
/// # Errors
///
/// - `DataUnavailable` if either series is empty, the series share no dates,
///   or fewer than two return observations remain.
/// - `DataIntegrity` if a price is non-positive or not finite.
pub fn derive_statistics(
    first: &PriceSeries,
    second: &PriceSeries,
    config: &EngineConfig,
) -> AnalyticsResult<AssetStatistics> {
    for series in [first, second] {
        if series.is_empty() {
            return Err(AnalyticsError::data_unavailable(format!(
                "no price history for '{}'",
                series.ticker()
            )));
        }
    }

    let (closes_a, closes_b) = align(first, second);
    if closes_a.len() <= MIN_OBSERVATIONS {
        return Err(AnalyticsError::data_unavailable(format!(
            "'{}' and '{}' share only {} dates",
            first.ticker(),
            second.ticker(),
            closes_a.len()
        )));
    }

    let to_integrity = |e: meanvar_math::MathError| AnalyticsError::integrity(e.to_string());
    let changes_a = pct_change(&closes_a).map_err(to_integrity)?;
    let changes_b = pct_change(&closes_b).map_err(to_integrity)?;

    let (returns_a, returns_b): (Vec<f64>, Vec<f64>) = changes_a
        .into_iter()
        .zip(changes_b)
        .filter(|(ra, rb)| !(config.drops_flat_periods() && *ra == 0.0 && *rb == 0.0))
        .unzip();

    if returns_a.len() < MIN_OBSERVATIONS {
        return Err(AnalyticsError::data_unavailable(format!(
            "only {} usable return observations",
            returns_a.len()
        )));
    }

    let insufficient = |e: meanvar_math::MathError| AnalyticsError::data_unavailable(e.to_string());
    let mean_a = mean(&returns_a).map_err(insufficient)?;
    let mean_b = mean(&returns_b).map_err(insufficient)?;
    let var_a = sample_covariance(&returns_a, &returns_a).map_err(insufficient)?;
    let var_b = sample_covariance(&returns_b, &returns_b).map_err(insufficient)?;
    let cov_ab = sample_covariance(&returns_a, &returns_b).map_err(insufficient)?;

    let periods = config.periods_per_year();
    let returns = ReturnVector::new(
        annualize_return(mean_a, periods),
        annualize_return(mean_b, periods),
    );
    let covariance = CovarianceMatrix::new(var_a, var_b, cov_ab)?.scaled(f64::from(periods))?;

    log::debug!(
        "derived statistics for {}/{}: {} observations, returns ({:.4}, {:.4}), variances ({:.4}, {:.4}), covariance {:.4}",
        first.ticker(),
        second.ticker(),
        returns_a.len(),
        returns.a,
        returns.b,
        covariance.var_a(),
        covariance.var_b(),
        covariance.covariance()
    );

    Ok(AssetStatistics::new(returns, covariance, returns_a.len()))
}
