//! Integration tests for meanvar-core.
//!
//! These tests run complete analyses through [`PortfolioEngine`], from
//! annualized statistics and from raw price histories.

use approx::assert_relative_eq;
use chrono::{Duration, NaiveDate};
use meanvar_core::prelude::*;

// =============================================================================
// TEST FIXTURES
// =============================================================================

fn reference_statistics() -> AssetStatistics {
    AssetStatistics::new(
        ReturnVector::new(0.10, 0.20),
        CovarianceMatrix::new(0.04, 0.09, 0.0).unwrap(),
        250,
    )
}

/// Builds a daily series from a list of closes starting 2018-06-01.
fn daily_series(ticker: &str, closes: &[f64]) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2018, 6, 1).unwrap();
    PriceSeries::new(
        ticker,
        closes
            .iter()
            .enumerate()
            .map(|(i, close)| PricePoint::new(start + Duration::days(i as i64), *close))
            .collect(),
    )
}

/// Deterministic wiggly price path.
fn synthetic_closes(n: usize, start: f64, drift: f64, amplitude: f64, phase: f64) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            start * (1.0 + drift * t) * (1.0 + amplitude * (0.7 * t + phase).sin())
        })
        .collect()
}

// =============================================================================
// END-TO-END REFERENCE CASE
// =============================================================================

#[test]
fn test_reference_min_variance() {
    let report = PortfolioEngine::default()
        .analyze(&reference_statistics(), 0.02)
        .unwrap();

    let mvp = report.min_variance;
    assert_relative_eq!(mvp.weights.a, 0.09 / 0.13, epsilon = 1e-12);
    assert_relative_eq!(mvp.weights.b, 0.04 / 0.13, epsilon = 1e-12);
    assert_relative_eq!(mvp.stats.mean, 0.130769, epsilon = 1e-6);
    assert_relative_eq!(mvp.stats.stdev, 0.166410, epsilon = 1e-6);
}

#[test]
fn test_reference_market_and_scenarios() {
    let report = PortfolioEngine::default()
        .analyze(&reference_statistics(), 0.02)
        .unwrap();

    let market = report.market;
    assert_relative_eq!(market.weights.a, 0.5, epsilon = 1e-6);
    assert_relative_eq!(market.stats.mean, 0.15, epsilon = 1e-6);
    assert_relative_eq!(market.stats.stdev, 0.0325_f64.sqrt(), epsilon = 1e-6);
    assert_relative_eq!(market.sharpe, 0.13 / 0.0325_f64.sqrt(), epsilon = 1e-8);

    assert_relative_eq!(report.half_market.mean, 0.085, epsilon = 1e-6);
    assert_relative_eq!(report.half_market.stdev, market.stats.stdev / 2.0, epsilon = 1e-9);

    assert_relative_eq!(report.leveraged_market.mean, 0.215, epsilon = 1e-6);
    assert_relative_eq!(
        report.leveraged_market.stdev,
        market.stats.stdev * 1.5,
        epsilon = 1e-9
    );
}

#[test]
fn test_reference_frontier() {
    let report = PortfolioEngine::default()
        .analyze(&reference_statistics(), 0.02)
        .unwrap();

    assert_eq!(report.frontier.len(), 11);
    assert_eq!(report.frontier[0].weights.a, 0.0);
    assert_eq!(report.frontier[10].weights.a, 1.0);
    assert_relative_eq!(report.frontier[10].expected_return, 0.10, epsilon = 1e-12);
    assert_relative_eq!(report.frontier[10].volatility, 0.20, epsilon = 1e-12);

    // No sampled point has lower volatility than the minimum-variance portfolio
    for point in &report.frontier {
        assert!(point.volatility >= report.min_variance.stats.stdev - 1e-12);
    }
}

#[test]
fn test_methods_agree() {
    let statistics = AssetStatistics::new(
        ReturnVector::new(0.08, 0.14),
        CovarianceMatrix::new(0.03, 0.07, 0.012).unwrap(),
        500,
    );
    let brent = PortfolioEngine::default().analyze(&statistics, 0.025).unwrap();
    let exact = PortfolioEngine::new(EngineConfig::new().with_market_method(MarketMethod::ClosedForm))
        .unwrap()
        .analyze(&statistics, 0.025)
        .unwrap();

    assert_relative_eq!(brent.market.weights.a, exact.market.weights.a, epsilon = 1e-6);
    assert_relative_eq!(brent.market.sharpe, exact.market.sharpe, epsilon = 1e-10);
    assert_eq!(brent.min_variance, exact.min_variance);
}

// =============================================================================
// DEGENERATE INPUTS
// =============================================================================

#[test]
fn test_identical_assets_are_degenerate() {
    let statistics = AssetStatistics::new(
        ReturnVector::new(0.10, 0.10),
        CovarianceMatrix::new(0.04, 0.04, 0.04).unwrap(),
        250,
    );
    let err = PortfolioEngine::default()
        .analyze(&statistics, 0.02)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DegenerateInput);
}

#[test]
fn test_market_without_excess_return_is_degenerate() {
    // The market portfolio is 100% B, whose return equals the risk-free rate
    let statistics = AssetStatistics::new(
        ReturnVector::new(-0.05, 0.03),
        CovarianceMatrix::new(0.09, 0.01, 0.0).unwrap(),
        250,
    );
    let err = PortfolioEngine::default()
        .analyze(&statistics, 0.03)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DegenerateInput);
}

// =============================================================================
// FROM PRICE HISTORIES
// =============================================================================

#[test]
fn test_analyze_prices() {
    let first = daily_series("AAA", &synthetic_closes(120, 100.0, 0.002, 0.01, 0.0));
    let second = daily_series("BBB", &synthetic_closes(120, 40.0, 0.001, 0.015, 1.3));

    let engine = PortfolioEngine::default();
    let report = engine.analyze_prices(&first, &second, 0.02).unwrap();

    assert_eq!(report.statistics.observations, 119);
    assert!(report.statistics.covariance.is_positive_semidefinite());
    assert!((report.min_variance.weights.a + report.min_variance.weights.b - 1.0).abs() < 1e-12);
    assert!(report.market.weights.within(0.0, 1.0, 1e-6));
    assert!(report.min_variance.stats.stdev >= 0.0);
}

#[test]
fn test_analyze_prices_missing_history() {
    let first = daily_series("AAA", &synthetic_closes(30, 100.0, 0.001, 0.01, 0.0));
    let missing = PriceSeries::new("ZZZZ", Vec::new());

    let err = PortfolioEngine::default()
        .analyze_prices(&first, &missing, 0.02)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DataUnavailable);
}

#[test]
fn test_monthly_annualization() {
    let first = daily_series("AAA", &synthetic_closes(24, 100.0, 0.01, 0.02, 0.0));
    let second = daily_series("BBB", &synthetic_closes(24, 50.0, 0.005, 0.03, 2.0));

    let daily = PortfolioEngine::default().derive(&first, &second).unwrap();
    let monthly = PortfolioEngine::new(EngineConfig::new().with_interval(SamplingInterval::Monthly))
        .unwrap()
        .derive(&first, &second)
        .unwrap();

    assert_relative_eq!(
        daily.covariance.var_a() / 365.0,
        monthly.covariance.var_a() / 12.0,
        epsilon = 1e-12
    );
}
