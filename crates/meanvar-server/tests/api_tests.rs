//! Integration tests for the Meanvar server endpoints.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, NaiveDate};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use meanvar_core::{PricePoint, PriceSeries};
use meanvar_data::{InMemoryPriceSource, PairAnalyzer};
use meanvar_server::{create_router, Server, ServerConfig};

// =============================================================================
// TEST FIXTURES
// =============================================================================

/// Daily closes over the default window with a deterministic wiggle.
fn create_series(ticker: &str, start: f64, drift: f64, phase: f64) -> PriceSeries {
    let first = NaiveDate::from_ymd_opt(2018, 6, 1).unwrap();
    let points = (0..365)
        .map(|i| {
            let t = i as f64;
            let close = start * (1.0 + drift * t) * (1.0 + 0.02 * (0.45 * t + phase).sin());
            PricePoint::new(first + Duration::days(i), close)
        })
        .collect();
    PriceSeries::new(ticker, points)
}

fn create_test_app() -> axum::Router {
    let source = InMemoryPriceSource::new()
        .with_series(create_series("AAPL", 150.0, 0.0008, 0.0))
        .with_series(create_series("MSFT", 100.0, 0.0012, 2.1))
        .with_series(create_series("TWIN", 150.0, 0.0008, 0.0))
        .with_series(PriceSeries::new(
            "OLD",
            vec![PricePoint::new(NaiveDate::from_ymd_opt(2010, 1, 4).unwrap(), 10.0)],
        ));
    create_router(Arc::new(PairAnalyzer::new(Arc::new(source))))
}

async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, serde_json::to_string(&body).unwrap()).await
}

async fn post_raw(app: axum::Router, uri: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap_or(json!({}));

    (status, json)
}

fn assert_opaque_error(status: StatusCode, body: &Value) {
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, &json!({"msg": "error"}));
}

// =============================================================================
// HEALTH CHECK TESTS
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["source"], "memory");
}

// =============================================================================
// MIN VAR PORTFOLIO TESTS
// =============================================================================

#[tokio::test]
async fn test_min_var_portfolio_success() {
    let (status, json) = post_json(
        create_test_app(),
        "/minVarPortfolio",
        json!({"stock1": "AAPL", "stock2": "MSFT", "riskFreeRate": 0.02}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["msg"], "success");

    let fs = json["mvp"]["fs"].as_f64().unwrap();
    let ss = json["mvp"]["ss"].as_f64().unwrap();
    assert!((fs + ss - 100.0).abs() <= 0.011);
    assert!(json["mvp"]["stdev"].as_f64().unwrap() >= 0.0);

    let market_fs = json["case1"]["fs"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&market_fs));
    assert!(json["case1"]["sharpe"].is_number());

    assert!(json["case2"]["mean"].is_number());
    assert!(json["case3"]["stdev"].is_number());
    assert_eq!(json["frontier"].as_array().unwrap().len(), 11);
    assert_eq!(json["frontier"][0]["fs"].as_f64().unwrap(), 0.0);
    assert_eq!(json["frontier"][10]["fs"].as_f64().unwrap(), 100.0);
}

#[tokio::test]
async fn test_values_have_two_decimals() {
    let (status, json) = post_json(
        create_test_app(),
        "/minVarPortfolio",
        json!({"stock1": "AAPL", "stock2": "MSFT", "riskFreeRate": "0.02"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    for value in [
        &json["mvp"]["fs"],
        &json["mvp"]["mean"],
        &json["case1"]["stdev"],
        &json["case1"]["sharpe"],
        &json["case2"]["mean"],
        &json["case3"]["stdev"],
    ] {
        let x = value.as_f64().unwrap();
        assert!(((x * 100.0).round() - x * 100.0).abs() < 1e-6, "{}", x);
    }
}

#[tokio::test]
async fn test_half_market_between_rf_and_market() {
    let (_, json) = post_json(
        create_test_app(),
        "/minVarPortfolio",
        json!({"stock1": "AAPL", "stock2": "MSFT", "riskFreeRate": 0.02}),
    )
    .await;

    let market_mean = json["case1"]["mean"].as_f64().unwrap();
    let market_stdev = json["case1"]["stdev"].as_f64().unwrap();
    let half_mean = json["case2"]["mean"].as_f64().unwrap();
    let half_stdev = json["case2"]["stdev"].as_f64().unwrap();

    assert!((half_mean - (market_mean + 2.0) / 2.0).abs() <= 0.011);
    assert!((half_stdev - market_stdev / 2.0).abs() <= 0.011);
}

// =============================================================================
// ERROR CONTRACT TESTS
// =============================================================================

#[tokio::test]
async fn test_missing_risk_free_rate() {
    let (status, json) = post_json(
        create_test_app(),
        "/minVarPortfolio",
        json!({"stock1": "AAPL", "stock2": "MSFT"}),
    )
    .await;
    assert_opaque_error(status, &json);
}

#[tokio::test]
async fn test_non_numeric_risk_free_rate() {
    let (status, json) = post_json(
        create_test_app(),
        "/minVarPortfolio",
        json!({"stock1": "AAPL", "stock2": "MSFT", "riskFreeRate": "abc"}),
    )
    .await;
    assert_opaque_error(status, &json);
}

#[tokio::test]
async fn test_malformed_json() {
    let (status, json) = post_raw(
        create_test_app(),
        "/minVarPortfolio",
        "{\"stock1\": \"AAPL\",".to_string(),
    )
    .await;
    assert_opaque_error(status, &json);
}

#[tokio::test]
async fn test_unknown_ticker() {
    let (status, json) = post_json(
        create_test_app(),
        "/minVarPortfolio",
        json!({"stock1": "AAPL", "stock2": "ZZZZ", "riskFreeRate": 0.02}),
    )
    .await;
    assert_opaque_error(status, &json);
}

#[tokio::test]
async fn test_ticker_without_prices_in_window() {
    let (status, json) = post_json(
        create_test_app(),
        "/minVarPortfolio",
        json!({"stock1": "OLD", "stock2": "MSFT", "riskFreeRate": 0.02}),
    )
    .await;
    assert_opaque_error(status, &json);
}

#[tokio::test]
async fn test_identical_assets_are_rejected() {
    let (status, json) = post_json(
        create_test_app(),
        "/minVarPortfolio",
        json!({"stock1": "AAPL", "stock2": "TWIN", "riskFreeRate": 0.02}),
    )
    .await;
    assert_opaque_error(status, &json);
}

// =============================================================================
// STARTUP TESTS
// =============================================================================

#[tokio::test]
async fn test_start_fails_on_unresolvable_host() {
    let config = ServerConfig {
        host: "not-a-valid-host.invalid".to_string(),
        port: 38517,
        ..ServerConfig::default()
    };
    let analyzer = PairAnalyzer::new(Arc::new(InMemoryPriceSource::new()));
    let server = Server::new(config, Arc::new(analyzer));

    let result = tokio::time::timeout(std::time::Duration::from_secs(10), server.start())
        .await
        .expect("start should fail instead of serving");
    assert!(result.is_err());
}
