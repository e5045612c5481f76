//! Behavior-driven tests for the web dashboard
//!
//! These tests drive the axum router in-process against the offline Yahoo
//! adapter and check HOW selections, date inputs and failures reach the
//! browser and the JSON API.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use simple_stock_core::{DashboardConfig, TickerSymbol, YahooAdapter};
use simple_stock_web::{router, AppState};
use tower::ServiceExt;

const BODY_LIMIT: usize = 4 * 1024 * 1024;

fn app_with(config: DashboardConfig) -> Router {
    let state = AppState::new(Arc::new(YahooAdapter::mock()), config).expect("templates load");
    router(state)
}

fn app() -> Router {
    app_with(DashboardConfig::default())
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), BODY_LIMIT)
        .await
        .expect("body");
    (status, String::from_utf8(bytes.to_vec()).expect("utf8 body"))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_str(&body).expect("json body"))
}

// =============================================================================
// JSON API
// =============================================================================

#[tokio::test]
async fn health_probe_reports_ok() {
    let (status, body) = get_json(app(), "/healthz").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn tickers_endpoint_lists_allow_list_with_readme_default() {
    let (status, body) = get_json(app(), "/api/tickers").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["tickers"],
        serde_json::json!(["README", "PFE", "GOOGL", "AAPL", "MSFT", "STG.AX"])
    );
    assert_eq!(body["default"], "README");
}

#[tokio::test]
async fn when_stock_and_range_are_given_api_returns_ticker_plan() {
    // Given: AAPL over 2022-01-01..2022-01-10
    let uri = "/api/dashboard?symbol=AAPL&from=2022-01-01&to=2022-01-10";

    // When: The dashboard API is called
    let (status, body) = get_json(app(), uri).await;

    // Then: Every weekday in the inclusive range is projected
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], "ticker");
    assert_eq!(body["profile"]["long_name"], "Apple Inc.");
    assert_eq!(body["price"]["points"].as_array().map(Vec::len), Some(6));
    assert_eq!(body["volume"]["points"].as_array().map(Vec::len), Some(6));
    assert_eq!(body["price"]["points"][0]["date"], "2022-01-03");
    assert_eq!(body["recommendations"]["columns"][0], "period");
}

#[tokio::test]
async fn when_readme_is_requested_api_returns_static_page() {
    let (status, body) = get_json(app(), "/api/dashboard?symbol=readme").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], "readme");
    assert_eq!(body["blocks"][0]["kind"], "title");
}

#[tokio::test]
async fn when_symbol_is_not_listed_api_returns_bad_request() {
    let (status, body) = get_json(app(), "/api/dashboard?symbol=TSLA").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "web.validation");
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn when_provider_does_not_know_symbol_api_returns_not_found() {
    // Given: An allow-list entry the provider cannot resolve
    let mut config = DashboardConfig::default();
    config
        .tickers
        .push(TickerSymbol::parse("ZZZZ").expect("valid ticker"));

    // When: It is selected
    let (status, body) = get_json(app_with(config), "/api/dashboard?symbol=ZZZZ").await;

    // Then: SymbolNotFound is surfaced as 404
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "pipeline.symbol_not_found");
}

#[tokio::test]
async fn when_range_has_no_trading_days_api_returns_empty_range_result() {
    // Given: A weekend-only range
    let uri = "/api/dashboard?symbol=PFE&from=2022-01-01&to=2022-01-02";

    // When: The dashboard API is called
    let (status, body) = get_json(app(), uri).await;

    // Then: The empty result is an error, not an empty chart
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "pipeline.empty_range_result");
}

#[tokio::test]
async fn when_from_is_after_to_provider_rejection_is_bad_gateway() {
    let uri = "/api/dashboard?symbol=MSFT&from=2023-07-01&to=2023-06-15";

    let (status, body) = get_json(app(), uri).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "pipeline.data_fetch_failure");
}

#[tokio::test]
async fn malformed_date_is_bad_request() {
    let (status, body) = get_json(app(), "/api/dashboard?symbol=AAPL&from=01-01-2022").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .is_some_and(|message| message.contains("01-01-2022")));
}

// =============================================================================
// Browser dashboard
// =============================================================================

#[tokio::test]
async fn landing_page_shows_sidebar_and_readme() {
    // Given/When: The dashboard is opened without a selection
    let (status, html) = get(app(), "/").await;

    // Then: README is selected, its content is rendered, and no date pickers are shown
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<h1>Simple Stock</h1>"));
    assert!(html.contains(r#"<option value="README" selected>README</option>"#));
    assert!(html.contains("Welcome to Simple Stock"));
    assert!(!html.contains(r#"name="from""#));
    assert!(!html.contains(r#"name="to""#));
}

#[tokio::test]
async fn readme_ignores_malformed_date_inputs() {
    // Given: README with garbage From/To values
    let uri = "/?symbol=README&from=bad&to=2023-13-40";

    // When: The dashboard is rendered
    let (status, html) = get(app(), uri).await;

    // Then: The README page is shown instead of an error panel
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Welcome to Simple Stock"));
    assert!(!html.contains(r#"class="error""#));

    let (status, body) = get_json(app(), "/api/dashboard?symbol=readme&from=bad").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], "readme");
}

#[tokio::test]
async fn stock_page_shows_profile_charts_and_recommendations() {
    // Given: MSFT with explicit From/To inputs
    let uri = "/?symbol=MSFT&from=2022-01-01&to=2022-01-10";

    // When: The dashboard is rendered
    let (status, html) = get(app(), uri).await;

    // Then: Every panel is present and the inputs echo the range
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"<option value="MSFT" selected>MSFT</option>"#));
    assert!(html.contains("<h2>Microsoft Corporation</h2>"));
    assert!(html.contains(r#"id="price-chart""#));
    assert_eq!(html.matches("<polyline").count(), 2);
    assert!(html.contains(r#"id="volume-chart""#));
    assert_eq!(html.matches("<rect x=").count(), 6);
    assert!(html.contains("<h3>Recommendations</h3>"));
    assert!(html.contains(r#"value="2022-01-01""#));
    assert!(html.contains(r#"value="2022-01-10""#));
}

#[tokio::test]
async fn failing_selection_renders_error_panel_with_status() {
    let (status, html) = get(app(), "/?symbol=TSLA").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(html.contains(r#"class="error""#));
    assert!(html.contains("web.validation"));
}

#[tokio::test]
async fn static_assets_are_served() {
    let (status, body) = get(app(), "/assets/simple-stock.svg").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<svg"));
}
