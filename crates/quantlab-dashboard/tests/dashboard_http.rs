//! End-to-end page rendering through the router.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use quantlab_dashboard::app_state::AppState;
use quantlab_dashboard::render::UNAVAILABLE_MESSAGE;
use quantlab_dashboard::router::build_router;

use common::{load_config, vector, MemoryStore};

const WITH_CHART: &str = r#"
version: 1
chart:
  key: spy_prices.json
  points: 3
"#;

fn app(yaml: &str) -> (Arc<MemoryStore>, Router) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::with_store(load_config(yaml), store.clone());
    (store, build_router(state))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let resp = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn full_snapshot_page() {
    let (store, app) = app("version: 1\n");
    store.put("breadth_data.json", vector("breadth_full.json"));

    let (status, html) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<h1>QuantLab Dashboard</h1>"));
    assert!(html.contains("<strong>Data last updated:</strong> 2024-01-01T00:00:00Z"));
    assert!(html.contains("Market in Backwardation (Potential Bearish Signal)"));
    assert_eq!(html.matches("<tr><td>").count(), 1);
    assert!(html.contains("<tr><td>SPY</td><td>1.2</td><td>87.5</td></tr>"));
    assert!(html.contains("<li><strong>Put/Call Ratio:</strong> 0.85</li>"));
    assert!(html.contains("<li><strong>Open Interest:</strong> 120,000</li>"));
    assert!(!html.contains("SPY Order Flow"));
    assert!(!html.contains("<svg"));
    assert!(html.contains("Data sourced from FMP and Polygon.io"));
}

#[tokio::test]
async fn missing_object_shows_only_error() {
    let (_store, app) = app("version: 1\n");

    let (status, html) = get(&app, "/").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(html.contains(UNAVAILABLE_MESSAGE));
    assert!(!html.contains("<table"));
    assert!(!html.contains("<h2>"));
}

#[tokio::test]
async fn partial_snapshot_renders_placeholders() {
    let (store, app) = app("version: 1\n");
    store.put(
        "breadth_data.json",
        r#"{"timestamp":"t","data":{"QQQ":{},"SPY_Flow":{"whale_sentiment":"<b>Bearish</b>"}}}"#,
    );

    let (status, html) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<tr><td>QQQ</td><td>N/A</td><td>N/A</td></tr>"));
    assert!(html.contains("<li><strong>Put/Call Ratio:</strong> N/A</li>"));
    assert!(html.contains("<li><strong>Put Buys:</strong> 0</li>"));
    assert!(html.contains("&lt;b&gt;Bearish&lt;/b&gt;"));
    assert!(!html.contains("Backwardation"));
}

#[tokio::test(start_paused = true)]
async fn stale_page_after_failed_refresh() {
    let (store, app) = app("version: 1\n");
    store.put("breadth_data.json", vector("breadth_full.json"));
    get(&app, "/").await;

    store.set_down(true);
    tokio::time::advance(Duration::from_secs(360)).await;

    let (status, html) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("showing data fetched 360s ago"));
    assert!(html.contains("0.85"));

    let (_, metrics) = get(&app, "/metrics").await;
    assert!(metrics.contains("quantlab_page_renders_total{status=\"stale\"} 1"));
}

#[tokio::test]
async fn chart_renders_trailing_points() {
    let (store, app) = app(WITH_CHART);
    store.put("breadth_data.json", vector("breadth_full.json"));
    store.put("spy_prices.json", vector("prices_spy.json"));

    let (_, html) = get(&app, "/").await;
    assert!(html.contains("<h2>Visualizations</h2>"));
    assert!(html.contains("SPY close, last 3 points"));
    assert!(html.contains("<polyline"));
    assert!(html.contains(">474.60<"));
    assert!(html.contains(">467.28<"));
}

#[tokio::test]
async fn chart_failure_leaves_page_intact() {
    let (store, app) = app(WITH_CHART);
    store.put("breadth_data.json", vector("breadth_full.json"));
    store.put("spy_prices.json", "not json");

    let (status, html) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("0.85"));
    assert!(!html.contains("<svg"));
}

#[tokio::test]
async fn snapshot_api() {
    let (store, app) = app("version: 1\n");

    let (status, body) = get(&app, "/api/snapshot").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let v: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["code"], "UNAVAILABLE");

    store.put("breadth_data.json", vector("breadth_full.json"));
    let (status, body) = get(&app, "/api/snapshot").await;
    assert_eq!(status, StatusCode::OK);
    let v: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["timestamp"], "2024-01-01T00:00:00Z");
    assert_eq!(v["data"]["SPY_Options"]["put_call_ratio"], 0.85);
}

#[tokio::test]
async fn ops_endpoints() {
    let (store, app) = app("version: 1\n");

    assert_eq!(get(&app, "/healthz").await, (StatusCode::OK, "ok".to_string()));
    assert_eq!(get(&app, "/readyz").await.0, StatusCode::SERVICE_UNAVAILABLE);

    store.put("breadth_data.json", vector("breadth_full.json"));
    assert_eq!(get(&app, "/readyz").await, (StatusCode::OK, "ready".to_string()));
    get(&app, "/").await;

    let (status, m) = get(&app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(m.contains("quantlab_fetch_errors_total{doc=\"snapshot\",kind=\"NOT_FOUND\"} 1"));
    assert!(m.contains("quantlab_cache_lookups_total{doc=\"snapshot\",result=\"hit\"} 1"));
    assert!(m.contains("quantlab_page_renders_total{status=\"ok\"} 1"));
    assert!(m.contains("quantlab_snapshot_ttl_seconds 300"));
    assert!(m.contains("quantlab_chart_enabled 0"));
    assert_eq!(store.calls("breadth_data.json"), 2);
}
