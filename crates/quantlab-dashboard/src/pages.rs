//! Page handlers. Each request re-runs fetch (through the cache) and render.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;

use quantlab_core::view::{ChartView, DashboardView};

use crate::app_state::AppState;
use crate::fetch::Fetched;
use crate::render::{self, PageContext, UNAVAILABLE_MESSAGE};

pub async fn dashboard(State(app): State<AppState>) -> Response {
    let title = app.cfg().dashboard.title.as_str();
    let fetched = app.snapshot().get().await;

    let Some(snapshot) = fetched.value() else {
        app.metrics().page_renders.inc(&[("status", "unavailable")]);
        return (StatusCode::SERVICE_UNAVAILABLE, Html(render::error_page(title))).into_response();
    };

    let view = DashboardView::from_snapshot(snapshot);
    let chart = load_chart(&app).await;
    let stale_age = fetched.stale_age();

    let status = if stale_age.is_some() { "stale" } else { "ok" };
    app.metrics().page_renders.inc(&[("status", status)]);

    let page = render::dashboard_page(&PageContext {
        title,
        view: &view,
        chart: chart.as_ref(),
        stale_age,
    });
    Html(page).into_response()
}

/// Chart is optional decoration: any failure just leaves it out.
async fn load_chart(app: &AppState) -> Option<ChartView> {
    let (fetcher, points) = app.chart()?;
    let fetched = fetcher.get().await;
    let series = fetched.value()?;
    ChartView::from_series(series, points)
}

pub async fn snapshot_json(State(app): State<AppState>) -> Response {
    match app.snapshot().get().await {
        Fetched::Fresh(s) => Json(s.as_ref()).into_response(),
        Fetched::Stale { value, age } => (
            [("x-quantlab-stale-age-secs", age.as_secs().to_string())],
            Json(value.as_ref()),
        )
            .into_response(),
        Fetched::Unavailable => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": UNAVAILABLE_MESSAGE, "code": "UNAVAILABLE" })),
        )
            .into_response(),
    }
}
