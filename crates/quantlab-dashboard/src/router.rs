//! Axum router wiring.
//!
//! `/` serves the dashboard page, `/api/snapshot` the raw document, plus the
//! operational endpoints.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops, pages};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::dashboard))
        .route("/api/snapshot", get(pages::snapshot_json))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
