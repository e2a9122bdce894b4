//! Shared application state for the QuantLab dashboard.
//!
//! Holds the process-wide fetchers: every session reads the same cached
//! snapshot. Construction errors (config, store client) are returned to main,
//! which treats them as fatal.

use std::sync::Arc;

use quantlab_core::error::Result;

use crate::config::DashboardConfig;
use crate::fetch::{PriceSeriesFetcher, SnapshotFetcher};
use crate::obs::DashboardMetrics;
use crate::store::{self, ObjectStore};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    snapshot: Arc<SnapshotFetcher>,
    chart: Option<Arc<PriceSeriesFetcher>>,
    metrics: Arc<DashboardMetrics>,
}

struct AppStateInner {
    cfg: DashboardConfig,
}

impl AppState {
    /// Build application state with the store named in `cfg`.
    pub async fn new(cfg: DashboardConfig) -> Result<Self> {
        let store = store::from_config(&cfg.store).await?;
        tracing::info!(store = %store.describe(), key = %cfg.snapshot.key, "object store ready");
        Ok(Self::with_store(cfg, store))
    }

    /// Build application state over an already constructed store.
    pub fn with_store(cfg: DashboardConfig, store: Arc<dyn ObjectStore>) -> Self {
        let metrics = Arc::new(DashboardMetrics::default());

        let snapshot = Arc::new(SnapshotFetcher::new(
            Arc::clone(&store),
            cfg.snapshot.key.clone(),
            cfg.snapshot.ttl(),
            Arc::clone(&metrics),
        ));

        let chart = cfg.chart.as_ref().map(|c| {
            Arc::new(PriceSeriesFetcher::new(
                Arc::clone(&store),
                c.key.clone(),
                c.ttl(),
                Arc::clone(&metrics),
            ))
        });

        Self {
            inner: Arc::new(AppStateInner { cfg }),
            snapshot,
            chart,
            metrics,
        }
    }

    pub fn cfg(&self) -> &DashboardConfig {
        &self.inner.cfg
    }

    pub fn snapshot(&self) -> Arc<SnapshotFetcher> {
        Arc::clone(&self.snapshot)
    }

    /// Chart fetcher and the number of trailing points to plot.
    pub fn chart(&self) -> Option<(Arc<PriceSeriesFetcher>, usize)> {
        let points = self.inner.cfg.chart.as_ref()?.points;
        self.chart.as_ref().map(|f| (Arc::clone(f), points))
    }

    pub fn metrics(&self) -> Arc<DashboardMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Static gauges appended to `/metrics`.
    pub fn metrics_extra(&self) -> Vec<(&'static str, u64)> {
        vec![
            ("quantlab_snapshot_ttl_seconds", self.snapshot.ttl().as_secs()),
            ("quantlab_chart_enabled", u64::from(self.chart.is_some())),
        ]
    }
}
