//! Read-through document fetchers (store + TTL cache + metrics).
//!
//! `get()` never fails: every store or parse error is logged, counted, and
//! folded into `Fetched::Stale` (a previous copy exists) or
//! `Fetched::Unavailable` (nothing to show).

use std::sync::Arc;
use std::time::{Duration, Instant};

use quantlab_core::error::{QuantlabError, Result};
use quantlab_core::snapshot::PriceSeries;
use quantlab_core::{Document, Snapshot};

use crate::cache::{Lookup, TtlCache};
use crate::obs::DashboardMetrics;
use crate::store::ObjectStore;

pub type SnapshotFetcher = DocumentFetcher<Snapshot>;
pub type PriceSeriesFetcher = DocumentFetcher<PriceSeries>;

/// What a page render gets back.
#[derive(Debug)]
pub enum Fetched<T> {
    Fresh(Arc<T>),
    /// Last good copy, served because the refresh failed.
    Stale { value: Arc<T>, age: Duration },
    Unavailable,
}

impl<T> Fetched<T> {
    pub fn value(&self) -> Option<&Arc<T>> {
        match self {
            Fetched::Fresh(v) | Fetched::Stale { value: v, .. } => Some(v),
            Fetched::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.value().is_some()
    }

    /// Age of a stale copy; `None` when fresh or unavailable.
    pub fn stale_age(&self) -> Option<Duration> {
        match self {
            Fetched::Stale { age, .. } => Some(*age),
            _ => None,
        }
    }
}

pub struct DocumentFetcher<T: Document> {
    store: Arc<dyn ObjectStore>,
    key: String,
    cache: TtlCache<T>,
    metrics: Arc<DashboardMetrics>,
}

impl<T: Document> DocumentFetcher<T> {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        key: impl Into<String>,
        ttl: Duration,
        metrics: Arc<DashboardMetrics>,
    ) -> Self {
        Self {
            store,
            key: key.into(),
            cache: TtlCache::new(ttl),
            metrics,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn ttl(&self) -> Duration {
        self.cache.ttl()
    }

    /// Cached document if fresh, otherwise one store read.
    pub async fn get(&self) -> Fetched<T> {
        let doc = T::NAME;
        match self.cache.get_or_refresh(|| self.fetch()).await {
            Lookup::Hit(v) => {
                self.metrics.cache_lookups.inc(&[("doc", doc), ("result", "hit")]);
                tracing::debug!(doc, key = %self.key, "cache hit");
                Fetched::Fresh(v)
            }
            Lookup::Refreshed(v) => {
                self.metrics.cache_lookups.inc(&[("doc", doc), ("result", "miss")]);
                tracing::info!(doc, key = %self.key, "document refreshed");
                Fetched::Fresh(v)
            }
            Lookup::Stale {
                value,
                age,
                error,
                joined,
            } => {
                self.metrics.cache_lookups.inc(&[("doc", doc), ("result", "miss")]);
                self.record_failure(&error, joined);
                self.metrics.stale_served.inc(&[("doc", doc)]);
                tracing::warn!(doc, key = %self.key, age_secs = age.as_secs(), "serving stale document");
                Fetched::Stale { value, age }
            }
            Lookup::Failed { error, joined } => {
                self.metrics.cache_lookups.inc(&[("doc", doc), ("result", "miss")]);
                self.record_failure(&error, joined);
                Fetched::Unavailable
            }
        }
    }

    async fn fetch(&self) -> Result<T> {
        let started = Instant::now();
        let res = match self.store.get_object(&self.key).await {
            Ok(body) => T::parse(&body),
            Err(e) => Err(e),
        };
        self.metrics
            .fetch_duration
            .observe(&[("doc", T::NAME)], started.elapsed());
        res
    }

    /// Joined failures were already counted and logged by the caller that ran the fetch.
    fn record_failure(&self, error: &QuantlabError, joined: bool) {
        let kind = error.kind().as_str();
        if joined {
            tracing::debug!(doc = T::NAME, key = %self.key, kind, "joined failed refresh");
            return;
        }
        self.metrics
            .fetch_errors
            .inc(&[("doc", T::NAME), ("kind", kind)]);
        tracing::error!(
            doc = T::NAME,
            key = %self.key,
            store = %self.store.describe(),
            kind,
            error = %error,
            "document fetch failed"
        );
    }
}
