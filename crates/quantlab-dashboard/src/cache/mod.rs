//! Single-slot read-through cache with a freshness window.
//!
//! Holds at most one `(value, fetched_at)` pair. The slot lock is held across
//! a refresh, so concurrent misses wait for the one fetch in flight instead of
//! starting their own. Callers that queued behind a failed refresh take its
//! outcome (`joined: true`) rather than calling the store again.
//!
//! A failed refresh leaves the value untouched: the old value and its fetch
//! time stay, and the caller gets it back as `Lookup::Stale`. Because the
//! fetch time is not bumped, the next lookup that starts after the failure
//! tries the store again.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use quantlab_core::error::{QuantlabError, Result};

/// Outcome of one cache lookup.
#[derive(Debug)]
pub enum Lookup<T> {
    /// Cached value younger than the TTL; no refresh ran.
    Hit(Arc<T>),
    /// Refresh ran and succeeded; the slot now holds this value.
    Refreshed(Arc<T>),
    /// Refresh failed; the previous value is returned unchanged.
    Stale {
        value: Arc<T>,
        age: Duration,
        error: QuantlabError,
        /// The failure came from another caller's refresh.
        joined: bool,
    },
    /// Refresh failed and nothing was cached.
    Failed { error: QuantlabError, joined: bool },
}

struct Entry<T> {
    value: Arc<T>,
    fetched_at: Instant,
}

struct Slot<T> {
    entry: Option<Entry<T>>,
    /// Error of the last refresh, cleared on success.
    last_error: Option<QuantlabError>,
}

pub struct TtlCache<T> {
    ttl: Duration,
    /// Finished refresh attempts; only bumped under the slot lock.
    attempts: AtomicU64,
    slot: Mutex<Slot<T>>,
}

impl<T> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            attempts: AtomicU64::new(0),
            slot: Mutex::new(Slot {
                entry: None,
                last_error: None,
            }),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached value if fresh, otherwise run `refresh` once.
    pub async fn get_or_refresh<F, Fut>(&self, refresh: F) -> Lookup<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let seen = self.attempts.load(Ordering::SeqCst);
        let mut slot = self.slot.lock().await;

        if let Some(entry) = slot.entry.as_ref() {
            if entry.fetched_at.elapsed() < self.ttl {
                return Lookup::Hit(Arc::clone(&entry.value));
            }
        }

        // an attempt finished while we waited for the lock
        if self.attempts.load(Ordering::SeqCst) != seen {
            if let Some(error) = slot.last_error.clone() {
                return failure(&slot, error, true);
            }
        }

        let res = refresh().await;
        self.attempts.fetch_add(1, Ordering::SeqCst);

        match res {
            Ok(v) => {
                let value = Arc::new(v);
                slot.entry = Some(Entry {
                    value: Arc::clone(&value),
                    fetched_at: Instant::now(),
                });
                slot.last_error = None;
                Lookup::Refreshed(value)
            }
            Err(error) => {
                slot.last_error = Some(error.clone());
                failure(&slot, error, false)
            }
        }
    }

    /// Current value and its age, without refreshing.
    pub async fn peek(&self) -> Option<(Arc<T>, Duration)> {
        let slot = self.slot.lock().await;
        slot.entry
            .as_ref()
            .map(|e| (Arc::clone(&e.value), e.fetched_at.elapsed()))
    }
}

fn failure<T>(slot: &Slot<T>, error: QuantlabError, joined: bool) -> Lookup<T> {
    match slot.entry.as_ref() {
        Some(entry) => Lookup::Stale {
            value: Arc::clone(&entry.value),
            age: entry.fetched_at.elapsed(),
            error,
            joined,
        },
        None => Lookup::Failed { error, joined },
    }
}
