//! Lightweight in-process metrics.
//!
//! Cache and fetch counters are stored as atomics and rendered by the
//! `/metrics` handler in Prometheus text format.

pub mod metrics;

pub use metrics::DashboardMetrics;
