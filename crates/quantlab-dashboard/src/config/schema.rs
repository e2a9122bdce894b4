use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use quantlab_core::error::{QuantlabError, Result};
use quantlab_core::view::chart::DEFAULT_CHART_POINTS;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    pub version: u32,

    #[serde(default)]
    pub dashboard: DashboardSection,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub snapshot: SnapshotConfig,

    /// No section, no chart.
    #[serde(default)]
    pub chart: Option<ChartConfig>,
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(QuantlabError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.dashboard.validate()?;
        self.store.validate()?;
        self.snapshot.validate()?;
        if let Some(chart) = &self.chart {
            chart.validate()?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for DashboardSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            title: default_title(),
        }
    }
}

impl DashboardSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if self.title.trim().is_empty() {
            return Err(QuantlabError::Config("dashboard.title must not be empty".into()));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            QuantlabError::Config(format!("dashboard.listen must be a valid SocketAddr: {e}"))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8501".into()
}
fn default_title() -> String {
    "QuantLab Dashboard".into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    S3,
    File,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    #[serde(default = "default_store_kind")]
    pub kind: StoreKind,

    #[serde(default = "default_bucket")]
    pub bucket: String,

    #[serde(default = "default_region")]
    pub region: String,

    /// Path-style endpoint override (MinIO, local fakes).
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Object directory for `kind: file`.
    #[serde(default)]
    pub root: Option<PathBuf>,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            kind: default_store_kind(),
            bucket: default_bucket(),
            region: default_region(),
            endpoint: None,
            root: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl StoreConfig {
    pub fn validate(&self) -> Result<()> {
        if !(100..=60000).contains(&self.timeout_ms) {
            return Err(QuantlabError::Config(
                "store.timeout_ms must be between 100 and 60000".into(),
            ));
        }
        match self.kind {
            StoreKind::S3 => {
                if self.bucket.trim().is_empty() {
                    return Err(QuantlabError::Config("store.bucket must not be empty".into()));
                }
                if !is_bucket_name(&self.bucket) {
                    return Err(QuantlabError::Config(format!(
                        "store.bucket is not a valid bucket name: {:?}",
                        self.bucket
                    )));
                }
                if !is_region(&self.region) {
                    return Err(QuantlabError::Config(format!(
                        "store.region is not a valid region name: {:?}",
                        self.region
                    )));
                }
                if let Some(ep) = &self.endpoint {
                    if !(ep.starts_with("http://") || ep.starts_with("https://")) {
                        return Err(QuantlabError::Config(
                            "store.endpoint must start with http:// or https://".into(),
                        ));
                    }
                }
            }
            StoreKind::File => {
                if self.root.is_none() {
                    return Err(QuantlabError::Config("store.root is required for kind: file".into()));
                }
            }
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn is_region(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// 3..=63 of lowercase letters, digits, `.` and `-`, alphanumeric at both ends.
fn is_bucket_name(s: &str) -> bool {
    let b = s.as_bytes();
    let edge = |c: &u8| c.is_ascii_lowercase() || c.is_ascii_digit();
    (3..=63).contains(&b.len())
        && b.first().is_some_and(edge)
        && b.last().is_some_and(edge)
        && b.iter().all(|&c| edge(&c) || c == b'.' || c == b'-')
}

fn default_store_kind() -> StoreKind {
    StoreKind::S3
}
fn default_bucket() -> String {
    "quantlab-bucket".into()
}
fn default_region() -> String {
    "eu-west-2".into()
}
fn default_timeout_ms() -> u64 {
    10000
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotConfig {
    #[serde(default = "default_snapshot_key")]
    pub key: String,

    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            key: default_snapshot_key(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl SnapshotConfig {
    pub fn validate(&self) -> Result<()> {
        validate_key("snapshot.key", &self.key)?;
        validate_ttl("snapshot.ttl_secs", self.ttl_secs)
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

fn default_snapshot_key() -> String {
    "breadth_data.json".into()
}
fn default_ttl_secs() -> u64 {
    300
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartConfig {
    pub key: String,

    #[serde(default = "default_chart_points")]
    pub points: usize,

    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl ChartConfig {
    pub fn validate(&self) -> Result<()> {
        validate_key("chart.key", &self.key)?;
        if !(1..=1000).contains(&self.points) {
            return Err(QuantlabError::Config(
                "chart.points must be between 1 and 1000".into(),
            ));
        }
        validate_ttl("chart.ttl_secs", self.ttl_secs)
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

fn default_chart_points() -> usize {
    DEFAULT_CHART_POINTS
}

fn validate_key(field: &str, key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(QuantlabError::Config(format!("{field} must not be empty")));
    }
    Ok(())
}

fn validate_ttl(field: &str, secs: u64) -> Result<()> {
    if !(1..=86400).contains(&secs) {
        return Err(QuantlabError::Config(format!(
            "{field} must be between 1 and 86400"
        )));
    }
    Ok(())
}
