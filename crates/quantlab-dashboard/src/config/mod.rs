//! Dashboard config loader (strict parsing).

pub mod schema;

use std::fs;

use quantlab_core::error::{QuantlabError, Result};

pub use schema::{ChartConfig, DashboardConfig, DashboardSection, SnapshotConfig, StoreConfig, StoreKind};

/// Used when neither a CLI argument nor `QUANTLAB_CONFIG` names a file.
pub const DEFAULT_CONFIG_PATH: &str = "quantlab.yaml";

/// First CLI argument, else `QUANTLAB_CONFIG`, else [`DEFAULT_CONFIG_PATH`].
pub fn resolve_path(arg: Option<String>, env: Option<String>) -> String {
    arg.or(env).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}

pub fn load_from_file(path: &str) -> Result<DashboardConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| QuantlabError::Config(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<DashboardConfig> {
    let cfg: DashboardConfig = serde_yaml::from_str(s)
        .map_err(|e| QuantlabError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
