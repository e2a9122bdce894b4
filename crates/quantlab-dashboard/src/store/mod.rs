//! Object stores the dashboard reads its documents from.
//!
//! The fetch path only sees `dyn ObjectStore`, so tests and local runs swap in
//! a directory or an in-memory fake without touching cache or rendering code.

pub mod file;
pub mod s3;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use quantlab_core::error::Result;

use crate::config::{StoreConfig, StoreKind};

pub use file::FileStore;
pub use s3::S3Store;

/// Read-only access to named objects.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Full body of `key`. Missing objects are `QuantlabError::NotFound`.
    async fn get_object(&self, key: &str) -> Result<Bytes>;

    /// Human-readable location, for startup logs.
    fn describe(&self) -> String;
}

/// Build the configured store. Failure here is fatal for the process.
pub async fn from_config(cfg: &StoreConfig) -> Result<Arc<dyn ObjectStore>> {
    match cfg.kind {
        StoreKind::S3 => Ok(Arc::new(S3Store::new(cfg).await)),
        StoreKind::File => {
            let root = cfg.root.clone().unwrap_or_default();
            Ok(Arc::new(FileStore::new(root)?))
        }
    }
}
