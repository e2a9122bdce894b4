//! Local directory store, for development and offline demos.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;

use quantlab_core::error::{QuantlabError, Result};

use super::ObjectStore;

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(QuantlabError::Config(format!(
                "store.root is not a directory: {}",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    /// Keys may only name paths below the root.
    fn resolve(&self, key: &str) -> Result<PathBuf> {
        let rel = Path::new(key);
        if key.is_empty() || !rel.components().all(|c| matches!(c, Component::Normal(_))) {
            return Err(QuantlabError::NotFound(format!("invalid object key: {key:?}")));
        }
        Ok(self.root.join(rel))
    }
}

#[async_trait]
impl ObjectStore for FileStore {
    async fn get_object(&self, key: &str) -> Result<Bytes> {
        let path = self.resolve(key)?;
        match tokio::fs::read(&path).await {
            Ok(buf) => Ok(Bytes::from(buf)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(QuantlabError::NotFound(path.display().to_string()))
            }
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                Err(QuantlabError::AccessDenied(format!("{}: {e}", path.display())))
            }
            Err(e) => Err(QuantlabError::Unreachable(format!("{}: {e}", path.display()))),
        }
    }

    fn describe(&self) -> String {
        format!("file://{}", self.root.display())
    }
}
