//! In-memory object store shared by the dashboard tests.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashMap;
use std::fs;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use quantlab_core::error::{QuantlabError, Result};
use quantlab_dashboard::config::{self, DashboardConfig};
use quantlab_dashboard::store::ObjectStore;

pub fn vector(name: &str) -> Vec<u8> {
    fs::read(format!("tests/vectors/{name}")).unwrap()
}

pub fn load_config(yaml: &str) -> DashboardConfig {
    config::load_from_str(yaml).expect("test config must parse")
}

/// Objects by key, a per-key read counter, and a switch that makes every
/// read fail as if the store were down.
#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    calls: Mutex<HashMap<String, usize>>,
    down: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, key: &str, body: impl Into<Vec<u8>>) {
        self.objects.lock().unwrap().insert(key.to_string(), body.into());
    }

    pub fn remove(&self, key: &str) {
        self.objects.lock().unwrap().remove(key);
    }

    pub fn set_down(&self, down: bool) {
        *self.down.lock().unwrap() = down;
    }

    pub fn calls(&self, key: &str) -> usize {
        self.calls.lock().unwrap().get(key).copied().unwrap_or(0)
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn get_object(&self, key: &str) -> Result<Bytes> {
        *self.calls.lock().unwrap().entry(key.to_string()).or_insert(0) += 1;
        if *self.down.lock().unwrap() {
            return Err(QuantlabError::Unreachable("connection refused".into()));
        }
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .map(|b| Bytes::from(b.clone()))
            .ok_or_else(|| QuantlabError::NotFound(format!("mem://{key}")))
    }

    fn describe(&self) -> String {
        "mem://".into()
    }
}
