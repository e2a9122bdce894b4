//! QuantLab core: the snapshot document model, best-effort metric lookups,
//! value formatting and the dashboard view model.
//!
//! This crate knows nothing about object stores, HTTP or HTML. It turns a
//! finished metrics document into display-ready strings so the dashboard
//! service (and tests) can reason about what a page shows without a browser.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. A missing category
//! or metric is a placeholder, never a crash.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod snapshot;
pub mod view;

/// Shared result type.
pub use error::{FailureKind, QuantlabError, Result};
pub use snapshot::{Document, Snapshot};
