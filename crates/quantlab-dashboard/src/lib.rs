//! QuantLab dashboard library entry.
//!
//! This crate wires the object store, the TTL-cached document fetchers, HTML
//! rendering and the operational endpoints into one axum service. It is
//! intended to be consumed by the binary (`main.rs`) and by integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod app_state;
pub mod cache;
pub mod config;
pub mod fetch;
pub mod obs;
pub mod ops;
pub mod pages;
pub mod render;
pub mod router;
pub mod store;
