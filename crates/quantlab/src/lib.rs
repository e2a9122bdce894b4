//! Top-level facade crate for QuantLab.
//!
//! Re-exports the snapshot model and the dashboard service so users can depend on a single crate.

pub mod core {
    pub use quantlab_core::*;
}

pub mod dashboard {
    pub use quantlab_dashboard::*;
}
