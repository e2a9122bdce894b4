//! Server-side HTML for the dashboard page.
//!
//! Rendering is a pure function of the view model: no I/O, no fetching. Every
//! string that came from a document goes through [`escape`].

pub mod chart;
pub mod html;

use std::time::Duration;

use quantlab_core::view::{ChartView, DashboardView};

pub use html::{dashboard_page, error_page, escape};

pub const UNAVAILABLE_MESSAGE: &str =
    "Failed to load data from S3. Please check the Lambda function and S3 bucket.";
pub const FOOTER: &str = "Built with QuantLab | Data sourced from FMP and Polygon.io";

/// Everything one page render needs.
pub struct PageContext<'a> {
    pub title: &'a str,
    pub view: &'a DashboardView,
    pub chart: Option<&'a ChartView>,
    /// Set when the snapshot is a stale copy kept after a failed refresh.
    pub stale_age: Option<Duration>,
}
