//! Close-price series backing the dashboard chart.

use serde::{Deserialize, Serialize};

use super::Document;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: String,
    pub close: f64,
}

/// Daily closes, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    #[serde(default)]
    pub symbol: Option<String>,
    pub points: Vec<PricePoint>,
}

impl Document for PriceSeries {
    const NAME: &'static str = "price_series";
}

impl PriceSeries {
    /// The last `n` points (all of them when shorter).
    pub fn tail(&self, n: usize) -> &[PricePoint] {
        let start = self.points.len().saturating_sub(n);
        &self.points[start..]
    }
}
