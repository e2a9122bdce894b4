//! Line chart of recent closes.

use crate::snapshot::{PricePoint, PriceSeries};

/// Default number of trailing closes shown.
pub const DEFAULT_CHART_POINTS: usize = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub symbol: Option<String>,
    pub points: Vec<PricePoint>,
    pub min: f64,
    pub max: f64,
}

impl ChartView {
    /// Last `n` closes of `series`; `None` for an empty series.
    pub fn from_series(series: &PriceSeries, n: usize) -> Option<Self> {
        let points = series.tail(n).to_vec();
        let first = points.first()?.close;
        let (min, max) = points
            .iter()
            .fold((first, first), |(lo, hi), p| (lo.min(p.close), hi.max(p.close)));
        Some(Self {
            symbol: series.symbol.clone(),
            points,
            min,
            max,
        })
    }

    /// Points mapped into a `width` x `height` box, y growing downwards.
    ///
    /// A flat series sits on the vertical middle; a single point on the left edge.
    pub fn scaled(&self, width: f64, height: f64) -> Vec<(f64, f64)> {
        let span = self.max - self.min;
        let step = if self.points.len() > 1 {
            width / (self.points.len() - 1) as f64
        } else {
            0.0
        };
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let y = if span > 0.0 {
                    height - (p.close - self.min) / span * height
                } else {
                    height / 2.0
                };
                (i as f64 * step, y)
            })
            .collect()
    }
}
