//! Dashboard view model.
//!
//! Maps a [`Snapshot`] onto the page's widgets: the breadth table, the metric
//! blocks and the backwardation flag. Every block is built independently, so
//! a missing category only blanks its own lines.

pub mod chart;
pub mod format;

use crate::snapshot::{Metric, Snapshot, CURRENCIES, SPY_FLOW, SPY_OPTIONS, VOLATILITY};

pub use chart::ChartView;
pub use format::PLACEHOLDER;

/// VIX term structure above this reads as backwardation.
pub const BACKWARDATION_THRESHOLD: f64 = 0.05;
pub const BACKWARDATION_WARNING: &str = "Market in Backwardation (Potential Bearish Signal)";

/// One row of the breadth and momentum table.
#[derive(Debug, Clone, PartialEq)]
pub struct BreadthRow {
    pub index: String,
    pub momentum_factor: String,
    pub percent_52w_high: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricLine {
    pub label: &'static str,
    pub value: String,
}

/// A titled list of labeled values.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricBlock {
    pub title: &'static str,
    pub lines: Vec<MetricLine>,
}

impl MetricBlock {
    fn new(title: &'static str, lines: Vec<(&'static str, String)>) -> Self {
        Self {
            title,
            lines: lines
                .into_iter()
                .map(|(label, value)| MetricLine { label, value })
                .collect(),
        }
    }

    /// Displayed value for `label`.
    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|l| l.label == label)
            .map(|l| l.value.as_str())
    }
}

/// Everything the dashboard page shows for one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub updated: String,
    pub breadth_rows: Vec<BreadthRow>,
    pub options: MetricBlock,
    /// Only when the document carries a non-empty order flow category.
    pub flow: Option<MetricBlock>,
    pub volatility: MetricBlock,
    pub currencies: MetricBlock,
    pub backwardation: bool,
}

impl DashboardView {
    pub fn from_snapshot(s: &Snapshot) -> Self {
        Self {
            updated: s.timestamp.clone(),
            breadth_rows: breadth_rows(s),
            options: options_block(s),
            flow: flow_block(s),
            volatility: volatility_block(s),
            currencies: currencies_block(s),
            backwardation: is_backwardation(s),
        }
    }

    /// Blocks in page order.
    pub fn blocks(&self) -> Vec<&MetricBlock> {
        let mut out = vec![&self.options];
        if let Some(flow) = &self.flow {
            out.push(flow);
        }
        out.push(&self.volatility);
        out.push(&self.currencies);
        out
    }
}

fn breadth_rows(s: &Snapshot) -> Vec<BreadthRow> {
    s.index_categories()
        .map(|(index, metrics)| {
            let get = |k: &str| format::plain(Metric::from_value(metrics.and_then(|m| m.get(k))));
            BreadthRow {
                index: index.to_string(),
                momentum_factor: get("momentum_factor"),
                percent_52w_high: get("percent_52w_high"),
            }
        })
        .collect()
}

fn options_block(s: &Snapshot) -> MetricBlock {
    let m = |k| s.metric(SPY_OPTIONS, k);
    MetricBlock::new(
        "SPY Options Data",
        vec![
            ("Put/Call Ratio", format::fixed(m("put_call_ratio"), 2)),
            ("Open Interest", format::grouped(m("open_interest"))),
            ("Implied Volatility", format::fixed(m("implied_volatility"), 2)),
        ],
    )
}

fn flow_block(s: &Snapshot) -> Option<MetricBlock> {
    let flow = s.category(SPY_FLOW).filter(|f| !f.is_empty())?;
    let m = |k: &str| Metric::from_value(flow.get(k));
    Some(MetricBlock::new(
        "SPY Order Flow",
        vec![
            ("Put Buys", format::count(m("put_buys"))),
            ("Put Sells", format::count(m("put_sells"))),
            ("Call Buys", format::count(m("call_buys"))),
            ("Call Sells", format::count(m("call_sells"))),
            ("Whale Sentiment", format::plain(m("whale_sentiment"))),
        ],
    ))
}

fn volatility_block(s: &Snapshot) -> MetricBlock {
    let m = |k| s.metric(VOLATILITY, k);
    MetricBlock::new(
        "Volatility Metrics",
        vec![
            ("VIX Term Structure", format::fixed(m("vix_term_structure"), 2)),
            ("VIX Z-Score", format::fixed(m("z_score_vix"), 2)),
            ("VIX Volatility Clustering", format::fixed(m("vol_clustering_vix"), 4)),
        ],
    )
}

fn currencies_block(s: &Snapshot) -> MetricBlock {
    let m = |k| s.metric(CURRENCIES, k);
    MetricBlock::new(
        "Currency Metrics",
        vec![
            ("EUR/USD", format::fixed(m("eur_usd"), 4)),
            ("GBP/USD", format::fixed(m("gbp_usd"), 4)),
            ("EUR/USD Z-Score", format::fixed(m("z_score_eur_usd"), 2)),
            ("GBP/USD Z-Score", format::fixed(m("z_score_gbp_usd"), 2)),
            ("EUR/USD Volatility Clustering", format::fixed(m("vol_clustering_eur_usd"), 4)),
            ("GBP/USD Volatility Clustering", format::fixed(m("vol_clustering_gbp_usd"), 4)),
        ],
    )
}

fn is_backwardation(s: &Snapshot) -> bool {
    let term = s.metric(VOLATILITY, "vix_term_structure");
    match term {
        Metric::Missing => false,
        other => match other.as_f64() {
            Some(v) => v > BACKWARDATION_THRESHOLD,
            None => {
                tracing::debug!(value = ?other, "vix_term_structure is not numeric");
                false
            }
        },
    }
}
