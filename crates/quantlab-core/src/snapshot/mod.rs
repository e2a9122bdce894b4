//! Snapshot documents (breadth metrics + price series).
//!
//! A document is parsed whole or not at all: `Document::parse` either yields a
//! complete value or `QuantlabError::Malformed`. Field lookups inside a parsed
//! snapshot are best-effort and surface absence as `Metric::Missing`.

pub mod metric;
pub mod series;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{QuantlabError, Result};

pub use metric::Metric;
pub use series::{PricePoint, PriceSeries};

/// Reserved `data` keys that carry a metric block rather than an index row.
pub const SPY_OPTIONS: &str = "SPY_Options";
pub const SPY_FLOW: &str = "SPY_Flow";
pub const VOLATILITY: &str = "Volatility";
pub const CURRENCIES: &str = "Currencies";

pub const RESERVED_CATEGORIES: [&str; 4] = [SPY_OPTIONS, SPY_FLOW, VOLATILITY, CURRENCIES];

/// A document fetched from the object store.
pub trait Document: DeserializeOwned + Send + Sync + 'static {
    /// Short name used in log fields and metric labels.
    const NAME: &'static str;

    /// Parse a full object body.
    fn parse(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body)
            .map_err(|e| QuantlabError::Malformed(format!("{}: {e}", Self::NAME)))
    }
}

/// The full metrics document for one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Display-only; never parsed.
    pub timestamp: String,
    /// Category key -> named metrics. Keeps document order.
    pub data: Map<String, Value>,
}

impl Document for Snapshot {
    const NAME: &'static str = "snapshot";
}

impl Snapshot {
    /// Metrics of a category, if present and shaped as an object.
    pub fn category(&self, name: &str) -> Option<&Map<String, Value>> {
        self.data.get(name).and_then(Value::as_object)
    }

    /// Best-effort metric lookup.
    pub fn metric(&self, category: &str, name: &str) -> Metric<'_> {
        Metric::from_value(self.category(category).and_then(|m| m.get(name)))
    }

    /// Non-reserved categories in document order.
    ///
    /// A category whose value is not an object is still yielded (with `None`)
    /// so it shows up as a row of placeholders instead of vanishing.
    pub fn index_categories(&self) -> impl Iterator<Item = (&str, Option<&Map<String, Value>>)> {
        self.data
            .iter()
            .filter(|(k, _)| !RESERVED_CATEGORIES.contains(&k.as_str()))
            .map(|(k, v)| (k.as_str(), v.as_object()))
    }
}
