use serde_json::{Number, Value};

/// A single looked-up metric value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric<'a> {
    Number(&'a Number),
    Text(&'a str),
    /// Booleans, arrays, objects: shown as their JSON text.
    Other(&'a Value),
    /// Absent key or explicit `null`.
    Missing,
}

impl<'a> Metric<'a> {
    pub fn from_value(v: Option<&'a Value>) -> Self {
        match v {
            None | Some(Value::Null) => Metric::Missing,
            Some(Value::Number(n)) => Metric::Number(n),
            Some(Value::String(s)) => Metric::Text(s),
            Some(other) => Metric::Other(other),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Metric::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Metric::Missing)
    }
}
