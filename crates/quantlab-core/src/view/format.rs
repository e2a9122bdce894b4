//! Display formatting for metric values.
//!
//! Numbers get a fixed precision or thousands separators; strings pass through
//! untouched; anything absent becomes [`PLACEHOLDER`].

use crate::snapshot::Metric;

/// Shown in place of an absent metric.
pub const PLACEHOLDER: &str = "N/A";

/// Number with `precision` decimals (`0.85`, `1.0850`).
pub fn fixed(m: Metric<'_>, precision: usize) -> String {
    match m {
        Metric::Number(n) => match n.as_f64() {
            Some(f) => format!("{f:.precision$}"),
            None => n.to_string(),
        },
        other => passthrough(other),
    }
}

/// Number with thousands separators (`120,000`, `-1,234.5`).
pub fn grouped(m: Metric<'_>) -> String {
    match m {
        Metric::Number(n) => {
            if let Some(i) = n.as_i64() {
                signed(i < 0, &group_thousands(&i.unsigned_abs().to_string()))
            } else if let Some(u) = n.as_u64() {
                group_thousands(&u.to_string())
            } else {
                let f = n.as_f64().unwrap_or_default();
                let abs = f.abs().to_string();
                let body = match abs.split_once('.') {
                    Some((int, frac)) => format!("{}.{frac}", group_thousands(int)),
                    None => group_thousands(&abs),
                };
                signed(f < 0.0, &body)
            }
        }
        other => passthrough(other),
    }
}

/// Thousands-grouped count where an absent value means zero.
pub fn count(m: Metric<'_>) -> String {
    if m.is_missing() {
        "0".to_string()
    } else {
        grouped(m)
    }
}

/// Number as written in the document (`1.2`, `87.5`, `120000`).
pub fn plain(m: Metric<'_>) -> String {
    match m {
        Metric::Number(n) => n.to_string(),
        other => passthrough(other),
    }
}

fn passthrough(m: Metric<'_>) -> String {
    match m {
        Metric::Number(n) => n.to_string(),
        Metric::Text(s) => s.to_string(),
        Metric::Other(v) => v.to_string(),
        Metric::Missing => PLACEHOLDER.to_string(),
    }
}

fn signed(negative: bool, body: &str) -> String {
    if negative {
        format!("-{body}")
    } else {
        body.to_string()
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
