//! Snapshot document vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use quantlab_core::snapshot::{Metric, PriceSeries};
use quantlab_core::{Document, FailureKind, Snapshot};

fn load(name: &str) -> Vec<u8> {
    fs::read(format!("tests/vectors/{name}")).unwrap()
}

#[test]
fn parse_full_snapshot() {
    let s = Snapshot::parse(&load("breadth_full.json")).unwrap();
    assert_eq!(s.timestamp, "2024-01-01T00:00:00Z");
    assert_eq!(s.data.len(), 4);
    assert_eq!(s.metric("SPY_Options", "put_call_ratio").as_f64(), Some(0.85));
}

#[test]
fn index_categories_skip_reserved_and_keep_order() {
    let s = Snapshot::parse(&load("breadth_partial.json")).unwrap();
    let names: Vec<&str> = s.index_categories().map(|(k, _)| k).collect();
    assert_eq!(names, vec!["QQQ", "IWM", "DIA"]);

    let (_, iwm) = s.index_categories().nth(1).unwrap();
    assert!(iwm.is_none());
}

#[test]
fn missing_lookups_are_markers() {
    let s = Snapshot::parse(&load("breadth_partial.json")).unwrap();
    assert!(s.metric("Currencies", "eur_usd").is_missing());
    assert!(s.metric("QQQ", "percent_52w_high").is_missing());
    assert!(s.metric("IWM", "momentum_factor").is_missing());
    assert_eq!(s.metric("SPY_Options", "put_call_ratio"), Metric::Text("n/a upstream"));
}

#[test]
fn wrong_shape_is_malformed() {
    let err = Snapshot::parse(&load("not_a_snapshot.json")).expect_err("must fail");
    assert_eq!(err.kind(), FailureKind::Malformed);
}

#[test]
fn garbage_body_is_malformed() {
    let bodies: [&[u8]; 4] = [
        b"",
        b"<Error><Code>NoSuchKey</Code></Error>",
        b"{\"timestamp\":",
        &[0xff, 0xfe],
    ];
    for body in bodies {
        let err = Snapshot::parse(body).expect_err("must fail");
        assert_eq!(err.kind().as_str(), "MALFORMED");
    }
}

#[test]
fn parse_price_series() {
    let p = PriceSeries::parse(&load("prices_spy.json")).unwrap();
    assert_eq!(p.symbol.as_deref(), Some("SPY"));
    assert_eq!(p.points.len(), 5);
    assert_eq!(p.tail(2)[0].date, "2024-01-05");
    assert_eq!(p.tail(50).len(), 5);
}
