//! Shared builders for order flow integration tests

#![allow(dead_code)]

use orderflow::{Level, Side, Snapshot};

/// Build a book from `(time, price, volume, side)` tuples grouped by snapshot
pub fn book(snapshots: &[&[(f64, f64, f64, &str)]]) -> Vec<Snapshot> {
    snapshots
        .iter()
        .map(|levels| {
            levels
                .iter()
                .map(|&(t, p, v, side)| {
                    Level::from_tagged(t, p, v, side).expect("valid side tag in test data")
                })
                .collect()
        })
        .collect()
}

/// Distinct prices on the given side at time `t`
pub fn prices_at(book: &[Snapshot], t: f64, side: Side) -> Vec<f64> {
    book.iter()
        .flat_map(Snapshot::iter)
        .filter(|l| l.time == t && l.side == side)
        .map(|l| l.price)
        .collect()
}
