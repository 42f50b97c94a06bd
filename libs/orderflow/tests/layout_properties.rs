//! Property-based tests for the order flow layout
//!
//! Uses proptest to verify invariants that should hold for all valid books.
//!
//! Run with: cargo test -p orderflow layout_properties

mod common;

use std::collections::BTreeSet;

use orderflow::{Level, OrderFlowLayout, Side, Snapshot, TradeSeries};
use proptest::prelude::*;

/// Books with integer times 1..=8, tick-sized prices and non-negative volumes.
/// Every generated book holds at least one ask and one bid with positive volume.
fn arb_book() -> impl Strategy<Value = Vec<Snapshot>> {
    let level = (1u8..=8, 90u16..=110, 0u16..=50, any::<bool>()).prop_map(|(t, p, v, is_ask)| {
        let side = if is_ask { Side::Ask } else { Side::Bid };
        Level::new(f64::from(t), f64::from(p), f64::from(v), side)
    });

    (prop::collection::vec(prop::collection::vec(level, 1..6), 1..8), 1u16..=50).prop_map(
        |(mut snapshots, anchor_volume)| {
            snapshots[0].push(Level::ask(1.0, 111.0, f64::from(anchor_volume)));
            snapshots[0].push(Level::bid(1.0, 89.0, 1.0));
            snapshots.into_iter().map(Snapshot::new).collect()
        },
    )
}

fn key(v: f64) -> i64 {
    v as i64
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Every bar length lies in [0, 1]
    #[test]
    fn normalized_volume_bounded(book in arb_book()) {
        let layout = OrderFlowLayout::build(&book, None).unwrap();
        for bar in &layout.bars {
            let v = bar.normalized_volume();
            prop_assert!((0.0..=1.0).contains(&v), "normalized volume {} out of range", v);
        }
    }

    /// The largest level normalizes to exactly 1
    #[test]
    fn max_normalized_volume_is_one(book in arb_book()) {
        let layout = OrderFlowLayout::build(&book, None).unwrap();
        let max = layout.bars.iter().map(|b| b.normalized_volume()).fold(0.0_f64, f64::max);
        prop_assert_eq!(max, 1.0);
    }

    /// Asks grow upward from their price, bids downward
    #[test]
    fn bar_direction_follows_side(book in arb_book()) {
        let layout = OrderFlowLayout::build(&book, None).unwrap();
        prop_assert!(layout.ask_bars().all(|b| b.extent >= 0.0));
        prop_assert!(layout.bid_bars().all(|b| b.extent <= 0.0));
        prop_assert_eq!(layout.bars.len(), book.iter().map(Snapshot::len).sum::<usize>());
    }

    /// Gridlines are exactly the distinct level prices
    #[test]
    fn gridlines_are_distinct_prices(book in arb_book()) {
        let layout = OrderFlowLayout::build(&book, None).unwrap();
        let expected: BTreeSet<i64> = book.iter().flat_map(Snapshot::iter).map(|l| key(l.price)).collect();
        let actual: Vec<i64> = layout.gridlines.iter().map(|p| key(*p)).collect();

        prop_assert_eq!(actual.len(), expected.len());
        prop_assert_eq!(actual, expected.into_iter().collect::<Vec<_>>());
    }

    /// A spread band exists for a step iff it holds both sides, spanning best bid to best ask
    #[test]
    fn spread_iff_both_sides(book in arb_book()) {
        let layout = OrderFlowLayout::build(&book, None).unwrap();
        let times: BTreeSet<i64> = book.iter().flat_map(Snapshot::iter).map(|l| key(l.time)).collect();

        for t in times {
            let t = t as f64;
            let asks = common::prices_at(&book, t, Side::Ask);
            let bids = common::prices_at(&book, t, Side::Bid);
            let band = layout.spreads.iter().find(|s| s.time == t);

            if asks.is_empty() || bids.is_empty() {
                prop_assert!(band.is_none(), "unexpected spread at t={}", t);
            } else {
                let band = band.unwrap();
                prop_assert_eq!(band.best_ask, asks.iter().cloned().fold(f64::INFINITY, f64::min));
                prop_assert_eq!(band.best_bid, bids.iter().cloned().fold(f64::NEG_INFINITY, f64::max));
            }
        }
    }

    /// Marker size is volume times flag times scale, zero when neither flag is set
    #[test]
    fn marker_size_proportional_to_flow(
        steps in prop::collection::vec((90u16..=110, 0u16..=20, any::<bool>(), any::<bool>()), 1..20),
        scale in 1.0..50.0f64,
    ) {
        let prices = steps.iter().map(|s| f64::from(s.0)).collect();
        let volumes: Vec<f64> = steps.iter().map(|s| f64::from(s.1)).collect();
        let buys: Vec<bool> = steps.iter().map(|s| s.2).collect();
        let sells: Vec<bool> = steps.iter().map(|s| s.3 && !s.2).collect();
        let series = TradeSeries::new(prices).unwrap()
            .with_flow(volumes.clone(), buys.clone(), sells.clone()).unwrap();

        let book = vec![Snapshot::new(vec![Level::ask(1.0, 101.0, 1.0), Level::bid(1.0, 99.0, 1.0)])];
        let layout = OrderFlowLayout::build_with_scale(&book, Some(&series), scale).unwrap();
        let overlay = layout.overlay.unwrap();

        for i in 0..steps.len() {
            let buy = if buys[i] { volumes[i] * scale } else { 0.0 };
            let sell = if sells[i] { volumes[i] * scale } else { 0.0 };
            prop_assert_eq!(overlay.buys[i].size, buy);
            prop_assert_eq!(overlay.sells[i].size, sell);
            prop_assert_eq!(overlay.buys[i].step, (i + 1) as f64);
        }
    }
}
