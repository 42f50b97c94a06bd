//! Reference data: a two-step book with three levels per side and a
//! four-step trade tape.

use super::book::{Level, Snapshot};
use super::error::Result;
use super::trades::TradeSeries;

/// Two snapshots, asks listed ascending and bids descending
pub fn sample_book() -> Vec<Snapshot> {
    vec![
        Snapshot::new(vec![
            Level::ask(1.0, 101.0, 2.0),
            Level::ask(1.0, 102.0, 7.0),
            Level::ask(1.0, 103.0, 2.0),
            Level::bid(1.0, 99.0, 5.0),
            Level::bid(1.0, 98.0, 7.0),
            Level::bid(1.0, 97.0, 2.0),
        ]),
        Snapshot::new(vec![
            Level::ask(2.0, 101.0, 4.0),
            Level::ask(2.0, 102.0, 7.0),
            Level::ask(2.0, 103.0, 2.0),
            Level::bid(2.0, 99.0, 5.0),
            Level::bid(2.0, 98.0, 7.0),
            Level::bid(2.0, 97.0, 2.0),
        ]),
    ]
}

/// Prices `[100, 98, 98, 102]`, a buy of 8, a sell of 7, an idle step and a buy of 3
pub fn sample_trades() -> Result<TradeSeries> {
    TradeSeries::new(vec![100.0, 98.0, 98.0, 102.0])?.with_flow(
        vec![8.0, 7.0, 0.0, 3.0],
        vec![true, false, false, true],
        vec![false, true, false, false],
    )
}
