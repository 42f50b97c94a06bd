//! Order flow layout
//!
//! Turns a sequence of book snapshots (and an optional trade series) into the
//! geometry of the chart: volume bars, a price ladder, spread bands and the
//! trade overlay. Everything is validated here, before any drawing happens.

use tracing::{debug, warn};

use crate::domain::{RenderError, Result, Side, Snapshot, TradeSeries};

pub const TITLE: &str = "Order Flow";
pub const X_LABEL: &str = "Time";
pub const Y_LABEL: &str = "Price";

/// Width of a volume bar, centered on its time step
pub const BAR_WIDTH: f64 = 1.0;

/// A spread band extends this far either side of its time step
pub const SPREAD_HALF_WIDTH: f64 = 0.5;

/// Marker area per unit of executed volume
pub const DEFAULT_MARKER_SCALE: f64 = 20.0;

// =============================================================================
// Layout primitives
// =============================================================================

/// Resting liquidity at one level, as a tower growing away from its price
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub time: f64,
    pub price: f64,
    /// Normalized volume, positive for asks (upward) and negative for bids (downward)
    pub extent: f64,
    pub side: Side,
}

impl Bar {
    /// Bar length in [0, 1]
    pub fn normalized_volume(&self) -> f64 {
        self.extent.abs()
    }

    pub fn x_range(&self) -> (f64, f64) {
        let half = BAR_WIDTH / 2.0;
        (self.time - half, self.time + half)
    }

    pub fn y_range(&self) -> (f64, f64) {
        let end = self.price + self.extent;
        (self.price.min(end), self.price.max(end))
    }
}

/// Band between the best bid and best ask at one time step.
/// On a crossed book `best_bid > best_ask` and the band is inverted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadFill {
    pub time: f64,
    pub best_bid: f64,
    pub best_ask: f64,
}

impl SpreadFill {
    pub fn low(&self) -> f64 {
        self.best_bid
    }

    pub fn high(&self) -> f64 {
        self.best_ask
    }

    pub fn x_range(&self) -> (f64, f64) {
        (self.time - SPREAD_HALF_WIDTH, self.time + SPREAD_HALF_WIDTH)
    }

    pub fn is_crossed(&self) -> bool {
        self.best_bid > self.best_ask
    }
}

/// Scatter point on the price line; `size` is a marker area, zero means invisible
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeMarker {
    pub step: f64,
    pub price: f64,
    pub size: f64,
}

impl TradeMarker {
    pub fn is_visible(&self) -> bool {
        self.size > 0.0
    }
}

/// Trade price line plus buy and sell markers at every step
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TradeOverlay {
    pub line: Vec<(f64, f64)>,
    /// Empty when the series carries no trade flow
    pub buys: Vec<TradeMarker>,
    pub sells: Vec<TradeMarker>,
}

impl TradeOverlay {
    fn build(series: &TradeSeries, marker_scale: f64) -> Self {
        let line: Vec<(f64, f64)> = series.points().collect();

        let (buys, sells) = match series.flow() {
            Some(flow) => {
                let markers = |volumes: Vec<f64>| -> Vec<TradeMarker> {
                    line.iter()
                        .zip(volumes)
                        .map(|(&(step, price), v)| TradeMarker {
                            step,
                            price,
                            size: v * marker_scale,
                        })
                        .collect()
                };
                (
                    markers(flow.buy_volumes().collect()),
                    markers(flow.sell_volumes().collect()),
                )
            }
            None => (Vec::new(), Vec::new()),
        };

        Self { line, buys, sells }
    }

    fn price_range(&self) -> Option<(f64, f64)> {
        min_max(self.line.iter().map(|(_, p)| *p))
    }
}

// =============================================================================
// OrderFlowLayout
// =============================================================================

/// Complete chart geometry for one render call
#[derive(Debug, Clone, PartialEq)]
pub struct OrderFlowLayout {
    pub max_volume: f64,
    /// Ask bars first, then bid bars, each in input order
    pub bars: Vec<Bar>,
    /// Distinct level prices, ascending
    pub gridlines: Vec<f64>,
    /// One band per time step holding both sides, ascending by time
    pub spreads: Vec<SpreadFill>,
    pub x_limits: (f64, f64),
    pub overlay: Option<TradeOverlay>,
}

impl OrderFlowLayout {
    /// Build the layout with the default marker scale
    pub fn build(book: &[Snapshot], trades: Option<&TradeSeries>) -> Result<Self> {
        Self::build_with_scale(book, trades, DEFAULT_MARKER_SCALE)
    }

    pub fn build_with_scale(
        book: &[Snapshot],
        trades: Option<&TradeSeries>,
        marker_scale: f64,
    ) -> Result<Self> {
        if book.is_empty() {
            return Err(RenderError::InvalidInput(
                "book state sequence is empty".to_string(),
            ));
        }
        if let Some(step) = book.iter().position(Snapshot::is_empty) {
            return Err(RenderError::InvalidInput(format!(
                "snapshot {} has no levels",
                step
            )));
        }

        // Partition by side, keeping relative order
        let mut asks = Vec::new();
        let mut bids = Vec::new();
        for level in book.iter().flat_map(Snapshot::iter) {
            level.validate()?;
            match level.side {
                Side::Ask => asks.push(*level),
                Side::Bid => bids.push(*level),
            }
        }

        if asks.is_empty() {
            return Err(RenderError::InvalidInput(
                "no ask levels in the book state sequence".to_string(),
            ));
        }
        if bids.is_empty() {
            return Err(RenderError::InvalidInput(
                "no bid levels in the book state sequence".to_string(),
            ));
        }

        let max_volume = asks
            .iter()
            .chain(&bids)
            .map(|l| l.volume)
            .fold(0.0_f64, f64::max);
        if max_volume == 0.0 {
            return Err(RenderError::DegenerateInput(
                "all level volumes are zero, cannot normalize".to_string(),
            ));
        }

        let bars: Vec<Bar> = asks
            .iter()
            .map(|l| Bar {
                time: l.time,
                price: l.price,
                extent: l.volume / max_volume,
                side: Side::Ask,
            })
            .chain(bids.iter().map(|l| Bar {
                time: l.time,
                price: l.price,
                extent: -(l.volume / max_volume),
                side: Side::Bid,
            }))
            .collect();

        let gridlines = distinct_sorted(asks.iter().chain(&bids).map(|l| l.price));
        let times = distinct_sorted(asks.iter().chain(&bids).map(|l| l.time));

        let mut spreads = Vec::new();
        for &t in &times {
            let best_ask = min_max(asks.iter().filter(|l| l.time == t).map(|l| l.price));
            let best_bid = min_max(bids.iter().filter(|l| l.time == t).map(|l| l.price));

            if let (Some((best_ask, _)), Some((_, best_bid))) = (best_ask, best_bid) {
                let fill = SpreadFill {
                    time: t,
                    best_bid,
                    best_ask,
                };
                if fill.is_crossed() {
                    warn!(
                        "Crossed book at t={}: best bid {} above best ask {}",
                        t, best_bid, best_ask
                    );
                }
                spreads.push(fill);
            }
        }

        // `times` is non-empty: both sides hold at least one level
        let x_limits = (times[0], times[times.len() - 1]);

        let overlay = trades
            .filter(|series| !series.is_empty())
            .map(|series| TradeOverlay::build(series, marker_scale));

        debug!(
            "Order flow layout: {} bars, {} gridlines, {} spreads, max volume {}, overlay: {}",
            bars.len(),
            gridlines.len(),
            spreads.len(),
            max_volume,
            overlay.is_some()
        );

        Ok(Self {
            max_volume,
            bars,
            gridlines,
            spreads,
            x_limits,
            overlay,
        })
    }

    pub fn ask_bars(&self) -> impl Iterator<Item = &Bar> {
        self.bars.iter().filter(|b| b.side == Side::Ask)
    }

    pub fn bid_bars(&self) -> impl Iterator<Item = &Bar> {
        self.bars.iter().filter(|b| b.side == Side::Bid)
    }

    /// Lowest and highest price any drawn element reaches
    pub fn price_range(&self) -> (f64, f64) {
        let bars = self.bars.iter().flat_map(|b| {
            let (lo, hi) = b.y_range();
            [lo, hi]
        });
        let spreads = self.spreads.iter().flat_map(|s| [s.low(), s.high()]);
        let (lo, hi) = min_max(bars.chain(spreads)).unwrap_or((0.0, 0.0));

        match self.overlay.as_ref().and_then(TradeOverlay::price_range) {
            Some((tlo, thi)) => (lo.min(tlo), hi.max(thi)),
            None => (lo, hi),
        }
    }
}

fn distinct_sorted(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut values: Vec<f64> = values.collect();
    values.sort_by(f64::total_cmp);
    values.dedup();
    values
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
