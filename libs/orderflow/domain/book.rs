//! Order book snapshot entities
//!
//! A snapshot is the full list of resting levels at one time step. Asks are
//! conventionally listed ascending by price and bids descending; nothing here
//! enforces that ordering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{RenderError, Result};

// =============================================================================
// Side
// =============================================================================

/// Book side a level rests on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Ask,
    Bid,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Ask => "ask",
            Side::Bid => "bid",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ask" => Ok(Side::Ask),
            "bid" => Ok(Side::Bid),
            other => Err(RenderError::InvalidInput(format!(
                "unknown side tag '{}', expected 'ask' or 'bid'",
                other
            ))),
        }
    }
}

// =============================================================================
// Level
// =============================================================================

/// One (price, volume) entry on one side of the book at one time step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub time: f64,
    pub price: f64,
    pub volume: f64,
    pub side: Side,
}

impl Level {
    pub fn new(time: f64, price: f64, volume: f64, side: Side) -> Self {
        Self {
            time,
            price,
            volume,
            side,
        }
    }

    pub fn ask(time: f64, price: f64, volume: f64) -> Self {
        Self::new(time, price, volume, Side::Ask)
    }

    pub fn bid(time: f64, price: f64, volume: f64) -> Self {
        Self::new(time, price, volume, Side::Bid)
    }

    /// Build a level from the `(time, price, volume, "ask" | "bid")` tag form
    pub fn from_tagged(time: f64, price: f64, volume: f64, side: &str) -> Result<Self> {
        Ok(Self::new(time, price, volume, side.parse()?))
    }

    pub fn is_ask(&self) -> bool {
        self.side == Side::Ask
    }

    pub fn is_bid(&self) -> bool {
        self.side == Side::Bid
    }

    /// Check the numeric fields are usable as chart coordinates
    pub fn validate(&self) -> Result<()> {
        if !self.time.is_finite() {
            return Err(RenderError::InvalidInput(format!(
                "{} level has non-finite time {}",
                self.side, self.time
            )));
        }
        if !self.price.is_finite() {
            return Err(RenderError::InvalidInput(format!(
                "{} level at t={} has non-finite price {}",
                self.side, self.time, self.price
            )));
        }
        if !self.volume.is_finite() || self.volume < 0.0 {
            return Err(RenderError::InvalidInput(format!(
                "{} level at t={} price={} has invalid volume {}",
                self.side, self.time, self.price, self.volume
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Book state at one discrete time step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub levels: Vec<Level>,
}

impl Snapshot {
    pub fn new(levels: Vec<Level>) -> Self {
        Self { levels }
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter()
    }

    pub fn asks(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter().filter(|l| l.is_ask())
    }

    pub fn bids(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter().filter(|l| l.is_bid())
    }
}

impl From<Vec<Level>> for Snapshot {
    fn from(levels: Vec<Level>) -> Self {
        Self::new(levels)
    }
}

impl FromIterator<Level> for Snapshot {
    fn from_iter<I: IntoIterator<Item = Level>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_from_tag() {
        assert_eq!("ask".parse::<Side>().unwrap(), Side::Ask);
        assert_eq!("bid".parse::<Side>().unwrap(), Side::Bid);
        assert!(matches!(
            "offer".parse::<Side>(),
            Err(RenderError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_tagged() {
        let level = Level::from_tagged(1.0, 101.0, 2.0, "ask").unwrap();
        assert_eq!(level, Level::ask(1.0, 101.0, 2.0));
        assert!(Level::from_tagged(1.0, 101.0, 2.0, "ASK").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_numbers() {
        assert!(Level::bid(1.0, 99.0, 0.0).validate().is_ok());
        assert!(Level::bid(1.0, 99.0, -1.0).validate().is_err());
        assert!(Level::bid(1.0, f64::NAN, 1.0).validate().is_err());
        assert!(Level::ask(f64::INFINITY, 99.0, 1.0).validate().is_err());
        assert!(Level::ask(1.0, 99.0, f64::NAN).validate().is_err());
    }

    #[test]
    fn test_snapshot_side_filters() {
        let snapshot: Snapshot = vec![
            Level::ask(1.0, 101.0, 2.0),
            Level::ask(1.0, 102.0, 7.0),
            Level::bid(1.0, 99.0, 5.0),
        ]
        .into();

        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.asks().count(), 2);
        assert_eq!(snapshot.bids().count(), 1);
    }
}
