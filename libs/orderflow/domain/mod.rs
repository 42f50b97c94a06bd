//! Domain Layer
//!
//! Order book snapshots, trade series and the validation errors raised on them.
//! This layer has no dependencies on the application or infrastructure layers.

pub mod book;
pub mod error;
pub mod sample;
pub mod trades;

pub use book::{Level, Side, Snapshot};
pub use error::{RenderError, Result};
pub use trades::{TradeFlow, TradeInput, TradeSeries};
