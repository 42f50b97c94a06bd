//! Order Flow
//!
//! Renders a sequence of limit order book snapshots as an order flow chart:
//! resting volume as bars growing away from each price, a dashed price
//! ladder, the bid-ask spread shaded per time step, and an optional overlay
//! of executed trade prices with buy and sell markers sized by volume.
//!
//! ```no_run
//! use orderflow::domain::sample::{sample_book, sample_trades};
//!
//! let trades = sample_trades()?;
//! let chart = orderflow::render(&sample_book(), Some(&trades))?;
//! println!("{}", chart.to_text(100, 30));
//! # Ok::<(), orderflow::RenderError>(())
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used items
pub use application::{
    render, render_sequences, render_sequences_with_style, render_with_style, show, show_book,
    ChartStyle, OrderFlowChart, OrderFlowLayout, ViewerError,
};
pub use domain::{Level, RenderError, Side, Snapshot, TradeInput, TradeSeries};
pub use infrastructure::{init_tracing, ConfigError, ViewerConfig};
