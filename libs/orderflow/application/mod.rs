//! Application Layer
//!
//! Order flow layout computation and its terminal rendering.

pub mod layout;
pub mod render;
pub mod visualizer;

pub use layout::{Bar, OrderFlowLayout, SpreadFill, TradeMarker, TradeOverlay};
pub use render::{render, render_sequences, render_sequences_with_style, render_with_style};
pub use visualizer::{show, show_book, ChartStyle, OrderFlowChart, ViewerError};
