//! Order Flow Visualizer
//!
//! ratatui rendering of an [`OrderFlowLayout`](crate::application::layout::OrderFlowLayout):
//! a canvas widget, its shapes and style, and an interactive terminal viewer.

pub mod chart;
pub mod shapes;
pub mod style;
pub mod viewer;

pub use chart::OrderFlowChart;
pub use shapes::Viewport;
pub use style::ChartStyle;
pub use viewer::{show, show_book, TerminalSession, ViewerError};
