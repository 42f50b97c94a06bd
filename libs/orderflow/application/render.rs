//! Entry points turning book snapshots into a chart

use crate::domain::{Result, Snapshot, TradeInput, TradeSeries};

use super::layout::OrderFlowLayout;
use super::visualizer::{ChartStyle, OrderFlowChart};

/// Build the order flow chart with the default style
pub fn render(book: &[Snapshot], trades: Option<&TradeSeries>) -> Result<OrderFlowChart> {
    render_with_style(book, trades, ChartStyle::default())
}

/// Build the order flow chart; marker sizes use the style's marker scale
pub fn render_with_style(
    book: &[Snapshot],
    trades: Option<&TradeSeries>,
    style: ChartStyle,
) -> Result<OrderFlowChart> {
    let layout = OrderFlowLayout::build_with_scale(book, trades, style.marker_scale)?;
    Ok(OrderFlowChart::new(layout, style))
}

/// Build the chart from loose, individually optional overlay sequences
pub fn render_sequences(book: &[Snapshot], trades: TradeInput) -> Result<OrderFlowChart> {
    render_sequences_with_style(book, trades, ChartStyle::default())
}

/// Like [`render_sequences`], drawn with the given style
pub fn render_sequences_with_style(
    book: &[Snapshot],
    trades: TradeInput,
    style: ChartStyle,
) -> Result<OrderFlowChart> {
    let series = trades.into_series()?;
    render_with_style(book, series.as_ref(), style)
}
