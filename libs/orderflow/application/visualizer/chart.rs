//! Order flow chart widget
//!
//! Layout inside the bordered "Order Flow" block:
//!
//! ```text
//! Price
//! 103.00 ┤ canvas
//!  ...   ┤
//!        1 ........ 2
//!             Time
//! ```

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Style},
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine},
        Block, Borders, Widget,
    },
};

use super::shapes::{DashedHLine, TradeDot, Viewport};
use super::style::ChartStyle;
use crate::application::layout::{OrderFlowLayout, TradeMarker, TITLE, X_LABEL, Y_LABEL};

/// Minimum spacing between x tick labels, in cells
const X_TICK_SPACING: u16 = 6;

/// A rendered order flow: the computed layout plus the style it is drawn with.
///
/// Draw it with `frame.render_widget(&chart, area)`, show it interactively
/// with [`super::viewer::show`], or export it with [`OrderFlowChart::to_text`].
#[derive(Debug, Clone, PartialEq)]
pub struct OrderFlowChart {
    layout: OrderFlowLayout,
    style: ChartStyle,
}

impl OrderFlowChart {
    pub fn new(layout: OrderFlowLayout, style: ChartStyle) -> Self {
        Self { layout, style }
    }

    pub fn layout(&self) -> &OrderFlowLayout {
        &self.layout
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::for_layout(&self.layout)
    }

    /// Render into an off-screen buffer and return it as plain text, one line
    /// per row with trailing blanks trimmed.
    pub fn to_text(&self, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        Widget::render(self, area, &mut buf);

        (0..height)
            .map(|y| {
                let row: String = (0..width)
                    .map(|x| buf[Position::new(x, y)].symbol())
                    .collect();
                row.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn paint(&self, ctx: &mut Context, vp: Viewport) {
        let style = &self.style;

        for spread in &self.layout.spreads {
            if let Some(rect) = vp.clip_rect(spread.x_range(), (spread.low(), spread.high())) {
                ctx.draw(&rect.with_color(style.spread));
            }
        }
        ctx.layer();

        for &price in &self.layout.gridlines {
            if vp.contains_y(price) {
                ctx.draw(&DashedHLine {
                    y: price,
                    x_min: vp.x_min,
                    x_max: vp.x_max,
                    dash: style.gridline_dash,
                    color: style.gridline,
                });
            }
        }
        ctx.layer();

        for (bars, color) in [
            (self.layout.ask_bars().collect::<Vec<_>>(), style.ask),
            (self.layout.bid_bars().collect::<Vec<_>>(), style.bid),
        ] {
            for bar in bars.into_iter().filter(|b| b.extent != 0.0) {
                if let Some(rect) = vp.clip_rect(bar.x_range(), bar.y_range()) {
                    ctx.draw(&rect.with_color(color));
                }
            }
        }

        let Some(overlay) = &self.layout.overlay else {
            return;
        };
        ctx.layer();

        for pair in overlay.line.windows(2) {
            if let Some(((x1, y1), (x2, y2))) = vp.clip_segment(pair[0], pair[1]) {
                ctx.draw(&CanvasLine {
                    x1,
                    y1,
                    x2,
                    y2,
                    color: style.price,
                });
            }
        }

        for (markers, fill) in [(&overlay.buys, style.buy), (&overlay.sells, style.sell)] {
            for marker in markers.iter().filter(|m| m.is_visible()) {
                if let Some(dot) = self.dot(marker, fill, vp) {
                    ctx.draw(&dot);
                }
            }
        }
    }

    fn dot(&self, marker: &TradeMarker, fill: Color, vp: Viewport) -> Option<TradeDot> {
        if !vp.contains(marker.step, marker.price) {
            return None;
        }
        Some(TradeDot {
            x: marker.step,
            y: marker.price,
            radius: self.style.marker_radius_for(marker.size),
            fill,
            edge: self.style.marker_edge,
            viewport: vp,
        })
    }

    /// Gridline prices labelled at the row they fall on, first label wins a row
    fn draw_price_ticks(&self, area: Rect, buf: &mut Buffer, vp: Viewport) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let rows = f64::from(area.height - 1);
        let span = vp.y_max - vp.y_min;
        let mut taken = vec![false; usize::from(area.height)];

        for &price in self.layout.gridlines.iter().rev() {
            if !vp.contains_y(price) {
                continue;
            }
            let row = (((vp.y_max - price) / span) * rows).round() as u16;
            let slot = &mut taken[usize::from(row.min(area.height - 1))];
            if *slot {
                continue;
            }
            *slot = true;

            let label = format!("{:>width$}┤", format_tick(price), width = usize::from(area.width - 1));
            buf.set_stringn(
                area.x,
                area.y + row.min(area.height - 1),
                label,
                usize::from(area.width),
                Style::default().fg(self.style.gridline),
            );
        }
    }

    fn draw_time_ticks(&self, area: Rect, buf: &mut Buffer, vp: Viewport) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let (first, last) = (vp.x_min.ceil(), vp.x_max.floor());
        let count = (last - first).max(0.0) as u64 + 1;
        let fits = count <= u64::from(area.width / X_TICK_SPACING).max(2);

        // Only enumerate integer steps when they fit the width
        let steps: Vec<f64> = if fits {
            (0..count)
                .map(|i| first + i as f64)
                .filter(|t| vp.contains_x(*t))
                .collect()
        } else {
            Vec::new()
        };
        let ticks = if steps.is_empty() {
            vec![vp.x_min, vp.x_max]
        } else {
            steps
        };

        let columns = f64::from(area.width.saturating_sub(1));
        for t in ticks {
            let label = format_tick(t);
            let col = (((t - vp.x_min) / (vp.x_max - vp.x_min)) * columns).round() as u16;
            let len = label.chars().count() as u16;
            let col = col.min(area.width.saturating_sub(len));
            buf.set_stringn(
                area.x + col,
                area.y,
                label,
                usize::from(area.width - col),
                Style::default(),
            );
        }
    }
}

impl Widget for &OrderFlowChart {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", TITLE));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let vp = self.viewport();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Y axis title
                Constraint::Min(0),    // Plot
                Constraint::Length(1), // X ticks
                Constraint::Length(1), // X axis title
            ])
            .split(inner);

        let tick_width = self
            .layout
            .gridlines
            .iter()
            .map(|p| format_tick(*p).len())
            .max()
            .unwrap_or(0)
            .max(Y_LABEL.len()) as u16
            + 1;

        let plot = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(tick_width), Constraint::Min(0)])
            .split(rows[1]);
        let ticks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(tick_width), Constraint::Min(0)])
            .split(rows[2]);

        buf.set_stringn(
            rows[0].x,
            rows[0].y,
            Y_LABEL,
            usize::from(rows[0].width),
            Style::default(),
        );

        self.draw_price_ticks(plot[0], buf, vp);

        if !plot[1].is_empty() {
            Canvas::default()
                .marker(Marker::Braille)
                .x_bounds([vp.x_min, vp.x_max])
                .y_bounds([vp.y_min, vp.y_max])
                .paint(|ctx| self.paint(ctx, vp))
                .render(plot[1], buf);
        }

        self.draw_time_ticks(ticks[1], buf, vp);

        if rows[3].height > 0 {
            let title_col = (ticks[1].width.saturating_sub(X_LABEL.len() as u16)) / 2;
            buf.set_stringn(
                ticks[1].x + title_col,
                rows[3].y,
                X_LABEL,
                usize::from(ticks[1].width),
                Style::default(),
            );
        }
    }
}

/// Whole numbers without decimals, everything else to two places
fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value)
    } else {
        format!("{:.2}", value)
    }
}
