//! Canvas shapes for the order flow chart
//!
//! Coordinates are in data space. Callers clip to the [`Viewport`] before
//! drawing, so every corner handed to the painter lies inside the canvas.

use ratatui::style::Color;
use ratatui::widgets::canvas::{Painter, Shape};

use crate::application::layout::OrderFlowLayout;

/// Marker radius (in dots) below which no edge ring is drawn
const EDGE_MIN_RADIUS: f64 = 1.5;

/// Fraction of the price span added above and below the data
const PRICE_MARGIN: f64 = 0.05;

// =============================================================================
// Viewport
// =============================================================================

/// Data-space bounds of the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Viewport {
    /// X bounds are the layout's x-limits; a single time step is widened to
    /// one bar width so the canvas keeps a non-zero span.
    pub fn for_layout(layout: &OrderFlowLayout) -> Self {
        let (mut x_min, mut x_max) = layout.x_limits;
        if x_max <= x_min {
            x_min -= 0.5;
            x_max += 0.5;
        }

        let (lo, hi) = layout.price_range();
        let margin = if hi > lo { (hi - lo) * PRICE_MARGIN } else { 0.5 };

        Self {
            x_min,
            x_max,
            y_min: lo - margin,
            y_max: hi + margin,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.contains_x(x) && self.contains_y(y)
    }

    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.x_min && x <= self.x_max
    }

    pub fn contains_y(&self, y: f64) -> bool {
        y >= self.y_min && y <= self.y_max
    }

    /// Intersect an axis-aligned rectangle with the viewport
    pub fn clip_rect(&self, x: (f64, f64), y: (f64, f64)) -> Option<FilledRect> {
        let x_min = x.0.min(x.1).max(self.x_min);
        let x_max = x.0.max(x.1).min(self.x_max);
        let y_min = y.0.min(y.1).max(self.y_min);
        let y_max = y.0.max(y.1).min(self.y_max);

        if x_min > x_max || y_min > y_max {
            return None;
        }
        Some(FilledRect {
            x_min,
            x_max,
            y_min,
            y_max,
            color: Color::Reset,
        })
    }

    /// Liang-Barsky clipping of a segment against the viewport
    pub fn clip_segment(&self, from: (f64, f64), to: (f64, f64)) -> Option<((f64, f64), (f64, f64))> {
        let (x1, y1) = from;
        let (dx, dy) = (to.0 - x1, to.1 - y1);
        let mut t0 = 0.0_f64;
        let mut t1 = 1.0_f64;

        for (p, q) in [
            (-dx, x1 - self.x_min),
            (dx, self.x_max - x1),
            (-dy, y1 - self.y_min),
            (dy, self.y_max - y1),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }

        let clamp = |x: f64, y: f64| {
            (
                x.clamp(self.x_min, self.x_max),
                y.clamp(self.y_min, self.y_max),
            )
        };
        Some((
            clamp(x1 + t0 * dx, y1 + t0 * dy),
            clamp(x1 + t1 * dx, y1 + t1 * dy),
        ))
    }
}

// =============================================================================
// Shapes
// =============================================================================

/// Solid rectangle, used for volume bars and spread bands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilledRect {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub color: Color,
}

impl FilledRect {
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Shape for FilledRect {
    fn draw(&self, painter: &mut Painter) {
        let (Some((x0, y0)), Some((x1, y1))) = (
            painter.get_point(self.x_min, self.y_min),
            painter.get_point(self.x_max, self.y_max),
        ) else {
            return;
        };

        for x in x0.min(x1)..=x0.max(x1) {
            for y in y0.min(y1)..=y0.max(y1) {
                painter.paint(x, y, self.color);
            }
        }
    }
}

/// Dashed horizontal reference line at one price
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashedHLine {
    pub y: f64,
    pub x_min: f64,
    pub x_max: f64,
    /// Dots painted, then dots skipped
    pub dash: usize,
    pub color: Color,
}

impl Shape for DashedHLine {
    fn draw(&self, painter: &mut Painter) {
        let (Some((x0, y)), Some((x1, _))) = (
            painter.get_point(self.x_min, self.y),
            painter.get_point(self.x_max, self.y),
        ) else {
            return;
        };

        let dash = self.dash.max(1);
        for x in x0.min(x1)..=x0.max(x1) {
            if (x / dash) % 2 == 0 {
                painter.paint(x, y, self.color);
            }
        }
    }
}

/// Filled disc with an edge ring, radius measured in canvas dots
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeDot {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub fill: Color,
    pub edge: Color,
    pub viewport: Viewport,
}

impl Shape for TradeDot {
    fn draw(&self, painter: &mut Painter) {
        let Some((cx, cy)) = painter.get_point(self.x, self.y) else {
            return;
        };
        // Bottom-right corner of the grid
        let Some((max_x, max_y)) = painter.get_point(self.viewport.x_max, self.viewport.y_min) else {
            return;
        };

        // Scan only the part of the bounding box that lies on the grid
        let reach = self.radius.ceil().min(isize::MAX as f64) as isize;
        let (cx, cy) = (cx as isize, cy as isize);
        let (dx_min, dx_max) = ((-reach).max(-cx), reach.min(max_x as isize - cx));
        let (dy_min, dy_max) = ((-reach).max(-cy), reach.min(max_y as isize - cy));

        for dy in dy_min..=dy_max {
            for dx in dx_min..=dx_max {
                let (px, py) = (cx + dx, cy + dy);
                let distance = (dx as f64).hypot(dy as f64);
                if distance > self.radius {
                    continue;
                }
                let color = if self.radius >= EDGE_MIN_RADIUS && distance > self.radius - 1.0 {
                    self.edge
                } else {
                    self.fill
                };
                painter.paint(px as usize, py as usize, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;
    use ratatui::layout::{Position, Rect};
    use ratatui::symbols::Marker;
    use ratatui::widgets::canvas::Canvas;
    use ratatui::widgets::Widget;

    fn unit_viewport() -> Viewport {
        Viewport {
            x_min: 0.0,
            x_max: 1.0,
            y_min: 0.0,
            y_max: 1.0,
        }
    }

    #[test]
    fn test_clip_rect() {
        let vp = unit_viewport();
        let rect = vp.clip_rect((-1.0, 0.5), (0.25, 2.0)).unwrap();
        assert_eq!((rect.x_min, rect.x_max), (0.0, 0.5));
        assert_eq!((rect.y_min, rect.y_max), (0.25, 1.0));

        assert!(vp.clip_rect((2.0, 3.0), (0.0, 1.0)).is_none());
    }

    #[test]
    fn test_clip_rect_inverted_band() {
        // Crossed spreads hand over y in descending order
        let rect = unit_viewport().clip_rect((0.0, 1.0), (0.75, 0.25)).unwrap();
        assert_eq!((rect.y_min, rect.y_max), (0.25, 0.75));
    }

    #[test]
    fn test_clip_segment() {
        let vp = unit_viewport();
        let (a, b) = vp.clip_segment((-1.0, 0.5), (2.0, 0.5)).unwrap();
        assert_eq!(a, (0.0, 0.5));
        assert_eq!(b, (1.0, 0.5));

        let (a, b) = vp.clip_segment((0.25, 0.25), (0.75, 0.75)).unwrap();
        assert_eq!(a, (0.25, 0.25));
        assert_eq!(b, (0.75, 0.75));

        assert!(vp.clip_segment((2.0, 0.0), (3.0, 1.0)).is_none());
        assert!(vp.clip_segment((0.5, 2.0), (0.5, 3.0)).is_none());
    }

    #[test]
    fn test_filled_rect_covers_canvas() {
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        let rect = unit_viewport()
            .clip_rect((0.0, 1.0), (0.0, 1.0))
            .unwrap()
            .with_color(Color::Yellow);

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, 1.0])
            .y_bounds([0.0, 1.0])
            .paint(|ctx| ctx.draw(&rect))
            .render(area, &mut buf);

        for y in 0..2 {
            for x in 0..4 {
                let cell = &buf[Position::new(x, y)];
                assert_eq!(cell.symbol(), "⣿");
                assert_eq!(cell.fg, Color::Yellow);
            }
        }
    }

    fn render_dot(radius: f64) -> Buffer {
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        let dot = TradeDot {
            x: 0.5,
            y: 0.5,
            radius,
            fill: Color::Green,
            edge: Color::Black,
            viewport: unit_viewport(),
        };

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, 1.0])
            .y_bounds([0.0, 1.0])
            .paint(|ctx| ctx.draw(&dot))
            .render(area, &mut buf);
        buf
    }

    #[test]
    fn test_trade_dot_huge_radius_fills_grid() {
        // A radius far beyond the canvas only paints the grid itself
        let buf = render_dot(1e9);

        for y in 0..2 {
            for x in 0..4 {
                assert_eq!(buf[Position::new(x, y)].symbol(), "⣿");
                assert_eq!(buf[Position::new(x, y)].fg, Color::Green);
            }
        }
    }

    #[test]
    fn test_trade_dot_small_radius_paints_center_only() {
        let buf = render_dot(0.4);
        let painted = (0..2)
            .flat_map(|y| (0..4).map(move |x| Position::new(x, y)))
            .filter(|p| buf[*p].symbol() != " ")
            .count();
        assert_eq!(painted, 1);
    }

    #[test]
    fn test_dashed_line_leaves_gaps() {
        let area = Rect::new(0, 0, 8, 1);
        let mut buf = Buffer::empty(area);
        let line = DashedHLine {
            y: 1.0,
            x_min: 0.0,
            x_max: 1.0,
            dash: 2,
            color: Color::Gray,
        };

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, 1.0])
            .y_bounds([0.0, 1.0])
            .paint(|ctx| ctx.draw(&line))
            .render(area, &mut buf);

        // Top row of braille dots, every other cell
        assert_eq!(buf[Position::new(0, 0)].symbol(), "⠉");
        assert_eq!(buf[Position::new(1, 0)].symbol(), " ");
        assert_eq!(buf[Position::new(2, 0)].symbol(), "⠉");
    }
}
