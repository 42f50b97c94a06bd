//! Resolved chart colors and marker sizing

use ratatui::style::Color;

use crate::application::layout::DEFAULT_MARKER_SCALE;
use crate::infrastructure::config::{ConfigError, StyleConfig};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartStyle {
    pub ask: Color,
    pub bid: Color,
    pub gridline: Color,
    pub spread: Color,
    pub price: Color,
    pub buy: Color,
    pub sell: Color,
    pub marker_edge: Color,
    pub marker_scale: f64,
    pub marker_radius: f64,
    pub gridline_dash: usize,
}

impl ChartStyle {
    /// Marker radius in canvas dots for a marker of the given area
    pub fn marker_radius_for(&self, size: f64) -> f64 {
        self.marker_radius * size.max(0.0).sqrt()
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            ask: Color::Blue,
            bid: Color::Red,
            gridline: Color::Gray,
            spread: Color::Yellow,
            price: Color::Rgb(255, 165, 0),
            buy: Color::Green,
            sell: Color::Red,
            marker_edge: Color::Black,
            marker_scale: DEFAULT_MARKER_SCALE,
            marker_radius: 0.25,
            gridline_dash: 2,
        }
    }
}

impl TryFrom<&StyleConfig> for ChartStyle {
    type Error = ConfigError;

    fn try_from(config: &StyleConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            ask: StyleConfig::color("ask_color", &config.ask_color)?,
            bid: StyleConfig::color("bid_color", &config.bid_color)?,
            gridline: StyleConfig::color("gridline_color", &config.gridline_color)?,
            spread: StyleConfig::color("spread_color", &config.spread_color)?,
            price: StyleConfig::color("price_color", &config.price_color)?,
            buy: StyleConfig::color("buy_color", &config.buy_color)?,
            sell: StyleConfig::color("sell_color", &config.sell_color)?,
            marker_edge: StyleConfig::color("marker_edge_color", &config.marker_edge_color)?,
            marker_scale: config.marker_scale,
            marker_radius: config.marker_radius,
            gridline_dash: config.gridline_dash,
        })
    }
}
