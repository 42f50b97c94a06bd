//! Viewer configuration loaded from YAML

use std::path::Path;
use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Environment variable overriding `log_level`
pub const LOG_LEVEL_ENV: &str = "ORDER_FLOW_LOG_LEVEL";

/// Order flow viewer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub style: StyleConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            style: StyleConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

/// Chart colors and marker sizing.
///
/// Colors accept ratatui names ("blue", "lightred", ...), `#rrggbb` hex or a
/// 256-color index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub ask_color: String,
    pub bid_color: String,
    pub gridline_color: String,
    pub spread_color: String,
    pub price_color: String,
    pub buy_color: String,
    pub sell_color: String,
    pub marker_edge_color: String,
    /// Marker area per unit of executed volume
    pub marker_scale: f64,
    /// Marker radius in canvas dots per square root of marker area
    pub marker_radius: f64,
    /// Dash length of gridlines in canvas dots
    pub gridline_dash: usize,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            ask_color: "blue".to_string(),
            bid_color: "red".to_string(),
            gridline_color: "gray".to_string(),
            spread_color: "yellow".to_string(),
            price_color: "#ffa500".to_string(),
            buy_color: "green".to_string(),
            sell_color: "red".to_string(),
            marker_edge_color: "black".to_string(),
            marker_scale: 20.0,
            marker_radius: 0.25,
            gridline_dash: 2,
        }
    }
}

impl StyleConfig {
    /// Parse a named color field
    pub fn color(name: &str, value: &str) -> Result<Color> {
        Color::from_str(value).map_err(|_| {
            ConfigError::ValidationError(format!("{} '{}' is not a valid color", name, value))
        })
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("ask_color", &self.ask_color),
            ("bid_color", &self.bid_color),
            ("gridline_color", &self.gridline_color),
            ("spread_color", &self.spread_color),
            ("price_color", &self.price_color),
            ("buy_color", &self.buy_color),
            ("sell_color", &self.sell_color),
            ("marker_edge_color", &self.marker_edge_color),
        ] {
            Self::color(name, value)?;
        }

        if !(self.marker_scale.is_finite() && self.marker_scale > 0.0) {
            return Err(ConfigError::ValidationError(
                "marker_scale must be greater than 0".to_string(),
            ));
        }
        if !(self.marker_radius.is_finite() && self.marker_radius > 0.0) {
            return Err(ConfigError::ValidationError(
                "marker_radius must be greater than 0".to_string(),
            ));
        }
        if self.gridline_dash == 0 {
            return Err(ConfigError::ValidationError(
                "gridline_dash must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Size of the plain text export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub width: u16,
    pub height: u16,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: 120,
            height: 40,
        }
    }
}

impl ViewerConfig {
    /// Load configuration from YAML file
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let yaml_content = std::fs::read_to_string(config_path)?;
        Self::from_yaml(&yaml_content)
    }

    /// Load configuration, using defaults when the file does not exist
    pub fn load_or_default(config_path: impl AsRef<Path>) -> Result<Self> {
        let path = config_path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            info!("No config at {}, using defaults", path.display());
            let mut config = Self::default();
            config.apply_env();
            config.validate()?;
            Ok(config)
        }
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let mut config: ViewerConfig = serde_yaml::from_str(yaml)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
            info!("Overriding log level from environment variable");
            self.log_level = level;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "log_level must be one of: {}",
                valid_levels.join(", ")
            )));
        }

        self.style.validate()?;

        if self.export.width == 0 || self.export.height == 0 {
            return Err(ConfigError::ValidationError(
                "export width and height must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Log configuration summary
    pub fn log(&self) {
        info!("Configuration loaded:");
        info!("  Log level: {}", self.log_level);
        info!("  Marker scale: {}", self.style.marker_scale);
        info!("  Export size: {}x{}", self.export.width, self.export.height);
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ViewerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.style.marker_scale, 20.0);
    }

    #[test]
    fn test_partial_yaml() {
        let config = ViewerConfig::from_yaml(
            r#"
style:
  ask_color: "cyan"
  marker_scale: 10.0
export:
  width: 80
"#,
        )
        .unwrap();

        assert_eq!(config.style.ask_color, "cyan");
        assert_eq!(config.style.bid_color, "red");
        assert_eq!(config.style.marker_scale, 10.0);
        assert_eq!(config.export.width, 80);
        assert_eq!(config.export.height, 40);
    }

    #[test]
    fn test_invalid_color() {
        let err = ViewerConfig::from_yaml("style:\n  spread_color: \"not-a-color\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(msg) if msg.contains("spread_color")));
    }

    #[test]
    fn test_invalid_scale() {
        assert!(ViewerConfig::from_yaml("style:\n  marker_scale: 0.0\n").is_err());
        assert!(ViewerConfig::from_yaml("style:\n  gridline_dash: 0\n").is_err());
    }

    #[test]
    fn test_zero_export_size() {
        assert!(ViewerConfig::from_yaml("export:\n  height: 0\n").is_err());
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            ViewerConfig::from_yaml("style: [unclosed"),
            Err(ConfigError::YamlError(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "export:\n  width: 64\n  height: 20").unwrap();

        let config = ViewerConfig::load(file.path()).unwrap();
        assert_eq!(config.export, ExportConfig { width: 64, height: 20 });
        assert_eq!(config.style, StyleConfig::default());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            ViewerConfig::load("/nonexistent/order_flow.yaml"),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(
            StyleConfig::color("price_color", "#ffa500").unwrap(),
            Color::Rgb(255, 165, 0)
        );
    }
}
