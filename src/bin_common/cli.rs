//! CLI utilities for binaries
//!
//! Handles configuration path resolution and argument parsing
//! for the binary executables.

use std::path::PathBuf;

/// Type of configuration to load
#[derive(Debug, Clone)]
pub enum ConfigType {
    /// Viewer configuration (config/order_flow.yaml)
    Viewer,
    /// Custom path
    Custom(String),
}

impl ConfigType {
    /// Get the default path for this config type
    pub fn default_path(&self) -> &str {
        match self {
            ConfigType::Viewer => "config/order_flow.yaml",
            ConfigType::Custom(path) => path,
        }
    }

    /// Get the environment variable name for this config type
    pub fn env_var_name(&self) -> &str {
        match self {
            ConfigType::Viewer => "ORDER_FLOW_CONFIG_PATH",
            ConfigType::Custom(_) => "CONFIG_PATH",
        }
    }
}

/// Load configuration path from environment or use default
///
/// # Examples
/// ```
/// use order_flow_viz::bin_common::{load_config_from_env, ConfigType};
///
/// let path = load_config_from_env(ConfigType::Viewer);
/// ```
pub fn load_config_from_env(config_type: ConfigType) -> PathBuf {
    std::env::var(config_type.env_var_name())
        .unwrap_or_else(|_| config_type.default_path().to_string())
        .into()
}

/// Parse command line arguments for a binary
///
/// Returns a vector of arguments (excluding the program name)
pub fn parse_args() -> Vec<String> {
    std::env::args().skip(1).collect()
}

/// Viewer command line options
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewerArgs {
    /// Print the chart as text instead of opening the interactive view
    pub text: bool,
    /// Explicit config file path
    pub config_path: Option<String>,
}

impl ViewerArgs {
    pub fn parse(args: &[String]) -> Self {
        let mut parsed = Self::default();
        for arg in args {
            match arg.as_str() {
                "--text" => parsed.text = true,
                other if !other.starts_with("--") => parsed.config_path = Some(other.to_string()),
                _ => {}
            }
        }
        parsed
    }

    pub fn config_type(&self) -> ConfigType {
        match &self.config_path {
            Some(path) => ConfigType::Custom(path.clone()),
            None => ConfigType::Viewer,
        }
    }
}
