//! Integration test: Configuration utilities
//!
//! Tests the bin_common configuration loading and the shipped viewer config.

use order_flow_viz::bin_common::{load_config_from_env, ConfigType};
use order_flow_viz::orderflow::ViewerConfig;
use std::env;

#[test]
fn test_viewer_config_default() {
    // Clear env var to test default
    env::remove_var("ORDER_FLOW_CONFIG_PATH");

    let config_path = load_config_from_env(ConfigType::Viewer);
    assert_eq!(config_path.to_str().unwrap(), "config/order_flow.yaml");
}

#[test]
fn test_custom_config() {
    env::remove_var("CONFIG_PATH");

    let custom = ConfigType::Custom("custom/path.yaml".to_string());
    let config_path = load_config_from_env(custom);

    assert_eq!(config_path.to_str().unwrap(), "custom/path.yaml");
}

#[test]
fn test_shipped_config_is_valid() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/order_flow.yaml");
    let config = ViewerConfig::load(path).unwrap();

    assert_eq!(config.style.marker_scale, 20.0);
    assert_eq!(config.export.width, 120);
}

#[test]
fn test_missing_config_falls_back_to_defaults() {
    let config = ViewerConfig::load_or_default("does/not/exist.yaml").unwrap();
    assert_eq!(config.style, ViewerConfig::default().style);
}
