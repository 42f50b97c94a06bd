//! Infrastructure Layer
//!
//! Configuration loading and logging setup.
//! This layer depends on the domain layer but not on the application layer.

pub mod config;
pub mod logging;

pub use config::{ConfigError, ExportConfig, StyleConfig, ViewerConfig};
pub use logging::init_tracing;
