//! Order Flow Visualizer - Main Library
//!
//! ## Architecture
//!
//! - **bin_common**: Common utilities for binary executables (CLI)
//! - **orderflow**: Layout and rendering of order book snapshots (re-exported from workspace)
//!
//! ## Usage in Binaries
//!
//! ```rust
//! use order_flow_viz::bin_common::{load_config_from_env, ConfigType};
//! use order_flow_viz::orderflow::render;
//! ```

// Re-export workspace libraries for convenience
pub use orderflow;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for binary executables

    pub mod cli;

    pub use cli::{load_config_from_env, parse_args, ConfigType, ViewerArgs};
}
