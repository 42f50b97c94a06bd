//! Errors raised while turning order-book snapshots into a chart

use thiserror::Error;

/// Input validation failures. Every variant is raised before anything is drawn.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Empty or malformed sequences, a missing book side, mismatched overlays
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Every volume in the book is zero, so normalization is undefined
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),
}

/// Result type for order flow rendering
pub type Result<T> = std::result::Result<T, RenderError>;
