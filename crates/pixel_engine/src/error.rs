//! Unified error types for pixel_engine

use thiserror::Error;

use crate::{Position, Size};

/// Main error type for pixel_engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    // === Buffer Errors ===
    #[error("Coordinate (x: {x}, y: {y}) out of bounds for {width}x{height} buffer")]
    OutOfBounds { x: i32, y: i32, width: i32, height: i32 },

    #[error("Invalid buffer size: {width}x{height}")]
    InvalidSize { width: i32, height: i32 },

    // === Journal Errors ===
    #[error("Journal is sealed; no further pixels may be registered")]
    JournalSealed,

    #[error("{0}")]
    Generic(String),
}

/// Result type alias for pixel_engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

// === Convenience constructors ===
impl EngineError {
    /// Create an out-of-bounds error for a position against a buffer size
    pub fn out_of_bounds(pos: Position, size: Size) -> Self {
        Self::OutOfBounds {
            x: pos.x,
            y: pos.y,
            width: size.width,
            height: size.height,
        }
    }

    /// Create a generic error from any displayable type
    pub fn generic(msg: impl std::fmt::Display) -> Self {
        Self::Generic(msg.to_string())
    }
}
