//! Error types for grid construction.

use thiserror::Error;

/// Result type alias using GridError.
pub type GridResult<T> = Result<T, GridError>;

/// Errors raised when assembling grids from raw arrays.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("Grid data length {actual} does not match {width}x{height}")]
    LengthMismatch {
        width: usize,
        height: usize,
        actual: usize,
    },

    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Grid is empty")]
    Empty,
}
