//! Error types for the products crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while turning a product file into an overlay.
#[derive(Error, Debug)]
pub enum ProductError {
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to read gridded data: {0}")]
    NetCdf(#[from] netcdf_parser::NetCdfError),

    #[error("Rendering failed: {0}")]
    Render(#[from] renderer::RenderError),

    #[error("Invalid grid: {0}")]
    Grid(#[from] overlay_common::GridError),

    #[error("Failed to extract archive: {0}")]
    Archive(String),

    #[error("Cannot average arrays of shape {actual:?} with shape {expected:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("No arrays to average")]
    EmptyStack,

    #[error("Output folder already exists: {0}")]
    FolderExists(PathBuf),

    #[error("{tool} exited with {status}")]
    ToolFailed { tool: String, status: String },

    #[error("Failed to start {tool}: {source}")]
    ToolSpawn {
        tool: String,
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for product operations.
pub type Result<T> = std::result::Result<T, ProductError>;
