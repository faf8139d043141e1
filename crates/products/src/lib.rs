//! Atmospheric product overlays.
//!
//! Turns raw NO2, aerosol optical depth and on-road CO files into
//! transparent PNG overlays for a map dashboard, one folder per
//! (product, period) key.
//!
//! # Architecture
//!
//! - [`metadata`]: classify input files and derive output keys from names
//! - [`output`]: the folder-existence guard that makes runs idempotent
//! - [`processors`]: per-product loading plus the shared render driver
//! - [`archive`] and [`average`]: CO archive extraction and averaging
//! - [`tools`]: optional external georeferencing and tiling commands
//! - [`pipeline`]: the batch runner tying it together

pub mod archive;
pub mod average;
pub mod config;
pub mod error;
pub mod metadata;
pub mod output;
pub mod pipeline;
pub mod processors;
pub mod tools;

// Re-exports
pub use config::{CoConfig, OverlayConfig, ProductStyle, RenderConfig, ToolSpec, ToolsConfig};
pub use error::{ProductError, Result};
pub use metadata::{classify, output_key, OutputKey, ProductKind};
pub use pipeline::{BatchRunner, BatchSummary, FileOutcome};
pub use processors::{ProcessOutcome, ProductProcessor};
pub use tools::{CommandTool, ExternalTool, ToolChain};
