//! Overlay rendering for gridded satellite products.
//!
//! - Color tables and colormaps (dashboard ramp, rainbow)
//! - Filled contours rasterized onto a plate carrée canvas
//! - PNG encoding
//! - White-keyed transparency

pub mod canvas;
pub mod colormap;
pub mod contour;
pub mod error;
pub mod png;
pub mod transparency;

pub use canvas::Canvas;
pub use colormap::{parse_color, rgb_to_hex, Color, ColorTable, Colormap};
pub use contour::{Band, ContourLevels, DrawStats, Extend, FilledContour};
pub use error::{RenderError, RenderResult};
pub use transparency::{apply_transparency_key, white_to_transparent};
