//! Error types for rendering.

use thiserror::Error;

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Color table channels differ in length: red={red}, green={green}, blue={blue}")]
    TableLengthMismatch {
        red: usize,
        green: usize,
        blue: usize,
    },

    #[error("Colormap has no colors")]
    EmptyColormap,

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid contour levels: {0}")]
    InvalidLevels(String),

    #[error("Invalid canvas: {0}")]
    InvalidCanvas(String),

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
