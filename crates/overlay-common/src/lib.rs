//! Common types shared across the overlay crates.

pub mod bbox;
pub mod error;
pub mod grid;

pub use bbox::BoundingBox;
pub use error::{GridError, GridResult};
pub use grid::{Coordinates, Field2D, GeoGrid};
