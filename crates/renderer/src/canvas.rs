//! RGBA raster covering a geographic extent in plate carrée.

use std::path::Path;

use overlay_common::BoundingBox;

use crate::colormap::Color;
use crate::error::{RenderError, RenderResult};
use crate::png;

/// Largest canvas side accepted, in pixels.
const MAX_SIDE: usize = 65_535;

/// An opaque RGBA image mapped onto a lon/lat extent.
///
/// Pixel (0, 0) is the north-west corner. The canvas starts white; white is
/// the transparency key applied after rendering.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    extent: BoundingBox,
    pixels: Vec<u8>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, extent: BoundingBox) -> RenderResult<Self> {
        if width == 0 || height == 0 || width > MAX_SIDE || height > MAX_SIDE {
            return Err(RenderError::InvalidCanvas(format!(
                "{}x{} pixels (each side must be 1..={})",
                width, height, MAX_SIDE
            )));
        }
        if extent.width() <= 0.0 || extent.height() <= 0.0 {
            return Err(RenderError::InvalidCanvas(format!(
                "degenerate extent {:?}",
                extent
            )));
        }

        Ok(Self {
            width,
            height,
            extent,
            pixels: vec![255u8; width * height * 4],
        })
    }

    /// Size a canvas from a physical map width and a resolution.
    ///
    /// The height follows the extent's aspect ratio, so the canvas holds the
    /// map area only (tight bounding box, no padding).
    pub fn for_dpi(map_width_inches: f64, dpi: u32, extent: BoundingBox) -> RenderResult<Self> {
        if !(map_width_inches > 0.0) || dpi == 0 {
            return Err(RenderError::InvalidCanvas(format!(
                "map width {} in at {} dpi",
                map_width_inches, dpi
            )));
        }
        let width = (map_width_inches * dpi as f64).round() as usize;
        let height = (width as f64 / extent.aspect_ratio()).round() as usize;
        Self::new(width, height, extent)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn extent(&self) -> &BoundingBox {
        &self.extent
    }

    /// Raw RGBA bytes, row-major from the top-left corner.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Continuous pixel coordinates of a lon/lat point; pixel centers sit at
    /// `n + 0.5`.
    #[inline]
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        let x = (lon - self.extent.min_x) / self.extent.width() * self.width as f64;
        let y = (self.extent.max_y - lat) / self.extent.height() * self.height as f64;
        (x, y)
    }

    #[inline]
    pub fn put(&mut self, x: usize, y: usize, color: Color) {
        let idx = (y * self.width + x) * 4;
        self.pixels[idx] = color.r;
        self.pixels[idx + 1] = color.g;
        self.pixels[idx + 2] = color.b;
        self.pixels[idx + 3] = color.a;
    }

    pub fn pixel(&self, x: usize, y: usize) -> Color {
        let idx = (y * self.width + x) * 4;
        Color::new(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        )
    }

    /// Encode as PNG and write to `path`.
    pub fn save_png(&self, path: &Path) -> RenderResult<()> {
        png::write_png(path, &self.pixels, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_dpi_global_is_two_to_one() {
        let canvas = Canvas::for_dpi(1.0, 100, BoundingBox::global()).unwrap();
        assert_eq!(canvas.width(), 100);
        assert_eq!(canvas.height(), 50);
    }

    #[test]
    fn test_starts_white() {
        let canvas = Canvas::new(2, 2, BoundingBox::global()).unwrap();
        assert!(canvas.pixels().iter().all(|&b| b == 255));
    }

    #[test]
    fn test_project_corners() {
        let canvas = Canvas::new(360, 180, BoundingBox::global()).unwrap();
        assert_eq!(canvas.project(-180.0, 90.0), (0.0, 0.0));
        assert_eq!(canvas.project(180.0, -90.0), (360.0, 180.0));
        assert_eq!(canvas.project(0.0, 0.0), (180.0, 90.0));
    }

    #[test]
    fn test_rejects_empty_canvas() {
        assert!(Canvas::new(0, 10, BoundingBox::global()).is_err());
        assert!(Canvas::for_dpi(0.0, 600, BoundingBox::global()).is_err());
        assert!(Canvas::for_dpi(10.0, 0, BoundingBox::global()).is_err());
    }
}
