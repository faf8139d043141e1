//! White-keyed transparency for rendered overlays.
//!
//! Every pixel that is exactly (255, 255, 255) becomes fully transparent
//! white; every other pixel keeps its color and becomes fully opaque.

use std::fs;
use std::path::Path;

use image::{DynamicImage, RgbaImage};
use rayon::prelude::*;
use tracing::debug;

use crate::error::RenderResult;
use crate::png::write_png;

/// The color keyed out to transparency.
pub const TRANSPARENCY_KEY: [u8; 3] = [255, 255, 255];

/// Rewrite alpha in an RGBA buffer from the white key.
pub fn key_white_pixels(pixels: &mut [u8]) {
    pixels.par_chunks_exact_mut(4).for_each(|px| {
        px[3] = if px[..3] == TRANSPARENCY_KEY { 0 } else { 255 };
    });
}

/// Convert any image to RGBA and key out white.
pub fn white_to_transparent(image: &DynamicImage) -> RgbaImage {
    let mut rgba = image.to_rgba8();
    key_white_pixels(&mut rgba);
    rgba
}

/// Read `intermediate`, write the keyed image to `output` and delete
/// `intermediate`. Returns the image dimensions.
pub fn apply_transparency_key(intermediate: &Path, output: &Path) -> RenderResult<(u32, u32)> {
    let image = image::open(intermediate)?;
    let rgba = white_to_transparent(&image);
    let (width, height) = rgba.dimensions();

    write_png(output, rgba.as_raw(), width as usize, height as usize)?;
    if intermediate != output {
        fs::remove_file(intermediate)?;
    }

    debug!(
        intermediate = %intermediate.display(),
        output = %output.display(),
        width,
        height,
        "Applied transparency key"
    );
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_keying_rules() {
        let mut img = RgbImage::new(3, 1);
        img.put_pixel(0, 0, Rgb([255, 255, 255]));
        img.put_pixel(1, 0, Rgb([255, 255, 254]));
        img.put_pixel(2, 0, Rgb([10, 20, 30]));

        let out = white_to_transparent(&DynamicImage::ImageRgb8(img));
        assert_eq!(out.get_pixel(0, 0).0, [255, 255, 255, 0]);
        assert_eq!(out.get_pixel(1, 0).0, [255, 255, 254, 255]);
        assert_eq!(out.get_pixel(2, 0).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_existing_alpha_is_replaced() {
        let mut pixels = vec![1, 2, 3, 0, 255, 255, 255, 255];
        key_white_pixels(&mut pixels);
        assert_eq!(pixels, vec![1, 2, 3, 255, 255, 255, 255, 0]);
    }
}
