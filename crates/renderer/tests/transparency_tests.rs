//! Tests for white-keyed transparency of rendered overlays.

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use renderer::transparency::{apply_transparency_key, white_to_transparent};
use test_utils::temp_test_dir;

#[test]
fn test_white_becomes_transparent_and_rest_opaque() {
    let mut img = RgbaImage::new(2, 2);
    img.put_pixel(0, 0, Rgba([255, 255, 255, 255]));
    img.put_pixel(1, 0, Rgba([0, 0, 0, 0]));
    img.put_pixel(0, 1, Rgba([252, 255, 255, 128]));
    img.put_pixel(1, 1, Rgba([139, 0, 0, 255]));

    let out = white_to_transparent(&DynamicImage::ImageRgba8(img));

    assert_eq!(out.dimensions(), (2, 2));
    assert_eq!(out.get_pixel(0, 0).0, [255, 255, 255, 0]);
    assert_eq!(out.get_pixel(1, 0).0, [0, 0, 0, 255]);
    assert_eq!(out.get_pixel(0, 1).0, [252, 255, 255, 255]);
    assert_eq!(out.get_pixel(1, 1).0, [139, 0, 0, 255]);
}

#[test]
fn test_apply_transparency_key_replaces_intermediate() {
    let dir = temp_test_dir();
    let intermediate = dir.path().join("no2.png");
    let output = dir.path().join("img.png");

    let mut img = RgbImage::from_pixel(5, 3, Rgb([255, 255, 255]));
    img.put_pixel(2, 1, Rgb([10, 200, 30]));
    img.save(&intermediate).unwrap();

    let dims = apply_transparency_key(&intermediate, &output).unwrap();

    assert_eq!(dims, (5, 3));
    assert!(!intermediate.exists());
    let out = image::open(&output).unwrap().to_rgba8();
    assert_eq!(out.get_pixel(0, 0).0, [255, 255, 255, 0]);
    assert_eq!(out.get_pixel(2, 1).0, [10, 200, 30, 255]);
}

#[test]
fn test_apply_transparency_key_missing_input() {
    let dir = temp_test_dir();
    let result = apply_transparency_key(&dir.path().join("nope.png"), &dir.path().join("img.png"));
    assert!(result.is_err());
    assert!(!dir.path().join("img.png").exists());
}
