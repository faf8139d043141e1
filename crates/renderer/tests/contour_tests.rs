//! Tests for filled-contour rasterization onto a plate carrée canvas.

use overlay_common::BoundingBox;
use renderer::colormap::{Color, ColorTable, Colormap};
use renderer::contour::{ContourLevels, Extend, FilledContour};
use renderer::Canvas;
use test_utils::{
    axes_geo_grid, create_constant_grid, create_grid_with_nans, create_ramp_grid, mesh_geo_grid,
};

const GLOBAL: (f32, f32, f32, f32) = (-180.0, -90.0, 180.0, 90.0);

fn small_global_canvas() -> Canvas {
    Canvas::new(36, 18, BoundingBox::global()).unwrap()
}

fn no2_contour() -> FilledContour {
    let levels = ContourLevels::arange(0.0, 300.1, 0.1).unwrap();
    let cmap = ColorTable::dashboard().to_colormap().unwrap();
    FilledContour::new(levels, &cmap, Extend::Neither)
}

fn count_white(canvas: &Canvas) -> usize {
    canvas
        .pixels()
        .chunks_exact(4)
        .filter(|px| px[..3] == [255, 255, 255])
        .count()
}

// ============================================================================
// Coverage
// ============================================================================

#[test]
fn test_constant_global_grid_fills_every_pixel() {
    let grid = axes_geo_grid(create_constant_grid(9, 5, 150.05), 5, 9, GLOBAL);
    let contour = no2_contour();
    let mut canvas = small_global_canvas();

    let stats = contour.draw(&grid, &mut canvas);

    assert_eq!(stats.cells_drawn, 8 * 4);
    assert!(stats.pixels_painted >= 36 * 18);
    let expected = contour.color_for(150.05f32 as f64).unwrap();
    for y in 0..canvas.height() {
        for x in 0..canvas.width() {
            assert_eq!(canvas.pixel(x, y), expected, "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn test_curvilinear_grid_matches_regular_grid() {
    let regular = axes_geo_grid(create_ramp_grid(9, 5, 0.0, 300.0), 5, 9, GLOBAL);
    let mesh = mesh_geo_grid(create_ramp_grid(9, 5, 0.0, 300.0), 5, 9, GLOBAL);
    let contour = no2_contour();

    let mut a = small_global_canvas();
    let mut b = small_global_canvas();
    contour.draw(&regular, &mut a);
    contour.draw(&mesh, &mut b);

    assert_eq!(a.pixels(), b.pixels());
}

#[test]
fn test_partial_extent_leaves_background() {
    // Grid over the eastern hemisphere only
    let grid = axes_geo_grid(create_constant_grid(3, 3, 10.0), 3, 3, (0.0, -90.0, 180.0, 90.0));
    let mut canvas = small_global_canvas();
    no2_contour().draw(&grid, &mut canvas);

    assert_eq!(canvas.pixel(5, 9), Color::WHITE);
    assert_ne!(canvas.pixel(30, 9), Color::WHITE);
    assert_eq!(count_white(&canvas), 18 * 18);
}

// ============================================================================
// Interpolation and band colors
// ============================================================================

#[test]
fn test_linear_interpolation_selects_bands() {
    // Values ramp 0 -> 2 from west to east; levels 0, 1, 2
    let levels = ContourLevels::arange(0.0, 2.5, 1.0).unwrap();
    let cmap = Colormap::listed(&["#ff0000", "#0000ff"]).unwrap();
    let contour = FilledContour::new(levels, &cmap, Extend::Neither);
    let grid = axes_geo_grid(create_ramp_grid(2, 2, 0.0, 2.0), 2, 2, GLOBAL);

    let mut canvas = small_global_canvas();
    contour.draw(&grid, &mut canvas);

    assert_eq!(canvas.pixel(5, 9), Color::rgb(255, 0, 0));
    assert_eq!(canvas.pixel(30, 9), Color::rgb(0, 0, 255));
}

#[test]
fn test_values_outside_levels_unfilled_without_extend() {
    let grid = axes_geo_grid(create_constant_grid(3, 3, -5.0), 3, 3, GLOBAL);
    let mut canvas = small_global_canvas();
    no2_contour().draw(&grid, &mut canvas);
    assert_eq!(count_white(&canvas), 36 * 18);

    let grid = axes_geo_grid(create_constant_grid(3, 3, 1000.0), 3, 3, GLOBAL);
    no2_contour().draw(&grid, &mut canvas);
    assert_eq!(count_white(&canvas), 36 * 18);
}

#[test]
fn test_over_color_with_extend_both() {
    let levels = ContourLevels::arange(0.0, 1.1, 0.001).unwrap();
    let cmap = Colormap::rainbow(256).with_over(Color::rgb(139, 0, 0));
    let contour = FilledContour::new(levels, &cmap, Extend::Both);

    let grid = axes_geo_grid(create_constant_grid(3, 3, 5.0), 3, 3, GLOBAL);
    let mut canvas = small_global_canvas();
    contour.draw(&grid, &mut canvas);

    assert_eq!(canvas.pixel(0, 0), Color::rgb(139, 0, 0));
    assert_eq!(canvas.pixel(35, 17), Color::rgb(139, 0, 0));
}

// ============================================================================
// Masking and wrapping
// ============================================================================

#[test]
fn test_nan_corner_masks_cells() {
    // Center NaN touches all four cells of a 3x3 grid
    let grid = axes_geo_grid(create_grid_with_nans(3, 3, &[(1, 1)]), 3, 3, GLOBAL);
    let mut canvas = small_global_canvas();
    let stats = no2_contour().draw(&grid, &mut canvas);

    assert_eq!(stats.cells_masked, 4);
    assert_eq!(stats.cells_drawn, 0);
    assert_eq!(count_white(&canvas), 36 * 18);
}

#[test]
fn test_antimeridian_cell_skipped() {
    let grid = axes_geo_grid(vec![1.0; 4], 2, 2, (170.0, -10.0, -170.0, 10.0));
    let mut canvas = small_global_canvas();
    let stats = no2_contour().draw(&grid, &mut canvas);

    assert_eq!(stats.cells_wrapped, 1);
    assert_eq!(count_white(&canvas), 36 * 18);
}

#[test]
fn test_longitudes_past_180_are_normalized() {
    // 190..350 E is -170..-10
    let grid = axes_geo_grid(create_constant_grid(2, 2, 20.0), 2, 2, (190.0, -90.0, 350.0, 90.0));
    let mut canvas = small_global_canvas();
    let stats = no2_contour().draw(&grid, &mut canvas);

    assert_eq!(stats.cells_drawn, 1);
    assert_ne!(canvas.pixel(2, 9), Color::WHITE);
    assert_eq!(canvas.pixel(20, 9), Color::WHITE);
}

#[test]
fn test_single_row_grid_draws_nothing() {
    let grid = axes_geo_grid(vec![1.0; 4], 1, 4, GLOBAL);
    let mut canvas = small_global_canvas();
    let stats = no2_contour().draw(&grid, &mut canvas);
    assert_eq!(stats.cells_drawn, 0);
}
