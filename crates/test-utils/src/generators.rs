//! Synthetic grids for exercising the readers, renderer and processors.
//!
//! Everything here is deterministic so tests can assert exact values.

use overlay_common::{Coordinates, Field2D, GeoGrid};

/// A grid filled with one value.
pub fn create_constant_grid(width: usize, height: usize, value: f32) -> Vec<f32> {
    vec![value; width * height]
}

/// A left-to-right linear ramp from `min` (first column) to `max` (last column).
pub fn create_ramp_grid(width: usize, height: usize, min: f32, max: f32) -> Vec<f32> {
    let denom = width.saturating_sub(1).max(1) as f32;
    let mut data = Vec::with_capacity(width * height);
    for _ in 0..height {
        for col in 0..width {
            data.push(min + (max - min) * col as f32 / denom);
        }
    }
    data
}

/// Creates a grid with NaN values at specified `(col, row)` positions and
/// zeros elsewhere.
pub fn create_grid_with_nans(
    width: usize,
    height: usize,
    nan_positions: &[(usize, usize)],
) -> Vec<f32> {
    let mut data = vec![0.0f32; width * height];
    for &(col, row) in nan_positions {
        if col < width && row < height {
            data[row * width + col] = f32::NAN;
        }
    }
    data
}

/// Evenly spaced latitudes from north to south, inclusive of both ends.
pub fn lat_axis(rows: usize, north: f32, south: f32) -> Vec<f32> {
    linspace(north, south, rows)
}

/// Evenly spaced longitudes from west to east, inclusive of both ends.
pub fn lon_axis(cols: usize, west: f32, east: f32) -> Vec<f32> {
    linspace(west, east, cols)
}

/// 2-D latitude and longitude meshes (rows x cols) spanning the given box.
///
/// Returns `(lats, lons)` in row-major order, the layout of a curvilinear
/// product's coordinate variables.
pub fn lat_lon_mesh(
    rows: usize,
    cols: usize,
    (west, south, east, north): (f32, f32, f32, f32),
) -> (Vec<f32>, Vec<f32>) {
    let lats = lat_axis(rows, north, south);
    let lons = lon_axis(cols, west, east);
    let mut lat_mesh = Vec::with_capacity(rows * cols);
    let mut lon_mesh = Vec::with_capacity(rows * cols);
    for &lat in &lats {
        for &lon in &lons {
            lat_mesh.push(lat);
            lon_mesh.push(lon);
        }
    }
    (lat_mesh, lon_mesh)
}

/// A regular-grid [`GeoGrid`] over the given box.
pub fn axes_geo_grid(
    values: Vec<f32>,
    rows: usize,
    cols: usize,
    (west, south, east, north): (f32, f32, f32, f32),
) -> GeoGrid {
    let values = Field2D::new(values, cols, rows).expect("values must be rows * cols");
    let coords = Coordinates::Axes {
        lats: lat_axis(rows, north, south),
        lons: lon_axis(cols, west, east),
    };
    GeoGrid::new(values, coords).expect("consistent test grid")
}

/// A curvilinear [`GeoGrid`] over the given box.
pub fn mesh_geo_grid(
    values: Vec<f32>,
    rows: usize,
    cols: usize,
    bbox: (f32, f32, f32, f32),
) -> GeoGrid {
    let (lats, lons) = lat_lon_mesh(rows, cols, bbox);
    let coords = Coordinates::Mesh {
        lats: Field2D::new(lats, cols, rows).expect("mesh size"),
        lons: Field2D::new(lons, cols, rows).expect("mesh size"),
    };
    let values = Field2D::new(values, cols, rows).expect("values must be rows * cols");
    GeoGrid::new(values, coords).expect("consistent test grid")
}

fn linspace(start: f32, end: f32, n: usize) -> Vec<f32> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => (0..n)
            .map(|i| start + (end - start) * i as f32 / (n - 1) as f32)
            .collect(),
    }
}
