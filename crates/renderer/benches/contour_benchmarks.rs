//! Benchmarks for filled-contour rasterization and the transparency pass.
//!
//! Run with: cargo bench --package renderer --bench contour_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use overlay_common::{BoundingBox, Coordinates, Field2D, GeoGrid};
use renderer::colormap::{Color, ColorTable, Colormap};
use renderer::contour::{ContourLevels, Extend, FilledContour};
use renderer::transparency::key_white_pixels;
use renderer::Canvas;

/// A smooth global field with hills and valleys, NO2-like magnitudes.
fn generate_smooth_grid(cols: usize, rows: usize) -> GeoGrid {
    let mut data = Vec::with_capacity(cols * rows);
    for y in 0..rows {
        for x in 0..cols {
            let fx = x as f32 / cols as f32;
            let fy = y as f32 / rows as f32;
            let v1 = (fx * std::f32::consts::PI * 4.0).sin() * 60.0;
            let v2 = (fy * std::f32::consts::PI * 4.0).sin() * 60.0;
            data.push(150.0 + v1 + v2);
        }
    }

    let lats = (0..rows)
        .map(|i| 90.0 - 180.0 * i as f32 / (rows - 1) as f32)
        .collect();
    let lons = (0..cols)
        .map(|i| -180.0 + 360.0 * i as f32 / (cols - 1) as f32)
        .collect();

    let values = Field2D::new(data, cols, rows).unwrap();
    GeoGrid::new(values, Coordinates::Axes { lats, lons }).unwrap()
}

// =============================================================================
// BAND COLOR PRECOMPUTATION
// =============================================================================

fn bench_filled_contour_new(c: &mut Criterion) {
    let mut group = c.benchmark_group("filled_contour_new");
    let dashboard = ColorTable::dashboard().to_colormap().unwrap();
    let rainbow = Colormap::rainbow(256).with_over(Color::rgb(139, 0, 0));

    let cases = [
        ("no2", 0.0, 300.1, 0.1, &dashboard, Extend::Neither),
        ("aod", 0.0, 1.1, 0.001, &rainbow, Extend::Both),
        ("co", 0.0, 1.1, 0.0001, &dashboard, Extend::Neither),
    ];

    for (name, start, stop, step, cmap, extend) in cases {
        let levels = ContourLevels::arange(start, stop, step).unwrap();
        group.bench_function(BenchmarkId::new("levels", name), |b| {
            b.iter(|| FilledContour::new(black_box(levels), cmap, extend));
        });
    }

    group.finish();
}

// =============================================================================
// RASTERIZATION
// =============================================================================

fn bench_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("filled_contour_draw");
    let levels = ContourLevels::arange(0.0, 300.1, 0.1).unwrap();
    let cmap = ColorTable::dashboard().to_colormap().unwrap();
    let contour = FilledContour::new(levels, &cmap, Extend::Neither);

    let sizes = [(90, 45), (360, 180), (720, 360)];
    for (cols, rows) in sizes {
        let grid = generate_smooth_grid(cols, rows);
        group.throughput(Throughput::Elements((cols * rows) as u64));
        group.bench_with_input(
            BenchmarkId::new("grid", format!("{}x{}", cols, rows)),
            &grid,
            |b, grid| {
                b.iter(|| {
                    let mut canvas = Canvas::new(1024, 512, BoundingBox::global()).unwrap();
                    contour.draw(black_box(grid), &mut canvas);
                    canvas
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// TRANSPARENCY
// =============================================================================

fn bench_transparency_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("transparency_key");

    for (width, height) in [(1024, 512), (4096, 2048)] {
        let pixels: Vec<u8> = (0..width * height)
            .flat_map(|i| {
                if i % 3 == 0 {
                    [255u8, 255, 255, 255]
                } else {
                    [200, 10, 30, 255]
                }
            })
            .collect();

        group.throughput(Throughput::Elements((width * height) as u64));
        group.bench_with_input(
            BenchmarkId::new("pixels", format!("{}x{}", width, height)),
            &pixels,
            |b, pixels| {
                b.iter(|| {
                    let mut buf = pixels.clone();
                    key_white_pixels(black_box(&mut buf));
                    buf
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_filled_contour_new,
    bench_draw,
    bench_transparency_key,
);
criterion_main!(benches);
