//! Filled contour rendering of gridded data onto a plate carrée canvas.
//!
//! Each grid cell is split into two triangles; the field is interpolated
//! linearly inside each triangle and every covered pixel is painted with the
//! color of the contour band its value falls into. Cells may be regular
//! (1-D lat/lon axes) or curvilinear (2-D lat/lon meshes).

use serde::{Deserialize, Serialize};

use overlay_common::bbox::normalize_longitude;
use overlay_common::GeoGrid;

use crate::canvas::Canvas;
use crate::colormap::{Color, Colormap};
use crate::error::{RenderError, RenderResult};

/// Tolerance for pixel centers lying on a shared triangle edge.
const EDGE_EPSILON: f64 = 1e-9;

/// Evenly spaced contour levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourLevels {
    start: f64,
    step: f64,
    count: usize,
}

impl ContourLevels {
    /// Levels `start, start + step, ...` strictly below `stop`, with
    /// `ceil((stop - start) / step)` entries.
    pub fn arange(start: f64, stop: f64, step: f64) -> RenderResult<Self> {
        if !start.is_finite() || !stop.is_finite() || !(step > 0.0) {
            return Err(RenderError::InvalidLevels(format!(
                "start={}, stop={}, step={}",
                start, stop, step
            )));
        }
        let count = ((stop - start) / step).ceil();
        if !(count >= 2.0) {
            return Err(RenderError::InvalidLevels(format!(
                "at least two levels required, [{}, {}) by {} gives {}",
                start,
                stop,
                step,
                count.max(0.0)
            )));
        }
        Ok(Self {
            start,
            step,
            count: count as usize,
        })
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn first(&self) -> f64 {
        self.start
    }

    pub fn last(&self) -> f64 {
        self.level(self.count - 1)
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn level(&self, i: usize) -> f64 {
        self.start + i as f64 * self.step
    }

    /// Number of filled bands between consecutive levels.
    pub fn band_count(&self) -> usize {
        self.count - 1
    }

    /// The band a value falls into.
    ///
    /// Band `i` is `(lᵢ, lᵢ₊₁]`; the lowest band also takes `l₀` itself. A
    /// value on an interior level belongs to the band below it.
    pub fn band_of(&self, value: f64) -> Band {
        if value < self.first() {
            return Band::Below;
        }
        if value > self.last() {
            return Band::Above;
        }
        let top = self.band_count() - 1;
        let guess = ((value - self.start) / self.step).ceil() - 1.0;
        let mut i = (guess.max(0.0) as usize).min(top);
        // The division can land one step off near a level
        if i > 0 && value <= self.level(i) {
            i -= 1;
        } else if i < top && value > self.level(i + 1) {
            i += 1;
        }
        Band::Inside(i)
    }
}

/// Position of a value relative to the contour levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Below,
    Inside(usize),
    Above,
}

/// Which out-of-range values get painted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extend {
    #[default]
    Neither,
    Min,
    Max,
    Both,
}

impl Extend {
    fn low(self) -> bool {
        matches!(self, Extend::Min | Extend::Both)
    }

    fn high(self) -> bool {
        matches!(self, Extend::Max | Extend::Both)
    }
}

/// Counters reported by [`FilledContour::draw`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub cells_drawn: usize,
    pub cells_masked: usize,
    pub cells_wrapped: usize,
    pub pixels_painted: usize,
}

/// A grid-cell corner in canvas pixel space.
#[derive(Debug, Clone, Copy)]
struct Vertex {
    x: f64,
    y: f64,
    value: f64,
}

/// A filled contour style: levels plus one precomputed color per band.
#[derive(Debug, Clone)]
pub struct FilledContour {
    levels: ContourLevels,
    band_colors: Vec<Color>,
    under: Option<Color>,
    over: Option<Color>,
}

impl FilledContour {
    /// Band `i` is colored by the colormap at its midpoint, normalized over
    /// `[first level, last level]`.
    pub fn new(levels: ContourLevels, colormap: &Colormap, extend: Extend) -> Self {
        let first = levels.first();
        let span = levels.last() - first;
        let band_colors = (0..levels.band_count())
            .map(|i| {
                let mid = levels.level(i) + levels.step() / 2.0;
                colormap.sample(((mid - first) / span) as f32)
            })
            .collect();

        Self {
            levels,
            band_colors,
            under: extend.low().then(|| colormap.under()),
            over: extend.high().then(|| colormap.over()),
        }
    }

    pub fn levels(&self) -> &ContourLevels {
        &self.levels
    }

    pub fn band_colors(&self) -> &[Color] {
        &self.band_colors
    }

    /// Paint color for a value, or `None` when it stays unfilled.
    #[inline]
    pub fn color_for(&self, value: f64) -> Option<Color> {
        if value.is_nan() {
            return None;
        }
        match self.levels.band_of(value) {
            Band::Below => self.under,
            Band::Above => self.over,
            Band::Inside(i) => Some(self.band_colors[i]),
        }
    }

    /// Rasterize a grid onto the canvas.
    ///
    /// Cells with a NaN corner value or coordinate are left unfilled, as are
    /// cells spanning more than 180° of longitude (they straddle the
    /// antimeridian).
    pub fn draw(&self, grid: &GeoGrid, canvas: &mut Canvas) -> DrawStats {
        let mut stats = DrawStats::default();
        let (rows, cols) = (grid.rows(), grid.cols());
        if rows < 2 || cols < 2 {
            return stats;
        }

        for r in 0..rows - 1 {
            for c in 0..cols - 1 {
                let corners = [(r, c), (r, c + 1), (r + 1, c + 1), (r + 1, c)];
                let mut lons = [0f64; 4];
                let mut lats = [0f64; 4];
                let mut values = [0f64; 4];
                let mut masked = false;

                for (k, &(row, col)) in corners.iter().enumerate() {
                    let (lat, lon) = grid.coords.at(row, col);
                    let value = grid.values.get(row, col);
                    if value.is_nan() || lat.is_nan() || lon.is_nan() {
                        masked = true;
                        break;
                    }
                    lons[k] = normalize_longitude(lon as f64);
                    lats[k] = lat as f64;
                    values[k] = value as f64;
                }
                if masked {
                    stats.cells_masked += 1;
                    continue;
                }

                let lon_min = lons.iter().copied().fold(f64::INFINITY, f64::min);
                let lon_max = lons.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                if lon_max - lon_min > 180.0 {
                    stats.cells_wrapped += 1;
                    continue;
                }

                let v: [Vertex; 4] = std::array::from_fn(|k| {
                    let (x, y) = canvas.project(lons[k], lats[k]);
                    Vertex {
                        x,
                        y,
                        value: values[k],
                    }
                });

                stats.pixels_painted += self.fill_triangle(canvas, v[0], v[1], v[2]);
                stats.pixels_painted += self.fill_triangle(canvas, v[0], v[2], v[3]);
                stats.cells_drawn += 1;
            }
        }

        stats
    }

    /// Paint every pixel whose center lies inside the triangle.
    fn fill_triangle(&self, canvas: &mut Canvas, a: Vertex, b: Vertex, c: Vertex) -> usize {
        let area = edge(a, b, c.x, c.y);
        if area.abs() < 1e-12 {
            return 0;
        }

        let min_x = a.x.min(b.x).min(c.x);
        let max_x = a.x.max(b.x).max(c.x);
        let min_y = a.y.min(b.y).min(c.y);
        let max_y = a.y.max(b.y).max(c.y);

        // Pixel n has its center at n + 0.5
        let x0 = (min_x - 0.5).ceil().max(0.0);
        let x1 = (max_x - 0.5).floor().min(canvas.width() as f64 - 1.0);
        let y0 = (min_y - 0.5).ceil().max(0.0);
        let y1 = (max_y - 0.5).floor().min(canvas.height() as f64 - 1.0);
        if x0 > x1 || y0 > y1 {
            return 0;
        }

        let mut painted = 0;
        for py in y0 as usize..=y1 as usize {
            let cy = py as f64 + 0.5;
            for px in x0 as usize..=x1 as usize {
                let cx = px as f64 + 0.5;
                let wa = edge(b, c, cx, cy) / area;
                let wb = edge(c, a, cx, cy) / area;
                let wc = 1.0 - wa - wb;
                if wa < -EDGE_EPSILON || wb < -EDGE_EPSILON || wc < -EDGE_EPSILON {
                    continue;
                }
                let value = wa * a.value + wb * b.value + wc * c.value;
                if let Some(color) = self.color_for(value) {
                    canvas.put(px, py, color);
                    painted += 1;
                }
            }
        }
        painted
    }
}

/// Twice the signed area of triangle (a, b, p).
#[inline]
fn edge(a: Vertex, b: Vertex, px: f64, py: f64) -> f64 {
    (b.x - a.x) * (py - a.y) - (b.y - a.y) * (px - a.x)
}
