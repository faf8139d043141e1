//! Gridded fields and their geographic coordinates.

use crate::error::{GridError, GridResult};

/// A 2-D field of values in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Field2D {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl Field2D {
    /// Wrap row-major data; `data.len()` must equal `width * height`.
    pub fn new(data: Vec<f32>, width: usize, height: usize) -> GridResult<Self> {
        if data.len() != width * height {
            return Err(GridError::LengthMismatch {
                width,
                height,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// A field with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: f32) -> Self {
        Self {
            data: vec![value; width * height],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Value at `row`, `col`. Panics when out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.width + col]
    }

    /// Minimum and maximum of the non-NaN values, if any.
    pub fn value_range(&self) -> Option<(f32, f32)> {
        self.data
            .iter()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Latitude/longitude of every grid cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Coordinates {
    /// Regular grid: one latitude per row, one longitude per column.
    Axes { lats: Vec<f32>, lons: Vec<f32> },
    /// Curvilinear grid: a latitude and longitude for every cell.
    Mesh { lats: Field2D, lons: Field2D },
}

impl Coordinates {
    /// (rows, columns) covered by these coordinates.
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Coordinates::Axes { lats, lons } => (lats.len(), lons.len()),
            Coordinates::Mesh { lats, .. } => lats.shape(),
        }
    }

    /// (latitude, longitude) of a cell.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> (f32, f32) {
        match self {
            Coordinates::Axes { lats, lons } => (lats[row], lons[col]),
            Coordinates::Mesh { lats, lons } => (lats.get(row, col), lons.get(row, col)),
        }
    }
}

/// A field together with the coordinates of its cells.
#[derive(Debug, Clone)]
pub struct GeoGrid {
    pub values: Field2D,
    pub coords: Coordinates,
}

impl GeoGrid {
    /// Pair values with coordinates, checking that their shapes agree.
    pub fn new(values: Field2D, coords: Coordinates) -> GridResult<Self> {
        if let Coordinates::Mesh { lats, lons } = &coords {
            if lats.shape() != lons.shape() {
                return Err(GridError::ShapeMismatch {
                    expected: lats.shape(),
                    actual: lons.shape(),
                });
            }
        }
        if values.shape() != coords.shape() {
            return Err(GridError::ShapeMismatch {
                expected: values.shape(),
                actual: coords.shape(),
            });
        }
        if values.width() == 0 || values.height() == 0 {
            return Err(GridError::Empty);
        }
        Ok(Self { values, coords })
    }

    pub fn rows(&self) -> usize {
        self.values.height()
    }

    pub fn cols(&self) -> usize {
        self.values.width()
    }
}
