//! N-dimensional arrays read from data files.

use overlay_common::Field2D;

use crate::error::{NetCdfError, NetCdfResult};

/// A row-major array of `f32` with its dimension lengths.
#[derive(Debug, Clone, PartialEq)]
pub struct NdArray {
    data: Vec<f32>,
    shape: Vec<usize>,
}

impl NdArray {
    /// Wrap data with a shape; the shape's product must equal `data.len()`.
    pub fn new(data: Vec<f32>, shape: Vec<usize>) -> NetCdfResult<Self> {
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(NetCdfError::InvalidFormat(format!(
                "shape {:?} needs {} values, got {}",
                shape,
                expected,
                data.len()
            )));
        }
        Ok(Self { data, shape })
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// The trailing 2-D plane at index 0 of every leading axis.
    ///
    /// A `(time, level, y, x)` variable yields its `(y, x)` plane for the
    /// first time and level.
    pub fn first_plane(&self) -> NetCdfResult<Field2D> {
        let n = self.ndim();
        if n < 2 {
            return Err(NetCdfError::InvalidFormat(format!(
                "expected at least 2 dimensions, got shape {:?}",
                self.shape
            )));
        }
        if self.shape.contains(&0) {
            return Err(NetCdfError::InvalidFormat(format!(
                "no data in a variable of shape {:?}",
                self.shape
            )));
        }
        let height = self.shape[n - 2];
        let width = self.shape[n - 1];
        let plane = self.data[..width * height].to_vec();
        Ok(Field2D::new(plane, width, height)?)
    }

    /// The values of a 1-D coordinate axis.
    pub fn as_axis(&self) -> NetCdfResult<Vec<f32>> {
        if self.ndim() != 1 {
            return Err(NetCdfError::InvalidFormat(format!(
                "expected a 1-D axis, got shape {:?}",
                self.shape
            )));
        }
        Ok(self.data.clone())
    }
}
