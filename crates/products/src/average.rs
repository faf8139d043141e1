//! Element-wise mean over a stack of equally shaped arrays.

use netcdf_parser::NdArray;

use crate::error::{ProductError, Result};

/// Running element-wise sum of arrays sharing one shape.
///
/// Sums are kept in f64 so long stacks of small values do not drift. A NaN
/// in any member makes that cell of the mean NaN.
#[derive(Debug, Default)]
pub struct MeanAccumulator {
    shape: Vec<usize>,
    sum: Vec<f64>,
    count: usize,
}

impl MeanAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one array; the first array fixes the shape.
    pub fn add(&mut self, array: &NdArray) -> Result<()> {
        if self.count == 0 {
            self.shape = array.shape().to_vec();
            self.sum = array.data().iter().map(|&v| v as f64).collect();
        } else {
            if array.shape() != self.shape.as_slice() {
                return Err(ProductError::ShapeMismatch {
                    expected: self.shape.clone(),
                    actual: array.shape().to_vec(),
                });
            }
            for (acc, &v) in self.sum.iter_mut().zip(array.data()) {
                *acc += v as f64;
            }
        }
        self.count += 1;
        Ok(())
    }

    /// Number of arrays added so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// The mean of everything added.
    pub fn finish(self) -> Result<NdArray> {
        if self.count == 0 {
            return Err(ProductError::EmptyStack);
        }
        let n = self.count as f64;
        let data = self.sum.into_iter().map(|s| (s / n) as f32).collect();
        Ok(NdArray::new(data, self.shape)?)
    }
}

/// Mean of all arrays in `arrays`.
pub fn mean_grid<I>(arrays: I) -> Result<NdArray>
where
    I: IntoIterator<Item = NdArray>,
{
    let mut acc = MeanAccumulator::new();
    for array in arrays {
        acc.add(&array)?;
    }
    acc.finish()
}
