//! NetCDF reader for gridded atmospheric products.
//!
//! The processors only need one thing from a data file: a numeric array by
//! variable name. That contract is expressed by the [`Dataset`] and
//! [`DatasetReader`] traits so callers can swap the libnetcdf-backed
//! [`NetCdfReader`] for an in-memory dataset in tests.
//!
//! # Masking and unpacking
//!
//! Values are returned as `f32` with the usual CF conventions applied:
//! `_FillValue`, `missing_value` and values outside `valid_min`/`valid_max`
//! become NaN, then `scale_factor` and `add_offset` are applied.

pub mod array;
pub mod error;
pub mod native;

use std::path::Path;

pub use array::NdArray;
pub use error::{NetCdfError, NetCdfResult};
pub use native::{silence_hdf5_errors, NetCdfDataset, NetCdfReader, DEFAULT_FLOAT_FILL};

/// An opened gridded-data file.
pub trait Dataset {
    /// Read a variable by name.
    fn variable(&self, name: &str) -> NetCdfResult<NdArray>;

    /// Names of all variables in the file.
    fn variable_names(&self) -> Vec<String>;
}

/// Opens gridded-data files.
pub trait DatasetReader {
    fn open(&self, path: &Path) -> NetCdfResult<Box<dyn Dataset>>;
}
