//! Native NetCDF reading using the netcdf library.
//!
//! The netcdf library wraps libnetcdf/HDF5 and needs a file path, which is
//! exactly what the batch processors have.

use std::path::{Path, PathBuf};
use std::sync::Once;

use tracing::debug;

use crate::array::NdArray;
use crate::error::{NetCdfError, NetCdfResult};
use crate::{Dataset, DatasetReader};

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose error messages to stderr even when errors
/// are handled gracefully by the Rust code (e.g., when checking for optional
/// attributes that don't exist). This creates confusing log spam like:
///
/// ```text
/// HDF5-DIAG: Error detected in HDF5 (1.10.8) thread 3:
///   #003: ../../../src/H5Adense.c line 397 in H5A__dense_open(): can't locate attribute in name index
/// ```
///
/// Call it early in `main()`, before any HDF5/NetCDF operations occur. Only
/// the first call has an effect.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Opens files with libnetcdf.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetCdfReader;

impl DatasetReader for NetCdfReader {
    fn open(&self, path: &Path) -> NetCdfResult<Box<dyn Dataset>> {
        Ok(Box::new(NetCdfDataset::open(path)?))
    }
}

/// An open NetCDF file.
pub struct NetCdfDataset {
    file: netcdf::File,
    path: PathBuf,
}

impl NetCdfDataset {
    pub fn open(path: &Path) -> NetCdfResult<Self> {
        silence_hdf5_errors();

        if !path.is_file() {
            return Err(NetCdfError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )));
        }

        let file = netcdf::open(path).map_err(|e| {
            NetCdfError::InvalidFormat(format!("Failed to open {}: {}", path.display(), e))
        })?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Dataset for NetCdfDataset {
    fn variable(&self, name: &str) -> NetCdfResult<NdArray> {
        let var = self
            .file
            .variable(name)
            .ok_or_else(|| NetCdfError::MissingData(format!("{} variable", name)))?;

        let shape: Vec<usize> = var.dimensions().iter().map(|dim| dim.len()).collect();

        // libnetcdf converts any numeric storage type to float on read
        let raw: Vec<f32> = var
            .get_values(..)
            .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to read {}: {}", name, e)))?;

        let packing = Packing::from_variable(&var);
        let data = packing.unpack(raw);

        debug!(
            file = %self.path.display(),
            variable = name,
            shape = ?shape,
            "Read variable"
        );

        NdArray::new(data, shape)
    }

    fn variable_names(&self) -> Vec<String> {
        self.file.variables().map(|var| var.name()).collect()
    }
}

/// libnetcdf's default fill for `float` and `double` (`NC_FILL_FLOAT`,
/// `NC_FILL_DOUBLE`), as read into f32.
pub const DEFAULT_FLOAT_FILL: f32 = 9.969_209_968_386_869e36;

/// CF masking and packing attributes of a variable.
///
/// Without a `_FillValue` attribute, unwritten cells hold the library's
/// default float fill and are masked as well.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Packing {
    pub fill_value: Option<f32>,
    pub missing_value: Option<f32>,
    pub valid_min: Option<f32>,
    pub valid_max: Option<f32>,
    pub scale_factor: Option<f32>,
    pub add_offset: Option<f32>,
}

impl Packing {
    fn from_variable(var: &netcdf::Variable) -> Self {
        Self {
            fill_value: get_f32_attr(var, "_FillValue"),
            missing_value: get_f32_attr(var, "missing_value"),
            valid_min: get_f32_attr(var, "valid_min"),
            valid_max: get_f32_attr(var, "valid_max"),
            scale_factor: get_f32_attr(var, "scale_factor"),
            add_offset: get_f32_attr(var, "add_offset"),
        }
    }

    /// Mask raw values to NaN, then apply scale and offset.
    pub fn unpack(&self, mut raw: Vec<f32>) -> Vec<f32> {
        let scale = self.scale_factor.unwrap_or(1.0);
        let offset = self.add_offset.unwrap_or(0.0);
        let packed = self.scale_factor.is_some() || self.add_offset.is_some();

        for value in raw.iter_mut() {
            if self.is_masked(*value) {
                *value = f32::NAN;
            } else if packed {
                *value = *value * scale + offset;
            }
        }
        raw
    }

    fn is_masked(&self, value: f32) -> bool {
        if value.is_nan() {
            return false;
        }
        value == self.fill_value.unwrap_or(DEFAULT_FLOAT_FILL)
            || self.missing_value == Some(value)
            || self.valid_min.is_some_and(|min| value < min)
            || self.valid_max.is_some_and(|max| value > max)
    }
}

// =============================================================================
// Internal helpers
// =============================================================================

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

/// Helper to get an attribute as f32.
fn get_f32_attr(var: &netcdf::Variable, name: &str) -> Option<f32> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    f32::try_from(attr_value).ok()
}
