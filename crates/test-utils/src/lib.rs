//! Test helpers for the overlay workspace.
//!
//! - [`paths`]: locate optional real granules and build scratch batch dirs
//! - [`generators`]: synthetic value grids, coordinate axes and meshes
//! - [`fixtures`]: in-memory datasets, a file-name keyed reader, tar archives
//!
//! Real NO2/AOD/CO files are large and not checked in. Tests that need one
//! use [`require_test_file!`] and skip when it is absent.

pub mod fixtures;
pub mod generators;
pub mod paths;

pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Resolve a real data file or return early from the test.
///
/// ```ignore
/// let path = require_test_file!("OMPS-NPP_NO2_Global_202305_v2.nc");
/// ```
#[macro_export]
macro_rules! require_test_file {
    ($name:expr) => {{
        match $crate::find_test_file($name) {
            Some(path) => path,
            None => {
                eprintln!("SKIPPED: '{}' not found (set TEST_DATA_DIR)", $name);
                return;
            }
        }
    }};
}

/// Assert one RGBA pixel of an `image::RgbaImage`-like value.
///
/// Works with anything exposing `get_pixel(x, y).0` as `[u8; 4]`.
///
/// ```ignore
/// assert_pixel_eq!(img, (0, 0), [255, 255, 255, 0]);
/// ```
#[macro_export]
macro_rules! assert_pixel_eq {
    ($img:expr, ($x:expr, $y:expr), $rgba:expr) => {{
        let actual: [u8; 4] = $img.get_pixel($x, $y).0;
        let expected: [u8; 4] = $rgba;
        if actual != expected {
            panic!(
                "pixel ({}, {}) is {:?}, expected {:?}",
                $x, $y, actual, expected
            );
        }
    }};
}
