//! Path utilities for locating test data files.
//!
//! Real satellite granules are large and not checked in. Tests that want
//! them look in `TEST_DATA_DIR` first, then the workspace `testdata/`.

use std::path::PathBuf;

/// Returns the workspace root directory.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// Searches for a test file in multiple locations.
///
/// This function checks the following locations in order:
/// 1. Environment variable `TEST_DATA_DIR` (if set)
/// 2. `crates/netcdf-parser/testdata/`
/// 3. `testdata/` at the workspace root
pub fn find_test_file(name: &str) -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(test_data_dir) = std::env::var("TEST_DATA_DIR") {
        candidates.push(PathBuf::from(test_data_dir).join(name));
    }

    let root = workspace_root();
    candidates.extend([
        root.join("crates/netcdf-parser/testdata").join(name),
        root.join("testdata").join(name),
    ]);

    candidates.into_iter().find(|path| path.exists())
}

/// Creates a temporary directory for test output.
///
/// The directory is automatically cleaned up when the returned `TempDir` is dropped.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary test directory")
}

/// Creates an input/output directory pair under one temporary root.
///
/// Returns `(root, input_dir, output_dir)`; keep `root` alive for the
/// duration of the test.
pub fn batch_dirs() -> (tempfile::TempDir, PathBuf, PathBuf) {
    let root = temp_test_dir();
    let input = root.path().join("input");
    let output = root.path().join("output");
    std::fs::create_dir_all(&input).expect("Failed to create input dir");
    std::fs::create_dir_all(&output).expect("Failed to create output dir");
    (root, input, output)
}
