//! Output folders: one per key, created once, never overwritten.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{ProductError, Result};
use crate::metadata::OutputKey;

/// Name of the final transparent overlay inside a key's folder.
pub const FINAL_IMAGE_NAME: &str = "img.png";

/// Name of the georeferenced GeoTIFF written by the optional tool chain.
pub const GEOREFERENCED_NAME: &str = "img.tif";

/// Name of the tile pyramid directory written by the optional tool chain.
pub const TILES_DIR_NAME: &str = "tiles";

/// Whether `<output_root>/<folder_name>` is an existing directory.
pub fn folder_exists(output_root: &Path, folder_name: &str) -> bool {
    output_root.join(folder_name).is_dir()
}

/// A freshly created output folder for one key.
#[derive(Debug, Clone)]
pub struct OutputSlot {
    dir: PathBuf,
    intermediate_name: String,
}

impl OutputSlot {
    /// Create `<output_root>/<key>`, creating `output_root` first if needed.
    ///
    /// Fails with [`ProductError::FolderExists`] when the key's folder is
    /// already there.
    pub fn create(output_root: &Path, key: &OutputKey, intermediate_name: &str) -> Result<Self> {
        fs::create_dir_all(output_root)?;
        let dir = output_root.join(key.folder_name());
        match fs::create_dir(&dir) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(ProductError::FolderExists(dir));
            }
            Err(e) => return Err(e.into()),
        }

        Ok(Self {
            dir,
            intermediate_name: intermediate_name.to_string(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The opaque render before transparency keying.
    pub fn intermediate_path(&self) -> PathBuf {
        self.dir.join(&self.intermediate_name)
    }

    pub fn final_path(&self) -> PathBuf {
        self.dir.join(FINAL_IMAGE_NAME)
    }

    pub fn georeferenced_path(&self) -> PathBuf {
        self.dir.join(GEOREFERENCED_NAME)
    }

    pub fn tiles_dir(&self) -> PathBuf {
        self.dir.join(TILES_DIR_NAME)
    }
}
