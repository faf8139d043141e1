//! Tar archive extraction for bundled CO emission files.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{ProductError, Result};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Extract every entry of `archive` into `dest` and return the regular files
/// found below `dest`, sorted by path.
///
/// Gzip compression is detected from the magic bytes, not the extension.
pub fn extract_archive(archive: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
    let mut file = File::open(archive)?;
    let gzipped = is_gzip(&mut file)?;

    let unpacked = if gzipped {
        tar::Archive::new(GzDecoder::new(BufReader::new(file))).unpack(dest)
    } else {
        tar::Archive::new(BufReader::new(file)).unpack(dest)
    };
    unpacked.map_err(|e| ProductError::Archive(format!("{}: {}", archive.display(), e)))?;

    let files = collect_files(dest)?;
    debug!(
        archive = %archive.display(),
        dest = %dest.display(),
        gzipped,
        files = files.len(),
        "Extracted archive"
    );
    Ok(files)
}

/// All regular files below `root` at any depth, sorted by path.
pub fn collect_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

fn is_gzip(file: &mut File) -> Result<bool> {
    let mut magic = [0u8; 2];
    let mut read = 0;
    while read < magic.len() {
        match file.read(&mut magic[read..])? {
            0 => break,
            n => read += n,
        }
    }
    file.seek(SeekFrom::Start(0))?;
    Ok(read == magic.len() && magic == GZIP_MAGIC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::write_tar_archive;

    #[test]
    fn test_plain_and_gzip_archives() {
        for gzip in [false, true] {
            let root = tempfile::tempdir().unwrap();
            let archive = root.path().join("onroad_2021_07_conus.tar");
            write_tar_archive(
                &archive,
                &[("day2/b.nc", &b"2"[..]), ("day1/a.nc", &b"1"[..]), ("c.nc", &b"3"[..])],
                gzip,
            )
            .unwrap();

            let dest = root.path().join("CO_202107");
            std::fs::create_dir(&dest).unwrap();
            let files = extract_archive(&archive, &dest).unwrap();

            assert_eq!(
                files,
                vec![dest.join("c.nc"), dest.join("day1/a.nc"), dest.join("day2/b.nc")],
                "gzip={}",
                gzip
            );
            assert_eq!(std::fs::read(dest.join("day1/a.nc")).unwrap(), b"1");
        }
    }

    #[test]
    fn test_not_an_archive() {
        let root = tempfile::tempdir().unwrap();
        let archive = root.path().join("broken.tar");
        std::fs::write(&archive, vec![7u8; 1024]).unwrap();

        let err = extract_archive(&archive, root.path()).unwrap_err();
        assert!(matches!(err, ProductError::Archive(_)));
    }

    #[test]
    fn test_missing_archive() {
        let root = tempfile::tempdir().unwrap();
        let err = extract_archive(&root.path().join("nope.tar"), root.path()).unwrap_err();
        assert!(matches!(err, ProductError::FileRead(_)));
    }
}
