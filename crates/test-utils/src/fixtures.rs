//! Common test fixtures: product file names, in-memory datasets and archives.

use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::Path;

use netcdf_parser::{Dataset, DatasetReader, NdArray, NetCdfError, NetCdfResult};

/// File names shaped like the products the batch runner sees.
pub mod file_names {
    /// OMPS (Suomi NPP) NO2 monthly average.
    pub const NO2_OMPS: &str = "OMPS-NPP_NO2_Global_202305_v2.nc";

    /// TROPOMI NO2 monthly average.
    pub const NO2_TROPOMI: &str = "TROPOMI_no2_global_20230415_v1.nc";

    /// VIIRS SNPP AOD: the period sits in the second-to-last token.
    pub const AOD_SNPP: &str = "viirs_npp_aod_202306_gridded.nc";

    /// VIIRS NOAA-20 AOD: the period sits in the last token.
    pub const AOD_NOAA20: &str = "viirs_n20_aod_gridded_202307.nc";

    /// On-road CO emissions archive for July 2021.
    pub const CO_ONROAD: &str = "onroad_2021_07_conus.tar";

    /// Not a product at all.
    pub const UNRELATED: &str = "README.txt";
}

/// A dataset held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataset {
    variables: HashMap<String, NdArray>,
}

impl InMemoryDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable; panics when `data` does not match `shape`.
    pub fn with_variable(mut self, name: &str, data: Vec<f32>, shape: &[usize]) -> Self {
        let array = NdArray::new(data, shape.to_vec()).expect("data length must match shape");
        self.variables.insert(name.to_string(), array);
        self
    }
}

impl Dataset for InMemoryDataset {
    fn variable(&self, name: &str) -> NetCdfResult<NdArray> {
        self.variables
            .get(name)
            .cloned()
            .ok_or_else(|| NetCdfError::MissingData(format!("{} variable", name)))
    }

    fn variable_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.variables.keys().cloned().collect();
        names.sort();
        names
    }
}

/// A [`DatasetReader`] that serves [`InMemoryDataset`]s by file name.
///
/// Lookups use the final path component only, so a dataset registered as
/// `"wrfout_01.nc"` is found wherever the archive extracted it.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReader {
    datasets: HashMap<String, InMemoryDataset>,
}

impl InMemoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset(mut self, file_name: &str, dataset: InMemoryDataset) -> Self {
        self.datasets.insert(file_name.to_string(), dataset);
        self
    }
}

impl DatasetReader for InMemoryReader {
    fn open(&self, path: &Path) -> NetCdfResult<Box<dyn Dataset>> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match self.datasets.get(&name) {
            Some(dataset) => Ok(Box::new(dataset.clone())),
            None => Err(NetCdfError::InvalidFormat(format!(
                "no in-memory dataset registered for {}",
                path.display()
            ))),
        }
    }
}

/// Write a placeholder input file; the in-memory reader ignores its content.
pub fn touch(path: &Path) -> io::Result<()> {
    std::fs::write(path, b"placeholder")
}

/// Write a tar archive holding `entries` (`(path inside archive, bytes)`),
/// gzip-compressed when `gzip` is set.
pub fn write_tar_archive(path: &Path, entries: &[(&str, &[u8])], gzip: bool) -> io::Result<()> {
    let file = File::create(path)?;
    if gzip {
        let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        let encoder = append_entries(tar::Builder::new(encoder), entries)?;
        encoder.finish()?;
    } else {
        append_entries(tar::Builder::new(file), entries)?;
    }
    Ok(())
}

fn append_entries<W: io::Write>(
    mut builder: tar::Builder<W>,
    entries: &[(&str, &[u8])],
) -> io::Result<W> {
    for (name, data) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, name, *data)?;
    }
    builder.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_reader_by_file_name() {
        let reader = InMemoryReader::new().with_dataset(
            "a.nc",
            InMemoryDataset::new().with_variable("CO", vec![1.0, 2.0], &[1, 2]),
        );

        let dataset = reader.open(Path::new("/some/dir/a.nc")).unwrap();
        assert_eq!(dataset.variable("CO").unwrap().data(), &[1.0, 2.0]);
        assert_eq!(dataset.variable_names(), vec!["CO"]);
        assert!(matches!(
            dataset.variable("XLAT"),
            Err(NetCdfError::MissingData(_))
        ));
        assert!(reader.open(Path::new("b.nc")).is_err());
    }

    #[test]
    fn test_write_tar_archive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.tar");
        write_tar_archive(&path, &[("inner/a.nc", &b"abc"[..])], false).unwrap();

        let mut archive = tar::Archive::new(File::open(&path).unwrap());
        let names: Vec<String> = archive
            .entries()
            .unwrap()
            .map(|e| e.unwrap().path().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["inner/a.nc"]);
    }
}
