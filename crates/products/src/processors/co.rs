use std::fs;
use std::path::Path;

use tracing::{debug, info};

use netcdf_parser::{Dataset, DatasetReader};
use overlay_common::GeoGrid;
use renderer::ColorTable;

use super::{read_coordinates, ProductProcessor, RenderStyle};
use crate::archive::extract_archive;
use crate::average::MeanAccumulator;
use crate::config::{CoConfig, VariableNames};
use crate::error::{ProductError, Result};
use crate::metadata::ProductKind;
use crate::output::OutputSlot;

/// On-road CO emissions delivered as a tar archive of per-time-step files.
///
/// The archive is unpacked into the output folder, every extracted file's
/// `CO` is averaged, and the mean is drawn on the coordinates of the last
/// file read.
pub struct CoProcessor {
    variables: VariableNames,
    style: RenderStyle,
    keep_extracted: bool,
}

impl CoProcessor {
    pub fn new(config: &CoConfig, color_table: &ColorTable) -> Result<Self> {
        Ok(Self {
            variables: config.style.variables.clone(),
            style: RenderStyle {
                contour: config.style.contour(color_table)?,
                dpi: config.style.dpi,
                intermediate_name: config.style.intermediate_name.clone(),
            },
            keep_extracted: config.keep_extracted,
        })
    }
}

impl ProductProcessor for CoProcessor {
    fn kind(&self) -> ProductKind {
        ProductKind::Co
    }

    fn style(&self) -> &RenderStyle {
        &self.style
    }

    fn load(&self, input: &Path, slot: &OutputSlot, reader: &dyn DatasetReader) -> Result<GeoGrid> {
        let files = extract_archive(input, slot.dir())?;
        info!(
            archive = %input.display(),
            files = files.len(),
            "Averaging {} over extracted files",
            self.variables.value
        );

        let mut mean = MeanAccumulator::new();
        let mut last: Option<Box<dyn Dataset>> = None;
        for file in &files {
            let dataset = reader.open(file)?;
            mean.add(&dataset.variable(&self.variables.value)?)?;
            debug!(file = %file.display(), count = mean.count(), "Accumulated");
            last = Some(dataset);
        }

        let last = last.ok_or(ProductError::EmptyStack)?;
        let values = mean.finish()?.first_plane()?;
        let coords = read_coordinates(last.as_ref(), &self.variables)?;
        Ok(GeoGrid::new(values, coords)?)
    }

    fn after_render(&self, slot: &OutputSlot) -> Result<()> {
        if self.keep_extracted {
            return Ok(());
        }

        // The folder held only the archive contents before rendering
        let final_path = slot.final_path();
        for entry in fs::read_dir(slot.dir())? {
            let path = entry?.path();
            if path == final_path {
                continue;
            }
            if path.is_dir() {
                fs::remove_dir_all(&path)?;
            } else {
                fs::remove_file(&path)?;
            }
        }
        debug!(dir = %slot.dir().display(), "Removed extracted files");
        Ok(())
    }
}
