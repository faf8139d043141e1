use std::path::Path;

use netcdf_parser::DatasetReader;
use overlay_common::GeoGrid;
use renderer::ColorTable;

use super::{read_grid, ProductProcessor, RenderStyle};
use crate::config::{ProductStyle, VariableNames};
use crate::error::Result;
use crate::metadata::ProductKind;
use crate::output::OutputSlot;

/// Gridded VIIRS aerosol optical depth (SNPP or NOAA-20).
///
/// Uses the rainbow colormap, so the dashboard table is only consulted when a
/// config switches the colormap back to it.
pub struct AodProcessor {
    variables: VariableNames,
    style: RenderStyle,
}

impl AodProcessor {
    pub fn new(config: &ProductStyle, color_table: &ColorTable) -> Result<Self> {
        Ok(Self {
            variables: config.variables.clone(),
            style: RenderStyle {
                contour: config.contour(color_table)?,
                dpi: config.dpi,
                intermediate_name: config.intermediate_name.clone(),
            },
        })
    }
}

impl ProductProcessor for AodProcessor {
    fn kind(&self) -> ProductKind {
        ProductKind::Aod
    }

    fn style(&self) -> &RenderStyle {
        &self.style
    }

    fn load(&self, input: &Path, _slot: &OutputSlot, reader: &dyn DatasetReader) -> Result<GeoGrid> {
        let dataset = reader.open(input)?;
        read_grid(dataset.as_ref(), &self.variables)
    }
}
