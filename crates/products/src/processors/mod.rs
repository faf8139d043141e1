//! Per-product processors and the shared render driver.
//!
//! A processor knows how to name its output and how to turn its input into a
//! [`GeoGrid`]. Everything after that (folder guard, canvas, contour fill,
//! transparency, optional tools) is the same for every product and lives in
//! [`run`].

mod aod;
mod co;
mod no2;

pub use aod::AodProcessor;
pub use co::CoProcessor;
pub use no2::No2Processor;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use netcdf_parser::{Dataset, DatasetReader};
use overlay_common::{BoundingBox, Coordinates, GeoGrid};
use renderer::{apply_transparency_key, Canvas, FilledContour};

use crate::config::{RenderConfig, VariableNames};
use crate::error::Result;
use crate::metadata::{file_name_of, output_key, OutputKey, ProductKind};
use crate::output::{folder_exists, OutputSlot};
use crate::tools::ToolChain;

/// Resolved drawing parameters for one product.
#[derive(Debug, Clone)]
pub struct RenderStyle {
    pub contour: FilledContour,
    pub dpi: u32,
    pub intermediate_name: String,
}

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// A new overlay was written to `path`.
    Rendered { key: OutputKey, path: PathBuf },
    /// The key's folder already existed; nothing was touched.
    Skipped { key: OutputKey },
}

/// Shared resources handed to [`run`].
pub struct ProcessContext<'a> {
    pub output_root: &'a Path,
    pub reader: &'a dyn DatasetReader,
    pub render: &'a RenderConfig,
    pub tools: &'a ToolChain,
}

pub trait ProductProcessor {
    fn kind(&self) -> ProductKind;

    /// The key an input file renders to; parsed from the file name only.
    fn output_key(&self, input: &Path) -> OutputKey {
        output_key(self.kind(), &file_name_of(input))
    }

    fn style(&self) -> &RenderStyle;

    fn intermediate_name(&self) -> &str {
        &self.style().intermediate_name
    }

    /// Read the grid to draw. `slot` is the freshly created output folder.
    fn load(&self, input: &Path, slot: &OutputSlot, reader: &dyn DatasetReader) -> Result<GeoGrid>;

    /// Hook run after the final image is written.
    fn after_render(&self, _slot: &OutputSlot) -> Result<()> {
        Ok(())
    }
}

/// Process one input file end to end.
///
/// Skips without touching anything when the key's folder already exists.
pub fn run(
    processor: &dyn ProductProcessor,
    input: &Path,
    ctx: &ProcessContext<'_>,
) -> Result<ProcessOutcome> {
    let key = processor.output_key(input);
    let folder = key.folder_name();

    if folder_exists(ctx.output_root, &folder) {
        info!(
            product = %key,
            "Folder {}/{} already exists",
            ctx.output_root.display(),
            folder
        );
        return Ok(ProcessOutcome::Skipped { key });
    }

    let slot = OutputSlot::create(ctx.output_root, &key, processor.intermediate_name())?;
    info!(
        product = %key,
        kind = %processor.kind(),
        input = %input.display(),
        "Rendering overlay"
    );

    let grid = processor.load(input, &slot, ctx.reader)?;
    let style = processor.style();
    debug!(
        product = %key,
        rows = grid.rows(),
        cols = grid.cols(),
        value_range = ?grid.values.value_range(),
        "Grid loaded"
    );

    let mut canvas = Canvas::for_dpi(ctx.render.map_width_inches, style.dpi, BoundingBox::global())?;
    let stats = style.contour.draw(&grid, &mut canvas);
    debug!(
        product = %key,
        width = canvas.width(),
        height = canvas.height(),
        cells_drawn = stats.cells_drawn,
        cells_masked = stats.cells_masked,
        cells_wrapped = stats.cells_wrapped,
        pixels_painted = stats.pixels_painted,
        "Filled contour drawn"
    );
    canvas.save_png(&slot.intermediate_path())?;
    drop(canvas);

    apply_transparency_key(&slot.intermediate_path(), &slot.final_path())?;
    processor.after_render(&slot)?;
    ctx.tools.apply(&slot)?;

    let path = slot.final_path();
    info!(product = %key, path = %path.display(), "Overlay written");
    Ok(ProcessOutcome::Rendered { key, path })
}

/// Read a product's value field (first plane) and its coordinates.
pub(crate) fn read_grid(dataset: &dyn Dataset, variables: &VariableNames) -> Result<GeoGrid> {
    let values = dataset.variable(&variables.value)?.first_plane()?;
    let coords = read_coordinates(dataset, variables)?;
    Ok(GeoGrid::new(values, coords)?)
}

/// 1-D lat/lon variables become axes, anything else a mesh (first plane).
pub(crate) fn read_coordinates(
    dataset: &dyn Dataset,
    variables: &VariableNames,
) -> Result<Coordinates> {
    let lat = dataset.variable(&variables.lat)?;
    let lon = dataset.variable(&variables.lon)?;
    if lat.ndim() == 1 && lon.ndim() == 1 {
        Ok(Coordinates::Axes {
            lats: lat.as_axis()?,
            lons: lon.as_axis()?,
        })
    } else {
        Ok(Coordinates::Mesh {
            lats: lat.first_plane()?,
            lons: lon.first_plane()?,
        })
    }
}
