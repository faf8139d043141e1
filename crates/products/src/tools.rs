//! External command-line tools run on finished overlays.
//!
//! Georeferencing (`gdal_translate`) and tiling (`gdal2tiles.py`) live
//! outside this workspace. They are invoked through [`ExternalTool`] so the
//! exit status is always checked and tests can substitute harmless commands.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::config::{ToolSpec, ToolsConfig};
use crate::error::{ProductError, Result};
use crate::output::OutputSlot;

/// Placeholder replaced by the input path in tool arguments.
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// Placeholder replaced by the output path in tool arguments.
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

/// A tool that turns one file into another.
pub trait ExternalTool: Send + Sync {
    fn name(&self) -> &str;

    /// Run the tool; returns `output` on success.
    fn run(&self, input: &Path, output: &Path) -> Result<PathBuf>;
}

/// A program invoked with templated arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTool {
    program: String,
    args: Vec<String>,
}

impl CommandTool {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Assign EPSG:4326 and the global bounds to a PNG, writing a GeoTIFF.
    pub fn georeference(program: impl Into<String>) -> Self {
        let args = [
            "-of", "GTiff", "-a_srs", "EPSG:4326", "-a_ullr", "-180", "90", "180", "-90",
            INPUT_PLACEHOLDER, OUTPUT_PLACEHOLDER,
        ];
        Self::new(program, args.iter().map(|s| s.to_string()).collect())
    }

    /// Cut an XYZ mercator tile pyramid for zoom levels 2 to 7.
    pub fn tiles(program: impl Into<String>) -> Self {
        let args = [
            "-p", "mercator", "-z", "2-7", "--xyz", INPUT_PLACEHOLDER, OUTPUT_PLACEHOLDER,
        ];
        Self::new(program, args.iter().map(|s| s.to_string()).collect())
    }

    /// Build from config, falling back to `preset` when no arguments are given.
    pub fn from_spec(spec: &ToolSpec, preset: fn(String) -> Self) -> Self {
        match &spec.args {
            Some(args) => Self::new(spec.program.clone(), args.clone()),
            None => preset(spec.program.clone()),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments with placeholders substituted.
    pub fn command_line(&self, input: &Path, output: &Path) -> Vec<String> {
        let input = input.to_string_lossy();
        let output = output.to_string_lossy();
        self.args
            .iter()
            .map(|arg| {
                arg.replace(INPUT_PLACEHOLDER, &input)
                    .replace(OUTPUT_PLACEHOLDER, &output)
            })
            .collect()
    }
}

impl ExternalTool for CommandTool {
    fn name(&self) -> &str {
        &self.program
    }

    fn run(&self, input: &Path, output: &Path) -> Result<PathBuf> {
        let args = self.command_line(input, output);
        debug!(tool = %self.program, args = ?args, "Running external tool");

        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .map_err(|source| ProductError::ToolSpawn {
                tool: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(ProductError::ToolFailed {
                tool: self.program.clone(),
                status: status.to_string(),
            });
        }

        info!(tool = %self.program, output = %output.display(), "External tool finished");
        Ok(output.to_path_buf())
    }
}

/// The optional post-render steps: georeference, then tile.
#[derive(Default)]
pub struct ToolChain {
    georeference: Option<Box<dyn ExternalTool>>,
    tiles: Option<Box<dyn ExternalTool>>,
}

impl ToolChain {
    pub fn new(
        georeference: Option<Box<dyn ExternalTool>>,
        tiles: Option<Box<dyn ExternalTool>>,
    ) -> Self {
        Self {
            georeference,
            tiles,
        }
    }

    pub fn from_config(config: &ToolsConfig) -> Self {
        let boxed = |tool: CommandTool| -> Box<dyn ExternalTool> { Box::new(tool) };
        Self::new(
            config
                .georeference
                .as_ref()
                .map(|spec| boxed(CommandTool::from_spec(spec, |p| CommandTool::georeference(p)))),
            config
                .tiles
                .as_ref()
                .map(|spec| boxed(CommandTool::from_spec(spec, |p| CommandTool::tiles(p)))),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.georeference.is_none() && self.tiles.is_none()
    }

    /// Run the configured steps on a slot's final image.
    ///
    /// Tiling consumes the GeoTIFF when georeferencing ran, else the PNG.
    pub fn apply(&self, slot: &OutputSlot) -> Result<()> {
        let mut current = slot.final_path();
        if let Some(tool) = &self.georeference {
            current = tool.run(&current, &slot.georeferenced_path())?;
        }
        if let Some(tool) = &self.tiles {
            tool.run(&current, &slot.tiles_dir())?;
        }
        Ok(())
    }
}
