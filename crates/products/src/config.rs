//! Overlay configuration.
//!
//! Defaults reproduce the dashboard's fixed rendering choices. Each product
//! section is replaced as a whole when present in a config file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use renderer::{parse_color, ColorTable, Colormap, ContourLevels, Extend, FilledContour};

use crate::error::{ProductError, Result};
use crate::output::FINAL_IMAGE_NAME;

/// Entries in the sampled `rainbow` colormap.
const RAINBOW_SIZE: usize = 256;

/// Top-level configuration for a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Directory scanned for product files (not recursive).
    pub input_dir: PathBuf,
    /// Directory receiving one folder per output key.
    pub output_dir: PathBuf,
    /// Log and count a failing file instead of aborting the batch.
    pub isolate_failures: bool,
    pub render: RenderConfig,
    pub no2: ProductStyle,
    pub aod: ProductStyle,
    pub co: CoConfig,
    pub tools: ToolsConfig,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            isolate_failures: true,
            render: RenderConfig::default(),
            no2: ProductStyle::no2(),
            aod: ProductStyle::aod(),
            co: CoConfig::default(),
            tools: ToolsConfig::default(),
        }
    }
}

impl OverlayConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.render.map_width_inches > 0.0) {
            return Err(ProductError::InvalidConfig(format!(
                "render.map_width_inches must be positive, got {}",
                self.render.map_width_inches
            )));
        }
        self.no2.validate("no2")?;
        self.aod.validate("aod")?;
        self.co.style.validate("co")?;
        for (name, spec) in [
            ("georeference", &self.tools.georeference),
            ("tiles", &self.tools.tiles),
        ] {
            if spec.as_ref().is_some_and(|s| s.program.trim().is_empty()) {
                return Err(ProductError::InvalidConfig(format!(
                    "tools.{}.program is empty",
                    name
                )));
            }
        }
        Ok(())
    }
}

/// Canvas geometry shared by all products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Width of the map area in inches; pixels = inches x dpi.
    ///
    /// 15.4 in is the plate carrée map area of a 20 x 10 in figure.
    pub map_width_inches: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            map_width_inches: 15.4,
        }
    }
}

/// Evenly spaced contour levels `[start, stop)` by `step`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelRange {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl LevelRange {
    pub fn levels(&self) -> Result<ContourLevels> {
        Ok(ContourLevels::arange(self.start, self.stop, self.step)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColormapChoice {
    /// The 128-entry dashboard table as a listed colormap.
    Dashboard,
    /// Matplotlib's `rainbow`.
    Rainbow,
}

/// Names of the data and coordinate variables of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableNames {
    pub value: String,
    pub lat: String,
    pub lon: String,
}

impl VariableNames {
    pub fn new(value: &str, lat: &str, lon: &str) -> Self {
        Self {
            value: value.to_string(),
            lat: lat.to_string(),
            lon: lon.to_string(),
        }
    }
}

/// How one product is read and drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductStyle {
    pub variables: VariableNames,
    pub levels: LevelRange,
    pub colormap: ColormapChoice,
    /// Color for values above the top level, `#rrggbb` or a name.
    #[serde(default)]
    pub over_color: Option<String>,
    #[serde(default)]
    pub extend: Extend,
    pub dpi: u32,
    /// File name of the opaque render inside the output folder.
    pub intermediate_name: String,
}

impl ProductStyle {
    pub fn no2() -> Self {
        Self {
            variables: VariableNames::new("DT", "LAT", "LON"),
            levels: LevelRange {
                start: 0.0,
                stop: 300.1,
                step: 0.1,
            },
            colormap: ColormapChoice::Dashboard,
            over_color: None,
            extend: Extend::Neither,
            dpi: 600,
            intermediate_name: "no2.png".to_string(),
        }
    }

    pub fn aod() -> Self {
        Self {
            variables: VariableNames::new("aod", "lat", "lon"),
            levels: LevelRange {
                start: 0.0,
                stop: 1.1,
                step: 0.001,
            },
            colormap: ColormapChoice::Rainbow,
            over_color: Some("darkred".to_string()),
            extend: Extend::Both,
            dpi: 600,
            intermediate_name: "aod.png".to_string(),
        }
    }

    pub fn co() -> Self {
        Self {
            variables: VariableNames::new("CO", "XLAT", "XLONG"),
            levels: LevelRange {
                start: 0.0,
                stop: 1.1,
                step: 0.0001,
            },
            colormap: ColormapChoice::Dashboard,
            over_color: None,
            extend: Extend::Neither,
            dpi: 900,
            intermediate_name: "co.png".to_string(),
        }
    }

    fn validate(&self, section: &str) -> Result<()> {
        let invalid = |msg: String| Err(ProductError::InvalidConfig(format!("{}: {}", section, msg)));

        if self.dpi == 0 {
            return invalid("dpi must be positive".to_string());
        }
        if let Err(e) = self.levels.levels() {
            return invalid(e.to_string());
        }
        let vars = &self.variables;
        if vars.value.is_empty() || vars.lat.is_empty() || vars.lon.is_empty() {
            return invalid("variable names must not be empty".to_string());
        }
        if self.intermediate_name.is_empty()
            || self.intermediate_name == FINAL_IMAGE_NAME
            || self.intermediate_name.contains(['/', '\\'])
        {
            return invalid(format!(
                "intermediate_name {:?} must be a plain file name other than {}",
                self.intermediate_name, FINAL_IMAGE_NAME
            ));
        }
        if let Some(color) = &self.over_color {
            if let Err(e) = parse_color(color) {
                return invalid(e.to_string());
            }
        }
        Ok(())
    }

    /// Build the colormap, using `table` for the dashboard choice.
    pub fn colormap(&self, table: &ColorTable) -> Result<Colormap> {
        let cmap = match self.colormap {
            ColormapChoice::Dashboard => table.to_colormap()?,
            ColormapChoice::Rainbow => Colormap::rainbow(RAINBOW_SIZE),
        };
        Ok(match &self.over_color {
            Some(color) => cmap.with_over(parse_color(color)?),
            None => cmap,
        })
    }

    /// The filled-contour style with band colors precomputed.
    pub fn contour(&self, table: &ColorTable) -> Result<FilledContour> {
        let levels = self.levels.levels()?;
        Ok(FilledContour::new(levels, &self.colormap(table)?, self.extend))
    }
}

/// CO rendering plus archive handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoConfig {
    #[serde(flatten)]
    pub style: ProductStyle,
    /// Leave the extracted archive contents next to the overlay.
    #[serde(default = "default_keep_extracted")]
    pub keep_extracted: bool,
}

fn default_keep_extracted() -> bool {
    true
}

impl Default for CoConfig {
    fn default() -> Self {
        Self {
            style: ProductStyle::co(),
            keep_extracted: true,
        }
    }
}

/// An external program; `args` default to the tool's preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub program: String,
    #[serde(default)]
    pub args: Option<Vec<String>>,
}

/// Optional post-render tools; both disabled by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub georeference: Option<ToolSpec>,
    pub tiles: Option<ToolSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use renderer::Color;

    #[test]
    fn test_defaults_validate() {
        let config = OverlayConfig::default();
        config.validate().unwrap();
        assert!(config.isolate_failures);
        assert!(config.co.keep_extracted);
        assert_eq!(config.no2.dpi, 600);
        assert_eq!(config.aod.dpi, 600);
        assert_eq!(config.co.style.dpi, 900);
        assert!(config.tools.georeference.is_none());
    }

    #[test]
    fn test_default_level_counts() {
        let config = OverlayConfig::default();
        assert_eq!(config.no2.levels.levels().unwrap().len(), 3001);
        assert_eq!(config.aod.levels.levels().unwrap().len(), 1100);
        assert_eq!(config.co.style.levels.levels().unwrap().len(), 11000);
    }

    #[test]
    fn test_aod_over_color_is_darkred() {
        let cmap = ProductStyle::aod().colormap(&ColorTable::dashboard()).unwrap();
        assert_eq!(cmap.over(), Color::rgb(139, 0, 0));
        assert_eq!(cmap.len(), 256);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = OverlayConfig::default();
        config.aod.dpi = 0;
        assert!(matches!(config.validate(), Err(ProductError::InvalidConfig(_))));

        let mut config = OverlayConfig::default();
        config.no2.levels.step = 0.0;
        assert!(config.validate().is_err());

        let mut config = OverlayConfig::default();
        config.co.style.intermediate_name = "img.png".to_string();
        assert!(config.validate().is_err());

        let mut config = OverlayConfig::default();
        config.aod.over_color = Some("not-a-color".to_string());
        assert!(config.validate().is_err());

        let mut config = OverlayConfig::default();
        config.render.map_width_inches = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let yaml = r#"
input_dir: /data/in
output_dir: /data/out
render:
  map_width_inches: 2.0
co:
  variables: { value: CO, lat: XLAT, lon: XLONG }
  levels: { start: 0.0, stop: 1.1, step: 0.001 }
  colormap: dashboard
  dpi: 300
  intermediate_name: co.png
  keep_extracted: false
tools:
  georeference:
    program: /opt/gdal/bin/gdal_translate
"#;
        let config: OverlayConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.input_dir, PathBuf::from("/data/in"));
        assert_eq!(config.render.map_width_inches, 2.0);
        assert_eq!(config.no2, ProductStyle::no2());
        assert_eq!(config.co.style.dpi, 300);
        assert!(!config.co.keep_extracted);
        assert_eq!(config.co.style.extend, Extend::Neither);
        assert!(config.tools.georeference.as_ref().unwrap().args.is_none());
        assert!(config.tools.tiles.is_none());
        config.validate().unwrap();
    }
}
