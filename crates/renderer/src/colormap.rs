//! Color tables and colormaps for filled contour rendering.
//!
//! Two colormaps are used by the overlays:
//! - A discrete listed colormap built from the dashboard color table
//!   (NO2 and CO), see [`ColorTable::dashboard`].
//! - The `rainbow` colormap (AOD), see [`Colormap::rainbow`].

use std::f32::consts::PI;

use crate::error::{RenderError, RenderResult};

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Lowercase `#rrggbb`, alpha ignored.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Build from float channels in [0, 1] (values are clipped).
    fn from_unit(r: f32, g: f32, b: f32) -> Self {
        let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::rgb(to_u8(r), to_u8(g), to_u8(b))
    }
}

/// Parse hex color string to RGB
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}

/// Parse `#rrggbb` or one of a few named colors.
pub fn parse_color(spec: &str) -> RenderResult<Color> {
    let named = match spec.trim().to_ascii_lowercase().as_str() {
        "darkred" => Some(Color::rgb(139, 0, 0)),
        "red" => Some(Color::rgb(255, 0, 0)),
        "green" => Some(Color::rgb(0, 128, 0)),
        "blue" => Some(Color::rgb(0, 0, 255)),
        "purple" => Some(Color::rgb(128, 0, 128)),
        "magenta" => Some(Color::rgb(255, 0, 255)),
        "gray" | "grey" => Some(Color::rgb(128, 128, 128)),
        "black" => Some(Color::rgb(0, 0, 0)),
        "white" => Some(Color::WHITE),
        _ => None,
    };
    if let Some(color) = named {
        return Ok(color);
    }

    hex_to_rgb(spec.trim())
        .map(|(r, g, b)| Color::rgb(r, g, b))
        .ok_or_else(|| RenderError::InvalidColor(spec.to_string()))
}

/// Convert parallel red/green/blue channels to `#rrggbb` strings.
pub fn rgb_to_hex(red: &[u8], green: &[u8], blue: &[u8]) -> RenderResult<Vec<String>> {
    if red.len() != green.len() || red.len() != blue.len() {
        return Err(RenderError::TableLengthMismatch {
            red: red.len(),
            green: green.len(),
            blue: blue.len(),
        });
    }

    Ok(red
        .iter()
        .zip(green)
        .zip(blue)
        .map(|((&r, &g), &b)| Color::rgb(r, g, b).to_hex())
        .collect())
}

// ============================================================================
// Dashboard color table (NO2 and CO)
// ============================================================================

#[rustfmt::skip]
const DASHBOARD_RED: [u8; 128] = [
    252, 244, 236, 228, 219, 211, 204, 195, 187, 180, 170, 162, 154, 147,
    139, 129, 106,  77,  48,  19,  10,  33,  55,  77,  99, 124, 148, 170,
    192, 214, 236, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
    255, 255, 255, 255, 255, 255, 253, 244, 235, 225, 216, 205, 196, 186,
    177, 168, 156, 147, 137, 128, 119, 108, 102, 101, 101, 101, 100, 100,
    100, 100, 100, 100, 100, 100, 101, 102, 103, 104, 106, 107, 108, 110,
    111, 112, 113, 115, 116, 117, 119, 120, 122, 125, 129, 132, 137, 141,
    144, 148, 151, 156, 159, 163, 166, 171, 174, 178, 182, 185, 189, 193,
    197, 201, 205, 208, 212, 216, 220, 223, 227, 231, 235, 239, 243, 246,
    250, 254,
];

#[rustfmt::skip]
const DASHBOARD_GREEN: [u8; 128] = [
    255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
    255, 254, 242, 225, 209, 192, 183, 190, 196, 202, 209, 216, 223, 229,
    235, 241, 248, 248, 234, 220, 206, 192, 177, 159, 146, 131, 117,  99,
     85,  71,  57,  42,  28,  10,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,
];

#[rustfmt::skip]
const DASHBOARD_BLUE: [u8; 128] = [
    255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
    255, 253, 211, 153,  96,  38,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   1,   2,   2,   3,
      4,   5,   6,   7,   8,   9,  18,  32,  46,  64,  79,  92, 107, 121,
    139, 153, 168, 182, 197, 211, 229, 243, 255, 255, 255, 255, 255, 255,
    255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
    255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
    255, 255,
];

/// Parallel red/green/blue channels of a discrete color ramp.
///
/// Build once at startup and share read-only; nothing mutates a table after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTable {
    red: Vec<u8>,
    green: Vec<u8>,
    blue: Vec<u8>,
}

impl ColorTable {
    pub fn new(red: Vec<u8>, green: Vec<u8>, blue: Vec<u8>) -> RenderResult<Self> {
        if red.len() != green.len() || red.len() != blue.len() {
            return Err(RenderError::TableLengthMismatch {
                red: red.len(),
                green: green.len(),
                blue: blue.len(),
            });
        }
        if red.is_empty() {
            return Err(RenderError::EmptyColormap);
        }
        Ok(Self { red, green, blue })
    }

    /// The 128-entry white → green → yellow → red → purple ramp used by the
    /// NO2 and CO overlays.
    pub fn dashboard() -> Self {
        Self {
            red: DASHBOARD_RED.to_vec(),
            green: DASHBOARD_GREEN.to_vec(),
            blue: DASHBOARD_BLUE.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.red.len()
    }

    pub fn is_empty(&self) -> bool {
        self.red.is_empty()
    }

    pub fn to_hex(&self) -> RenderResult<Vec<String>> {
        rgb_to_hex(&self.red, &self.green, &self.blue)
    }

    /// A listed colormap with one entry per table row.
    pub fn to_colormap(&self) -> RenderResult<Colormap> {
        Colormap::listed(&self.to_hex()?)
    }
}

// ============================================================================
// Colormaps
// ============================================================================

/// A lookup table of colors indexed by a normalized value in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    lut: Vec<Color>,
    under: Option<Color>,
    over: Option<Color>,
}

impl Colormap {
    /// A discrete colormap from `#rrggbb` strings.
    pub fn listed<S: AsRef<str>>(hex_colors: &[S]) -> RenderResult<Self> {
        if hex_colors.is_empty() {
            return Err(RenderError::EmptyColormap);
        }
        let lut = hex_colors
            .iter()
            .map(|hex| parse_color(hex.as_ref()))
            .collect::<RenderResult<Vec<_>>>()?;
        Ok(Self {
            lut,
            under: None,
            over: None,
        })
    }

    /// The `rainbow` colormap sampled at `n` points:
    /// r = |2x - 0.5|, g = sin(πx), b = cos(πx / 2).
    pub fn rainbow(n: usize) -> Self {
        let n = n.max(2);
        let lut = (0..n)
            .map(|i| {
                let x = i as f32 / (n - 1) as f32;
                Color::from_unit((2.0 * x - 0.5).abs(), (x * PI).sin(), (x * PI / 2.0).cos())
            })
            .collect();
        Self {
            lut,
            under: None,
            over: None,
        }
    }

    /// Color for values above the top level when the contour extends upward.
    pub fn with_over(mut self, color: Color) -> Self {
        self.over = Some(color);
        self
    }

    /// Color for values below the bottom level when the contour extends downward.
    pub fn with_under(mut self, color: Color) -> Self {
        self.under = Some(color);
        self
    }

    pub fn len(&self) -> usize {
        self.lut.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lut.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.lut
    }

    /// Color at a normalized position: index `floor(norm * N)` clamped to the table.
    pub fn sample(&self, norm: f32) -> Color {
        let n = self.lut.len();
        let idx = if norm.is_nan() || norm <= 0.0 {
            0
        } else {
            ((norm * n as f32) as usize).min(n - 1)
        };
        self.lut[idx]
    }

    pub fn under(&self) -> Color {
        self.under.unwrap_or_else(|| self.sample(0.0))
    }

    pub fn over(&self) -> Color {
        self.over.unwrap_or_else(|| self.sample(1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#FF0000"), Some((255, 0, 0)));
        assert_eq!(hex_to_rgb("00ff00"), Some((0, 255, 0)));
        assert_eq!(hex_to_rgb("#GGGGGG"), None);
        assert_eq!(hex_to_rgb("#fff"), None);
    }

    #[test]
    fn test_parse_named_colors() {
        assert_eq!(parse_color("darkred").unwrap(), Color::rgb(139, 0, 0));
        assert_eq!(parse_color("DarkRed").unwrap(), Color::rgb(139, 0, 0));
        assert_eq!(parse_color("#0a0b0c").unwrap(), Color::rgb(10, 11, 12));
        assert!(matches!(
            parse_color("not-a-color"),
            Err(RenderError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_rgb_to_hex_formats_lowercase() {
        let hex = rgb_to_hex(&[252, 0], &[255, 10], &[255, 171]).unwrap();
        assert_eq!(hex, vec!["#fcffff", "#000aab"]);
    }

    #[test]
    fn test_rgb_to_hex_rejects_ragged_channels() {
        let err = rgb_to_hex(&[1, 2], &[1], &[1, 2]).unwrap_err();
        assert!(matches!(
            err,
            RenderError::TableLengthMismatch { red: 2, green: 1, blue: 2 }
        ));
    }

    #[test]
    fn test_dashboard_endpoints() {
        let hex = ColorTable::dashboard().to_hex().unwrap();
        assert_eq!(hex.first().map(String::as_str), Some("#fcffff"));
        assert_eq!(hex.last().map(String::as_str), Some("#fe00ff"));
    }

    #[test]
    fn test_rainbow_endpoints() {
        let cmap = Colormap::rainbow(256);
        assert_eq!(cmap.len(), 256);
        // x = 0: (0.5, 0, 1)
        assert_eq!(cmap.colors()[0], Color::rgb(128, 0, 255));
        // x = 1: (1, ~0, ~0)
        assert_eq!(cmap.colors()[255], Color::rgb(255, 0, 0));
    }

    #[test]
    fn test_sample_clamps() {
        let cmap = Colormap::listed(&["#000000", "#ffffff"]).unwrap();
        assert_eq!(cmap.sample(-1.0), Color::rgb(0, 0, 0));
        assert_eq!(cmap.sample(0.49), Color::rgb(0, 0, 0));
        assert_eq!(cmap.sample(0.5), Color::WHITE);
        assert_eq!(cmap.sample(1.0), Color::WHITE);
        assert_eq!(cmap.sample(7.0), Color::WHITE);
    }

    #[test]
    fn test_under_over_defaults() {
        let cmap = Colormap::listed(&["#010101", "#020202"]).unwrap();
        assert_eq!(cmap.under(), Color::rgb(1, 1, 1));
        assert_eq!(cmap.over(), Color::rgb(2, 2, 2));

        let cmap = cmap.with_over(Color::rgb(139, 0, 0));
        assert_eq!(cmap.over(), Color::rgb(139, 0, 0));
    }
}
