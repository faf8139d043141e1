//! File-name metadata: product classification and output keys.
//!
//! Everything here works on the final path component only. Keys are parsed
//! positionally from `_`-separated tokens without validation, so an oddly
//! named file yields an odd key rather than an error.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Product families the batch runner knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductKind {
    No2,
    Aod,
    Co,
}

impl ProductKind {
    pub fn name(&self) -> &'static str {
        match self {
            ProductKind::No2 => "NO2",
            ProductKind::Aod => "AOD",
            ProductKind::Co => "CO",
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a file by case-insensitive substring, checked in the order
/// `no2`, `aod`, `onroad`.
pub fn classify(file_name: &str) -> Option<ProductKind> {
    let lower = file_name.to_lowercase();
    if lower.contains("no2") {
        Some(ProductKind::No2)
    } else if lower.contains("aod") {
        Some(ProductKind::Aod)
    } else if lower.contains("onroad") {
        Some(ProductKind::Co)
    } else {
        None
    }
}

/// Identifies one output artifact: `<product>_<period>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutputKey {
    pub product: String,
    pub period: String,
}

impl OutputKey {
    pub fn new(product: impl Into<String>, period: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            period: period.into(),
        }
    }

    /// Name of the folder holding this key's artifacts.
    pub fn folder_name(&self) -> String {
        format!("{}_{}", self.product, self.period)
    }
}

impl fmt::Display for OutputKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.product, self.period)
    }
}

/// The final path component as a string (lossy for non-UTF-8 names).
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Derive the output key for a product file name.
pub fn output_key(kind: ProductKind, file_name: &str) -> OutputKey {
    match kind {
        ProductKind::No2 => no2_key(file_name),
        ProductKind::Aod => aod_key(file_name),
        ProductKind::Co => co_key(file_name),
    }
}

/// `OMPS` when the name mentions `npp`, else `TROPOMI`; the period is the
/// first six characters of the second-to-last token.
pub fn no2_key(file_name: &str) -> OutputKey {
    let product = if has_npp(file_name) { "OMPS" } else { "TROPOMI" };
    OutputKey::new(product, head(token_from_end(file_name, 2), 6))
}

/// `SNPP` (period from the second-to-last token) when the name mentions
/// `npp`, else `NOAA-20` (period from the last token).
pub fn aod_key(file_name: &str) -> OutputKey {
    if has_npp(file_name) {
        OutputKey::new("SNPP", head(token_from_end(file_name, 2), 6))
    } else {
        OutputKey::new("NOAA-20", head(token_from_end(file_name, 1), 6))
    }
}

/// `CO`; the period is the third-to-last token (year) followed by the last
/// two characters of the second-to-last token (month).
pub fn co_key(file_name: &str) -> OutputKey {
    let year = token_from_end(file_name, 3);
    let month = tail(token_from_end(file_name, 2), 2);
    OutputKey::new("CO", format!("{}{}", year, month))
}

fn has_npp(file_name: &str) -> bool {
    file_name.to_lowercase().contains("npp")
}

/// The `n`-th `_`-separated token counting from the end (1 = last), or ""
/// when there are fewer tokens.
fn token_from_end(file_name: &str, n: usize) -> &str {
    file_name.rsplit('_').nth(n - 1).unwrap_or("")
}

fn head(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

fn tail(s: &str, n: usize) -> String {
    let count = s.chars().count();
    s.chars().skip(count.saturating_sub(n)).collect()
}
