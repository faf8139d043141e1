//! Tests for the dashboard color table and colormaps.

use renderer::colormap::{rgb_to_hex, ColorTable, Colormap};
use renderer::RenderError;

#[test]
fn test_dashboard_hex_ramp_shape() {
    let hex = ColorTable::dashboard().to_hex().unwrap();
    assert_eq!(hex.len(), 128);
    for entry in &hex {
        assert_eq!(entry.len(), 7, "{}", entry);
        assert!(entry.starts_with('#'));
        assert!(entry[1..]
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}

#[test]
fn test_dashboard_is_deterministic() {
    assert_eq!(
        ColorTable::dashboard().to_hex().unwrap(),
        ColorTable::dashboard().to_hex().unwrap()
    );
    assert_eq!(ColorTable::dashboard(), ColorTable::dashboard());
}

#[test]
fn test_dashboard_colormap_matches_table() {
    let table = ColorTable::dashboard();
    let cmap = table.to_colormap().unwrap();
    assert_eq!(cmap.len(), table.len());
    assert_eq!(cmap.colors()[0].to_hex(), "#fcffff");
}

#[test]
fn test_table_rejects_ragged_channels() {
    let err = ColorTable::new(vec![1, 2], vec![1, 2], vec![1]).unwrap_err();
    assert!(matches!(err, RenderError::TableLengthMismatch { blue: 1, .. }));
    assert!(matches!(
        ColorTable::new(vec![], vec![], vec![]),
        Err(RenderError::EmptyColormap)
    ));
}

#[test]
fn test_rgb_to_hex_empty_is_empty() {
    assert!(rgb_to_hex(&[], &[], &[]).unwrap().is_empty());
}

#[test]
fn test_rainbow_midpoint() {
    // x = 128/255: r = |2x - 0.5| ~ 0.5, g = sin(pi x) ~ 1
    let cmap = Colormap::rainbow(256);
    let mid = cmap.sample(0.5);
    assert!(mid.g > 250);
    assert!((120..=136).contains(&mid.r));
}
