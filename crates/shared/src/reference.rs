//! Static orchard disease reference data.
//!
//! Severity ranks run 0 (harmless) to 3 (tree-killing). `Healthy` is rank 0
//! and never appears in an affected-tree display.

use crate::models::HEALTHY;

/// Fallback slice colour for diseases missing from [`DISEASE_COLORS`].
pub const DEFAULT_COLOR: &str = "#9e9e9e";

pub const SEVERITY_INDEX: &[(&str, u8)] = &[
    (HEALTHY, 0),
    ("Powdery Mildew", 1),
    ("Leaf Spot", 1),
    ("Sooty Blotch", 1),
    ("Apple Scab", 2),
    ("Cedar Apple Rust", 2),
    ("Bitter Rot", 2),
    ("Black Rot", 3),
    ("Fire Blight", 3),
    ("Collar Rot", 3),
];

pub const DISEASE_COLORS: &[(&str, &str)] = &[
    (HEALTHY, "#4caf50"),
    ("Powdery Mildew", "#b0bec5"),
    ("Leaf Spot", "#ffb74d"),
    ("Sooty Blotch", "#795548"),
    ("Apple Scab", "#8d6e63"),
    ("Cedar Apple Rust", "#ff7043"),
    ("Bitter Rot", "#ab47bc"),
    ("Black Rot", "#37474f"),
    ("Fire Blight", "#e53935"),
    ("Collar Rot", "#6d4c41"),
];

/// Severity rank of a disease, `None` when the disease is not catalogued.
pub fn severity_of(disease: &str) -> Option<u8> {
    SEVERITY_INDEX
        .iter()
        .find(|(name, _)| *name == disease)
        .map(|(_, rank)| *rank)
}

/// Display colour of a disease, falling back to [`DEFAULT_COLOR`].
pub fn color_of(disease: &str) -> &'static str {
    DISEASE_COLORS
        .iter()
        .find(|(name, _)| *name == disease)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_COLOR)
}
