//! Export functionality for map configurations.
//!
//! This module turns a [`crate::models::MapConfiguration`] into shareable
//! artifacts: an SVG document, a PNG raster of that document, and the
//! line-oriented CSV text that can be imported again.

pub mod csv;
pub mod legend;
pub mod map_renderer;
#[cfg(feature = "png")]
pub mod raster;

pub use legend::{layout_legend, LegendEntry, LegendGrid};
pub use map_renderer::{render, MapDocument, RegionShape};
#[cfg(feature = "png")]
pub use raster::{render_png, RasterOptions};

use crate::constants::FILE_SUFFIX;
use std::fmt;
use std::str::FromStr;

/// Output artifact kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Vector image
    Svg,
    /// Raster image
    Png,
    /// Round-trippable configuration text
    Csv,
}

impl ExportFormat {
    /// File extension without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unknown export format '{other}' (expected svg, png or csv)")),
        }
    }
}

/// Suggested file name for an exported artifact: `<title>-us-map-maker.<ext>`.
///
/// Whitespace and path separators in the title become `-`; an empty title
/// falls back to `map`.
#[must_use]
pub fn suggested_file_name(title: &str, format: ExportFormat) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| {
            if c.is_whitespace() || matches!(c, '/' | '\\') {
                '-'
            } else {
                c
            }
        })
        .collect();
    let stem = if stem.is_empty() { "map" } else { stem.as_str() };
    format!("{stem}-{FILE_SUFFIX}.{}", format.extension())
}
