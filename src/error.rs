//! Error types for map configuration, import and export.
//!
//! Every variant is recoverable: a failed mutation leaves the configuration as it was.

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for map operations.
#[derive(Error, Debug)]
pub enum MapError {
    /// The palette table has no ramp for this scheme and category count.
    #[error("unknown color scheme '{scheme}' with {categories} categories")]
    UnknownScheme {
        /// Requested scheme name
        scheme: String,
        /// Requested category count
        categories: usize,
    },

    /// The region id is not part of the loaded dataset.
    #[error("unknown region: {0}")]
    UnknownRegion(String),

    /// Legend label index outside the legend.
    #[error("legend index {index} out of range (legend has {len} labels)")]
    LegendIndexOutOfRange {
        /// Requested index
        index: usize,
        /// Current legend length
        len: usize,
    },

    /// Reading an input file failed.
    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Writing an output file failed.
    #[error("failed to write {}: {source}", path.display())]
    FileWrite {
        /// File that was being written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// An input file was read but held no content.
    #[error("file is empty: {}", .0.display())]
    EmptyFile(PathBuf),

    /// The region dataset could not be loaded.
    #[error("invalid region data: {0}")]
    RegionData(String),

    /// The palette table could not be loaded.
    #[error("invalid palette data: {0}")]
    PaletteData(String),

    /// SVG rasterization failed.
    #[error("raster export failed: {0}")]
    Raster(String),
}

/// Convenience alias for map results.
pub type Result<T> = std::result::Result<T, MapError>;
