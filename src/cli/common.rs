//! Shared CLI plumbing: error type, exit codes and map loading.

use crate::config::Config;
use crate::error::MapError;
use crate::models::{MapConfiguration, PaletteTable, RegionSet};
use crate::services::MapFileService;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Invalid input or arguments
    ValidationError = 1,
    /// File system or encoding failure
    IoError = 2,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as Self
    }
}

/// Error returned by CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Message printed to stderr
    pub message: String,
    /// Exit code for the process
    pub exit_code: ExitCode,
}

impl CliError {
    /// Validation failure (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::ValidationError,
        }
    }

    /// I/O failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::IoError,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

impl From<MapError> for CliError {
    fn from(err: MapError) -> Self {
        match err {
            MapError::FileRead { .. } | MapError::FileWrite { .. } | MapError::Raster(_) => {
                Self::io(err.to_string())
            }
            MapError::UnknownScheme { .. }
            | MapError::UnknownRegion(_)
            | MapError::LegendIndexOutOfRange { .. }
            | MapError::EmptyFile(_)
            | MapError::RegionData(_)
            | MapError::PaletteData(_) => Self::validation(err.to_string()),
        }
    }
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Loads the application config, falling back to defaults on error.
pub fn load_config() -> Config {
    Config::load().unwrap_or_else(|e| {
        warn!(error = %e, "using default configuration");
        Config::default()
    })
}

/// Loads the region dataset, from `path` if given, otherwise the embedded grid.
pub fn load_regions(path: Option<&Path>) -> CliResult<RegionSet> {
    let regions = match path {
        Some(path) => RegionSet::from_json_file(path)?,
        None => RegionSet::embedded()?,
    };
    Ok(regions)
}

/// Builds a fresh configuration from the user's defaults.
pub fn new_configuration(config: &Config, regions: &RegionSet) -> CliResult<MapConfiguration> {
    let palettes = Arc::new(PaletteTable::load()?);
    Ok(MapConfiguration::new(regions, palettes, &config.defaults)?)
}

/// Reads a map CSV file into a fresh configuration.
///
/// Import warnings go to stderr; they never fail the command.
pub fn read_map_file(path: &Path, regions: &RegionSet) -> CliResult<MapConfiguration> {
    let mut map = new_configuration(&load_config(), regions)?;
    let report = MapFileService::load_into(path, &mut map)?;

    for warning in &report.warnings {
        eprintln!("Warning: {}: {}", path.display(), warning);
    }

    Ok(map)
}
