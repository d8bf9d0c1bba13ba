//! Map file I/O service.
//!
//! This module centralizes reading and writing map CSV files and exported
//! artifacts so every command handles paths and errors the same way.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{MapError, Result};
use crate::export::csv::ImportReport;
use crate::models::MapConfiguration;

/// Service for map file operations.
pub struct MapFileService;

impl MapFileService {
    /// Reads a whole map file into memory.
    ///
    /// # Errors
    ///
    /// * [`MapError::FileRead`] - the file could not be read
    /// * [`MapError::EmptyFile`] - the file holds only whitespace
    pub fn read(path: &Path) -> Result<String> {
        let text = fs::read_to_string(path).map_err(|source| MapError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        if text.trim().is_empty() {
            return Err(MapError::EmptyFile(path.to_path_buf()));
        }

        Ok(text)
    }

    /// Imports a map file into `config`.
    ///
    /// The file is read completely before `config` is touched, so a failed
    /// read leaves the configuration unchanged.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use us_map_maker::models::{MapConfiguration, RegionSet};
    /// use us_map_maker::services::MapFileService;
    ///
    /// let regions = RegionSet::embedded()?;
    /// let mut config = MapConfiguration::with_defaults(&regions)?;
    /// let report = MapFileService::load_into(Path::new("map.csv"), &mut config)?;
    /// assert!(report.is_clean());
    /// # Ok::<(), us_map_maker::error::MapError>(())
    /// ```
    pub fn load_into(path: &Path, config: &mut MapConfiguration) -> Result<ImportReport> {
        let text = Self::read(path)?;
        Ok(config.import_from_text(&text))
    }

    /// Saves a map configuration as CSV.
    pub fn save(config: &MapConfiguration, path: &Path) -> Result<()> {
        Self::write_atomic(path, config.export_to_text().as_bytes())
    }

    /// Writes bytes using a temp file + rename so the target is never left
    /// half-written.
    pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
        let write_error = |path: &Path| {
            let path = path.to_path_buf();
            move |source: std::io::Error| MapError::FileWrite { path, source }
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error(parent))?;
        }

        let temp_path = temp_path_for(path);
        fs::write(&temp_path, contents).map_err(write_error(&temp_path))?;
        fs::rename(&temp_path, path).map_err(write_error(path))?;
        Ok(())
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
