//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving user preferences
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{MapDefaults, PaletteTable};

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "US_MAP_MAKER_CONFIG_DIR";

/// Export preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Pixels per SVG unit for PNG export (1.0 = 1200x700)
    pub png_scale: f32,
    /// Directory exports are written to when no output path is given
    pub output_dir: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            png_scale: 1.0,
            output_dir: None,
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/USMapMaker/config.toml`
/// - macOS: `~/Library/Application Support/USMapMaker/config.toml`
/// - Windows: `%APPDATA%\USMapMaker\config.toml`
///
/// Setting `US_MAP_MAKER_CONFIG_DIR` replaces the directory.
///
/// # Validation
///
/// - default scheme and category count must exist in the palette table
/// - `label_limit` must be at least 1
/// - `png_scale` must be positive
/// - `background_color` must be `#RRGGBB` or `#RGB`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Starting values for new maps
    pub defaults: MapDefaults,
    /// Export settings
    pub export: ExportConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("USMapMaker");

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to an explicit path (temp file + rename).
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        let palettes = PaletteTable::load()?;
        palettes
            .ensure(&self.defaults.scheme, self.defaults.categories)
            .context("Invalid default color scheme")?;

        if self.defaults.label_limit == 0 {
            anyhow::bail!("Label limit must be at least 1");
        }

        if !(self.export.png_scale.is_finite() && self.export.png_scale > 0.0) {
            anyhow::bail!("PNG scale must be positive, got {}", self.export.png_scale);
        }

        validate_hex_color(&self.defaults.background_color).map_err(anyhow::Error::msg)?;

        Ok(())
    }
}

/// Checks that `color` is `#RRGGBB` or `#RGB`.
///
/// # Errors
///
/// Returns a message naming the rejected value.
pub fn validate_hex_color(color: &str) -> std::result::Result<(), String> {
    let hex_regex = Regex::new(r"^#([0-9A-Fa-f]{6}|[0-9A-Fa-f]{3})$")
        .map_err(|_| "Failed to create hex regex".to_string())?;

    if hex_regex.is_match(color) {
        Ok(())
    } else {
        Err(format!(
            "Invalid hex color format: '{color}'. Expected #RRGGBB or #RGB"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.defaults.scheme, "Reds");
        assert_eq!(config.defaults.categories, 3);
        assert_eq!(config.export.output_dir, None);
        assert!((config.export.png_scale - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_config_validate() {
        assert!(Config::new().validate().is_ok());
    }

    #[test]
    fn test_config_validate_rejects_unknown_scheme() {
        let mut config = Config::new();
        config.defaults.scheme = "Rainbow".to_string();
        assert!(config.validate().is_err());

        config.defaults.scheme = "Blues".to_string();
        config.defaults.categories = 12;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validate_ranges() {
        let mut config = Config::new();
        config.defaults.label_limit = 0;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.export.png_scale = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.defaults.background_color = "white".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_hex_color() {
        assert!(validate_hex_color("#ffffff").is_ok());
        assert!(validate_hex_color("#ABC").is_ok());
        assert!(validate_hex_color("ffffff").is_err());
        assert!(validate_hex_color("#fffff").is_err());
        assert!(validate_hex_color("#gggggg").is_err());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("sub").join("config.toml");

        let mut config = Config::new();
        config.defaults.title = "Election".to_string();
        config.defaults.scheme = "RdBu".to_string();
        config.defaults.categories = 7;
        config.export.png_scale = 2.0;

        config.save_to(&config_file).unwrap();
        let loaded = Config::load_from(&config_file).unwrap();

        assert_eq!(loaded, config);
        assert!(!config_file.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_load_missing_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = Config::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(&config_file, "[defaults]\nfont = \"Georgia\"\n").unwrap();

        let loaded = Config::load_from(&config_file).unwrap();

        assert_eq!(loaded.defaults.font, "Georgia");
        assert_eq!(loaded.defaults.scheme, "Reds");
        assert_eq!(loaded.export, ExportConfig::default());
    }

    #[test]
    fn test_save_rejects_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        let mut config = Config::new();
        config.defaults.label_limit = 0;

        assert!(config.save_to(&config_file).is_err());
        assert!(!config_file.exists());
    }
}
