//! Configuration management CLI commands.

use crate::cli::common::{CliError, CliResult};
use crate::config::{validate_hex_color, Config};
use crate::constants::APP_NAME;
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug, Clone)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug, Clone)]
pub struct ConfigSetArgs {
    /// Default map title
    #[arg(long)]
    title: Option<String>,

    /// Default color scheme
    #[arg(long)]
    scheme: Option<String>,

    /// Default number of categories
    #[arg(long)]
    categories: Option<usize>,

    /// Default legend heading
    #[arg(long)]
    legend_title: Option<String>,

    /// Default font family
    #[arg(long)]
    font: Option<String>,

    /// Default background color (#RRGGBB or #RGB)
    #[arg(long, value_name = "HEX")]
    background: Option<String>,

    /// Maximum legend label length
    #[arg(long, value_name = "N")]
    label_limit: Option<usize>,

    /// PNG pixels per SVG unit
    #[arg(long)]
    png_scale: Option<f32>,

    /// Directory for rendered files
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            let json = serde_json::to_string_pretty(&config).map_err(|e| {
                CliError::io(format!("Failed to serialize configuration to JSON: {e}"))
            })?;
            println!("{json}");
        } else {
            output_human_readable(&config);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.scheme.is_none()
            && self.categories.is_none()
            && self.legend_title.is_none()
            && self.font.is_none()
            && self.background.is_none()
            && self.label_limit.is_none()
            && self.png_scale.is_none()
            && self.output_dir.is_none()
    }

    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.is_empty() {
            return Err(CliError::validation(
                "At least one configuration option must be specified (see --help)",
            ));
        }

        let mut config = Config::load().unwrap_or_default();
        let defaults = &mut config.defaults;

        if let Some(title) = &self.title {
            defaults.title.clone_from(title);
        }
        if let Some(scheme) = &self.scheme {
            defaults.scheme.clone_from(scheme);
        }
        if let Some(categories) = self.categories {
            defaults.categories = categories;
        }
        if let Some(title) = &self.legend_title {
            defaults.legend_title.clone_from(title);
        }
        if let Some(font) = &self.font {
            defaults.font.clone_from(font);
        }
        if let Some(color) = &self.background {
            validate_hex_color(color).map_err(CliError::validation)?;
            defaults.background_color.clone_from(color);
        }
        if let Some(limit) = self.label_limit {
            defaults.label_limit = limit;
        }
        if let Some(scale) = self.png_scale {
            config.export.png_scale = scale;
        }

        if let Some(path) = &self.output_dir {
            config.export.output_dir = Some(path.clone());
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("Invalid configuration: {e:#}")))?;

        if let Some(path) = &self.output_dir {
            std::fs::create_dir_all(path).map_err(|e| {
                CliError::io(format!(
                    "Failed to create output directory {}: {}",
                    path.display(),
                    e
                ))
            })?;
        }

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");
        Ok(())
    }
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    let heading = format!("{APP_NAME} Configuration");
    println!("{heading}");
    println!("{}", "=".repeat(heading.len()));
    println!();

    let defaults = &config.defaults;
    println!("Defaults:");
    println!("  Title: {}", defaults.title);
    println!("  Scheme: {} ({} categories)", defaults.scheme, defaults.categories);
    println!("  Legend Title: {}", defaults.legend_title);
    println!("  Font: {}", defaults.font);
    println!("  Background: {}", defaults.background_color);
    println!("  Label Limit: {}", defaults.label_limit);
    println!();

    println!("Export:");
    println!("  PNG Scale: {}", config.export.png_scale);
    match &config.export.output_dir {
        Some(dir) => println!("  Output Directory: {}", dir.display()),
        None => println!("  Output Directory: (current directory)"),
    }
    println!();
}
