//! Edit fields of a map file in place.

use crate::cli::common::{load_regions, read_map_file, CliError, CliResult};
use crate::config::validate_hex_color;
use crate::models::CategoryIndex;
use crate::services::{MapAction, MapEditor, MapFileService};
use clap::Args;
use std::path::PathBuf;

/// Edit a map file
#[derive(Debug, Clone, Args)]
pub struct SetArgs {
    /// Map CSV file to edit
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Write the result here instead of back to the input
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Map title
    #[arg(long)]
    pub title: Option<String>,

    /// Color scheme name
    #[arg(long)]
    pub scheme: Option<String>,

    /// Number of categories (3-9)
    #[arg(long)]
    pub categories: Option<usize>,

    /// Hide the "no data" legend entry (true/false)
    #[arg(long, value_name = "BOOL")]
    pub exclude_no_data: Option<bool>,

    /// Legend heading
    #[arg(long)]
    pub legend_title: Option<String>,

    /// Font family
    #[arg(long)]
    pub font: Option<String>,

    /// Background color (#RRGGBB or #RGB)
    #[arg(long, value_name = "HEX")]
    pub background: Option<String>,

    /// Legend label, repeatable (e.g. --legend 1=Low)
    #[arg(long, value_name = "N=TEXT")]
    pub legend: Vec<String>,

    /// Region value, repeatable (e.g. --value CA=2)
    #[arg(long, value_name = "ID=N")]
    pub value: Vec<String>,

    /// Region dataset JSON (defaults to the built-in state grid)
    #[arg(long, value_name = "JSON")]
    pub regions: Option<PathBuf>,
}

impl SetArgs {
    /// Execute the set command
    pub fn execute(&self) -> CliResult<()> {
        let actions = self.actions()?;
        let changes_scheme = self.scheme.is_some() || self.categories.is_some();
        if actions.is_empty() && !changes_scheme {
            return Err(CliError::validation(
                "At least one field must be specified (see --help)",
            ));
        }

        let regions = load_regions(self.regions.as_deref())?;
        let map = read_map_file(&self.input, &regions)?;
        let mut editor = MapEditor::new(map, regions);

        // scheme first so legend labels land on the resized legend
        if changes_scheme {
            let scheme = self
                .scheme
                .clone()
                .unwrap_or_else(|| editor.config().scheme_name().to_string());
            let categories = self.categories.unwrap_or(editor.config().categories());
            editor.apply(MapAction::SelectScheme { scheme, categories })?;
        }

        for action in actions {
            editor.apply(action)?;
        }

        let output = self.output.as_ref().unwrap_or(&self.input);
        MapFileService::save(editor.config(), output)?;
        println!("Updated {}", output.display());
        Ok(())
    }

    /// Field edits other than the scheme, validated before any file is read.
    fn actions(&self) -> CliResult<Vec<MapAction>> {
        let mut actions = Vec::new();

        if let Some(title) = &self.title {
            actions.push(MapAction::SetTitle(title.clone()));
        }
        if let Some(exclude) = self.exclude_no_data {
            actions.push(MapAction::SetExcludeNoData(exclude));
        }
        if let Some(title) = &self.legend_title {
            actions.push(MapAction::SetLegendTitle(title.clone()));
        }
        if let Some(font) = &self.font {
            actions.push(MapAction::SetFont(font.clone()));
        }
        if let Some(color) = &self.background {
            validate_hex_color(color).map_err(CliError::validation)?;
            actions.push(MapAction::SetBackgroundColor(color.clone()));
        }
        for entry in &self.legend {
            let (index, text) = split_assignment(entry, "--legend")?;
            let index = index.parse().map_err(|_| {
                CliError::validation(format!("Invalid legend index in --legend '{entry}'"))
            })?;
            actions.push(MapAction::SetLegendLabel {
                index,
                text: text.to_string(),
            });
        }
        for entry in &self.value {
            let (id, value) = split_assignment(entry, "--value")?;
            let value: CategoryIndex = value.parse().map_err(|_| {
                CliError::validation(format!("Invalid category in --value '{entry}'"))
            })?;
            actions.push(MapAction::SetRegionValue {
                id: id.to_string(),
                value,
            });
        }

        Ok(actions)
    }
}

/// Splits `KEY=VALUE`, trimming the key.
fn split_assignment<'a>(entry: &'a str, flag: &str) -> CliResult<(&'a str, &'a str)> {
    entry
        .split_once('=')
        .map(|(key, value)| (key.trim(), value))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| CliError::validation(format!("Expected KEY=VALUE for {flag}, got '{entry}'")))
}
