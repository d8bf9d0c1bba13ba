//! Create a new map file.

use crate::cli::common::{load_config, load_regions, new_configuration, CliError, CliResult};
use crate::services::{MapAction, MapEditor, MapFileService};
use clap::Args;
use std::path::PathBuf;

/// Write a map CSV with every region at "no data"
#[derive(Debug, Clone, Args)]
pub struct NewArgs {
    /// Output CSV file
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Map title
    #[arg(long)]
    pub title: Option<String>,

    /// Color scheme name (see `schemes`)
    #[arg(long)]
    pub scheme: Option<String>,

    /// Number of categories (3-9)
    #[arg(long)]
    pub categories: Option<usize>,

    /// Region dataset JSON (defaults to the built-in state grid)
    #[arg(long, value_name = "JSON")]
    pub regions: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl NewArgs {
    /// Execute the new command
    pub fn execute(&self) -> CliResult<()> {
        if self.output.exists() && !self.force {
            return Err(CliError::validation(format!(
                "Output file already exists: {} (use --force to overwrite)",
                self.output.display()
            )));
        }

        let config = load_config();
        let regions = load_regions(self.regions.as_deref())?;
        let map = new_configuration(&config, &regions)?;
        let mut editor = MapEditor::new(map, regions);

        if let Some(title) = &self.title {
            editor.apply(MapAction::SetTitle(title.clone()))?;
        }
        if self.scheme.is_some() || self.categories.is_some() {
            let scheme = self
                .scheme
                .clone()
                .unwrap_or_else(|| editor.config().scheme_name().to_string());
            let categories = self.categories.unwrap_or(editor.config().categories());
            editor.apply(MapAction::SelectScheme { scheme, categories })?;
        }

        MapFileService::save(editor.config(), &self.output)?;
        println!("Created map: {}", self.output.display());
        Ok(())
    }
}
