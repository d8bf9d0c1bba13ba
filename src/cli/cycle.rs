//! Simulate clicks on a region.

use crate::cli::common::{load_regions, read_map_file, CliError, CliResult};
use crate::services::{MapAction, MapEditor, MapFileService};
use clap::Args;
use std::path::PathBuf;

/// Advance a region's value as if it were clicked
#[derive(Debug, Clone, Args)]
pub struct CycleArgs {
    /// Map CSV file to edit
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Region id (e.g. CA)
    #[arg(long, value_name = "ID")]
    pub region: String,

    /// Number of clicks
    #[arg(long, default_value_t = 1)]
    pub times: usize,

    /// Region dataset JSON (defaults to the built-in state grid)
    #[arg(long, value_name = "JSON")]
    pub regions: Option<PathBuf>,
}

impl CycleArgs {
    /// Execute the cycle command
    pub fn execute(&self) -> CliResult<()> {
        let regions = load_regions(self.regions.as_deref())?;
        if !regions.contains(&self.region) {
            return Err(CliError::validation(format!(
                "Unknown region: {}",
                self.region
            )));
        }

        let map = read_map_file(&self.input, &regions)?;
        let mut editor = MapEditor::new(map, regions);

        for _ in 0..self.times {
            editor.apply(MapAction::ClickRegion(self.region.clone()))?;
        }

        MapFileService::save(editor.config(), &self.input)?;

        let value = editor.config().value(&self.region).unwrap_or_default();
        let label = editor
            .config()
            .legend()
            .get(value.get())
            .map_or("", String::as_str);
        println!("{}: {} ({})", self.region, value, label);
        Ok(())
    }
}
