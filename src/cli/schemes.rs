//! List the color schemes in the palette table.

use crate::cli::common::{CliError, CliResult};
use crate::models::{PaletteTable, SchemeKind};
use clap::Args;
use serde::Serialize;

/// List available color schemes
#[derive(Debug, Clone, Args)]
pub struct SchemesArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON row for one scheme
#[derive(Debug, Serialize)]
struct SchemeInfo<'a> {
    name: &'a str,
    kind: SchemeKind,
    no_data: &'a str,
    categories: Vec<usize>,
}

impl SchemesArgs {
    /// Execute the schemes command
    pub fn execute(&self) -> CliResult<()> {
        let table = PaletteTable::load()?;
        let rows: Vec<SchemeInfo<'_>> = table
            .schemes()
            .iter()
            .map(|scheme| SchemeInfo {
                name: &scheme.name,
                kind: scheme.kind,
                no_data: &scheme.no_data,
                categories: scheme.category_counts().collect(),
            })
            .collect();

        if self.json {
            let json = serde_json::to_string_pretty(&rows)
                .map_err(|e| CliError::io(format!("Failed to serialize schemes to JSON: {e}")))?;
            println!("{json}");
        } else {
            println!("{:<10} {:<12} CATEGORIES", "NAME", "KIND");
            for row in &rows {
                let (min, max) = (
                    row.categories.first().copied().unwrap_or_default(),
                    row.categories.last().copied().unwrap_or_default(),
                );
                println!("{:<10} {:<12} {}-{}", row.name, row.kind, min, max);
            }
        }

        Ok(())
    }
}
