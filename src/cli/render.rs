//! Render a map file to SVG, PNG or normalized CSV.

use crate::cli::common::{load_config, load_regions, read_map_file, CliError, CliResult};
use crate::export::ExportFormat;
use crate::services::{MapEditor, MapFileService};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::info;

/// Render a map file
#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// Input map CSV file
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output file (defaults to `<title>-us-map-maker.<ext>` in the configured output directory)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format: svg, png or csv (inferred from --output when omitted)
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<ExportFormat>,

    /// Region dataset JSON (defaults to the built-in state grid)
    #[arg(long, value_name = "JSON")]
    pub regions: Option<PathBuf>,

    /// PNG pixels per SVG unit (defaults to the configured scale)
    #[arg(long)]
    pub scale: Option<f32>,
}

impl RenderArgs {
    /// Execute the render command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config();
        let regions = load_regions(self.regions.as_deref())?;
        let map = read_map_file(&self.input, &regions)?;
        let editor = MapEditor::new(map, regions);

        let format = self.resolve_format()?;
        let (file_name, payload) = match format {
            ExportFormat::Svg => {
                let artifact = editor.export_svg();
                (artifact.file_name, artifact.payload.into_bytes())
            }
            ExportFormat::Csv => {
                let artifact = editor.export_csv();
                (artifact.file_name, artifact.payload.into_bytes())
            }
            ExportFormat::Png => {
                let scale = self.scale.unwrap_or(config.export.png_scale);
                render_png(&editor, scale)?
            }
        };

        let output = self.output.clone().unwrap_or_else(|| {
            config
                .export
                .output_dir
                .as_deref()
                .unwrap_or_else(|| Path::new("."))
                .join(&file_name)
        });

        MapFileService::write_atomic(&output, &payload)?;
        info!(path = %output.display(), %format, "rendered map");
        println!("Wrote {}", output.display());
        Ok(())
    }

    fn resolve_format(&self) -> CliResult<ExportFormat> {
        if let Some(format) = self.format {
            return Ok(format);
        }

        let Some(ext) = self
            .output
            .as_ref()
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
        else {
            return Ok(ExportFormat::Svg);
        };

        ext.parse().map_err(CliError::validation)
    }
}

#[cfg(feature = "png")]
fn render_png(editor: &MapEditor, scale: f32) -> CliResult<(String, Vec<u8>)> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(CliError::validation(format!(
            "Scale must be positive, got {scale}"
        )));
    }
    let artifact = editor.export_png(scale)?;
    Ok((artifact.file_name, artifact.payload))
}

#[cfg(not(feature = "png"))]
fn render_png(_editor: &MapEditor, _scale: f32) -> CliResult<(String, Vec<u8>)> {
    Err(CliError::validation(
        "PNG export is not available: built without the `png` feature",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(output: Option<&str>, format: Option<ExportFormat>) -> RenderArgs {
        RenderArgs {
            input: PathBuf::from("map.csv"),
            output: output.map(PathBuf::from),
            format,
            regions: None,
            scale: None,
        }
    }

    #[test]
    fn test_format_resolution() {
        assert_eq!(args(None, None).resolve_format(), Ok(ExportFormat::Svg));
        assert_eq!(
            args(Some("out.PNG"), None).resolve_format(),
            Ok(ExportFormat::Png)
        );
        assert_eq!(
            args(Some("out.png"), Some(ExportFormat::Svg)).resolve_format(),
            Ok(ExportFormat::Svg)
        );
        assert!(args(Some("out.gif"), None).resolve_format().is_err());
    }
}
