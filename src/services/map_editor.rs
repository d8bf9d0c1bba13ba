//! Map editor: one configuration, one dataset, and the actions a host applies.
//!
//! A host (CLI, GUI, web page) forwards user intents as [`MapAction`]s and
//! re-renders with [`MapEditor::document`] after each one.

use crate::error::Result;
use crate::export::csv::ImportReport;
use crate::export::map_renderer::{render, MapDocument};
use crate::export::{suggested_file_name, ExportFormat};
use crate::models::{CategoryIndex, MapConfiguration, RegionSet};
use tracing::debug;

/// A user intent against the map configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapAction {
    /// Switch palette scheme and category count together
    SelectScheme {
        /// Scheme name
        scheme: String,
        /// Category count
        categories: usize,
    },
    /// Change the category count within the current scheme
    SetCategories(usize),
    /// Show or hide the "no data" legend entry
    SetExcludeNoData(bool),
    /// Click on a region, advancing its value
    ClickRegion(String),
    /// Assign a region value directly
    SetRegionValue {
        /// Region id
        id: String,
        /// New value (not range-checked)
        value: CategoryIndex,
    },
    /// Edit one legend label
    SetLegendLabel {
        /// Legend index
        index: usize,
        /// Label text, truncated to the label limit
        text: String,
    },
    /// Edit the map title
    SetTitle(String),
    /// Edit the legend heading
    SetLegendTitle(String),
    /// Change the font family
    SetFont(String),
    /// Change the background color
    SetBackgroundColor(String),
    /// Import CSV text
    ImportText(String),
    /// Reset every region to "no data"
    Reset,
}

/// An exported artifact and the file name to save it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact<T> {
    /// Suggested file name
    pub file_name: String,
    /// File contents
    pub payload: T,
}

/// Owns a configuration and the region dataset it was built from.
#[derive(Debug, Clone)]
pub struct MapEditor {
    config: MapConfiguration,
    regions: RegionSet,
    last_import: Option<ImportReport>,
}

impl MapEditor {
    /// Creates an editor over an existing configuration.
    #[must_use]
    pub const fn new(config: MapConfiguration, regions: RegionSet) -> Self {
        Self {
            config,
            regions,
            last_import: None,
        }
    }

    /// Applies one action.
    ///
    /// # Errors
    ///
    /// Propagates the store's error; the configuration is unchanged on error.
    pub fn apply(&mut self, action: MapAction) -> Result<()> {
        debug!(?action, "applying map action");
        match action {
            MapAction::SelectScheme { scheme, categories } => {
                self.config.select_scheme(&scheme, categories)?;
            }
            MapAction::SetCategories(categories) => self.config.set_categories(categories)?,
            MapAction::SetExcludeNoData(exclude) => self.config.set_exclude_no_data(exclude),
            MapAction::ClickRegion(id) => {
                self.config.cycle_region_value(&id)?;
            }
            MapAction::SetRegionValue { id, value } => self.config.set_region_value(&id, value)?,
            MapAction::SetLegendLabel { index, text } => {
                self.config.set_legend_label(index, &text)?;
            }
            MapAction::SetTitle(title) => self.config.set_title(title),
            MapAction::SetLegendTitle(title) => self.config.set_legend_title(title),
            MapAction::SetFont(font) => self.config.set_font(font),
            MapAction::SetBackgroundColor(color) => self.config.set_background_color(color),
            MapAction::ImportText(text) => {
                self.last_import = Some(self.config.import_from_text(&text));
            }
            MapAction::Reset => self.config.clear_values(),
        }
        Ok(())
    }

    /// Current configuration snapshot.
    #[must_use]
    pub const fn config(&self) -> &MapConfiguration {
        &self.config
    }

    /// Region dataset.
    #[must_use]
    pub const fn regions(&self) -> &RegionSet {
        &self.regions
    }

    /// Report from the most recent [`MapAction::ImportText`].
    #[must_use]
    pub const fn last_import(&self) -> Option<&ImportReport> {
        self.last_import.as_ref()
    }

    /// Renders the current snapshot.
    #[must_use]
    pub fn document(&self) -> MapDocument {
        render(&self.config, &self.regions)
    }

    /// SVG export of the current snapshot.
    #[must_use]
    pub fn export_svg(&self) -> ExportArtifact<String> {
        ExportArtifact {
            file_name: suggested_file_name(self.config.title(), ExportFormat::Svg),
            payload: self.document().to_svg(),
        }
    }

    /// CSV export of the current snapshot.
    #[must_use]
    pub fn export_csv(&self) -> ExportArtifact<String> {
        ExportArtifact {
            file_name: suggested_file_name(self.config.title(), ExportFormat::Csv),
            payload: self.config.export_to_text(),
        }
    }

    /// PNG export of the current snapshot at `scale` pixels per unit.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::MapError::Raster`] if rasterization fails.
    #[cfg(feature = "png")]
    pub fn export_png(&self, scale: f32) -> Result<ExportArtifact<Vec<u8>>> {
        use crate::export::raster::{render_png, RasterOptions};

        let options = RasterOptions {
            scale,
            font_family: self.config.font().to_string(),
        };
        let payload = render_png(&self.export_svg().payload, &options)?;
        Ok(ExportArtifact {
            file_name: suggested_file_name(self.config.title(), ExportFormat::Png),
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MapError;

    fn editor() -> MapEditor {
        let regions = RegionSet::embedded().unwrap();
        let config = MapConfiguration::with_defaults(&regions).unwrap();
        MapEditor::new(config, regions)
    }

    #[test]
    fn test_click_cycles_and_rerenders() {
        let mut editor = editor();
        editor
            .apply(MapAction::ClickRegion("TX".to_string()))
            .unwrap();

        assert_eq!(editor.config().value("TX"), Some(CategoryIndex::new(1)));
        assert_eq!(editor.document().region("TX").unwrap().fill, "#fee0d2");
    }

    #[test]
    fn test_failed_action_leaves_state() {
        let mut editor = editor();
        let before = editor.config().clone();

        let result = editor.apply(MapAction::SelectScheme {
            scheme: "Nope".to_string(),
            categories: 4,
        });

        assert!(matches!(result, Err(MapError::UnknownScheme { .. })));
        assert_eq!(editor.config(), &before);

        let result = editor.apply(MapAction::ClickRegion("ZZ".to_string()));
        assert!(matches!(result, Err(MapError::UnknownRegion(_))));
        assert_eq!(editor.config(), &before);
    }

    #[test]
    fn test_import_records_report() {
        let mut editor = editor();
        editor
            .apply(MapAction::ImportText("title,Imported\nZZ,1\n".to_string()))
            .unwrap();

        let report = editor.last_import().unwrap();
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(editor.config().title(), "Imported");
    }

    #[test]
    fn test_reset_clears_values() {
        let mut editor = editor();
        editor
            .apply(MapAction::SetRegionValue {
                id: "OH".to_string(),
                value: CategoryIndex::new(3),
            })
            .unwrap();
        editor.apply(MapAction::Reset).unwrap();
        assert_eq!(editor.config().value("OH"), Some(CategoryIndex::NO_DATA));
    }

    #[test]
    fn test_export_file_names() {
        let mut editor = editor();
        editor
            .apply(MapAction::SetTitle("Vote Share".to_string()))
            .unwrap();

        let svg = editor.export_svg();
        let csv = editor.export_csv();

        assert_eq!(svg.file_name, "Vote-Share-us-map-maker.svg");
        assert!(svg.payload.contains("Vote Share"));
        assert_eq!(csv.file_name, "Vote-Share-us-map-maker.csv");
        assert!(csv.payload.starts_with("title,Vote Share\n"));
    }

    #[cfg(feature = "png")]
    #[test]
    fn test_export_png() {
        let artifact = editor().export_png(0.5).unwrap();
        assert_eq!(artifact.file_name, "Title-us-map-maker.png");
        assert!(artifact.payload.starts_with(b"\x89PNG"));
    }
}
