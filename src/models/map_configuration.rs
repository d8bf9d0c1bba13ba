//! The mutable map configuration and its derivation rules.
//!
//! All user-editable state lives in one [`MapConfiguration`]. The color
//! scheme, legend and region values are three sequences addressed by the same
//! [`CategoryIndex`]; the only path that changes the scheme or category count
//! is [`MapConfiguration::select_scheme`], which keeps them aligned.

use super::color_scheme::ColorScheme;
use super::palette::{PaletteTable, MAX_CATEGORIES};
use super::region::RegionSet;
use super::CategoryIndex;
use crate::error::{MapError, Result};
use crate::export::csv::{self, ImportReport};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Legend label for the "no data" slot.
pub const NO_DATA_LABEL: &str = "No data";

/// Default cap on legend label length, in characters.
pub const DEFAULT_LABEL_LIMIT: usize = 16;

/// Starting values for a new map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapDefaults {
    /// Map title
    pub title: String,
    /// Palette scheme name
    pub scheme: String,
    /// Number of categories (3-9)
    pub categories: usize,
    /// Legend heading
    pub legend_title: String,
    /// Font family for all text
    pub font: String,
    /// Document background color
    pub background_color: String,
    /// Maximum legend label length in characters
    pub label_limit: usize,
}

impl Default for MapDefaults {
    fn default() -> Self {
        Self {
            title: "Title".to_string(),
            scheme: "Reds".to_string(),
            categories: 3,
            legend_title: "Legend".to_string(),
            font: "Arial".to_string(),
            background_color: "#ffffff".to_string(),
            label_limit: DEFAULT_LABEL_LIMIT,
        }
    }
}

/// Default legend label for a category slot.
fn default_label(index: usize) -> String {
    if index == 0 {
        NO_DATA_LABEL.to_string()
    } else {
        format!("Cat. {index}")
    }
}

/// Replaces line breaks with spaces so every text field fits on one line of
/// the map file.
fn single_line(text: impl Into<String>) -> String {
    let text = text.into();
    if text.contains(['\r', '\n']) {
        text.replace(['\r', '\n'], " ")
    } else {
        text
    }
}

/// User-editable map state.
///
/// # Invariants
///
/// - `color_scheme.len() == categories + 1`
/// - `legend.len() >= color_scheme.len()`; surplus labels are kept so the
///   category count can grow back without losing text
/// - `values` holds exactly one entry per region of the dataset it was built from
/// - values are not clamped when the category count shrinks; rendering clamps
/// - text fields never contain line breaks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapConfiguration {
    title: String,
    scheme_name: String,
    categories: usize,
    color_scheme: ColorScheme,
    exclude_no_data: bool,
    legend_title: String,
    legend: Vec<String>,
    background_color: String,
    font: String,
    values: BTreeMap<String, CategoryIndex>,
    label_limit: usize,
    palettes: Arc<PaletteTable>,
}

impl MapConfiguration {
    /// Creates a configuration with every region at "no data".
    ///
    /// # Errors
    ///
    /// Returns [`MapError::UnknownScheme`] if the default scheme and category
    /// count are not in the palette table.
    pub fn new(
        regions: &RegionSet,
        palettes: Arc<PaletteTable>,
        defaults: &MapDefaults,
    ) -> Result<Self> {
        let color_scheme =
            ColorScheme::from_palette(&palettes, &defaults.scheme, defaults.categories)?;

        let legend = (0..=MAX_CATEGORIES)
            .map(default_label)
            .collect();

        let values = regions
            .iter()
            .map(|region| (region.id.clone(), CategoryIndex::NO_DATA))
            .collect();

        Ok(Self {
            title: single_line(defaults.title.as_str()),
            scheme_name: defaults.scheme.clone(),
            categories: defaults.categories,
            color_scheme,
            exclude_no_data: false,
            legend_title: single_line(defaults.legend_title.as_str()),
            legend,
            background_color: single_line(defaults.background_color.as_str()),
            font: single_line(defaults.font.as_str()),
            values,
            label_limit: defaults.label_limit.max(1),
            palettes,
        })
    }

    /// Creates a configuration from the embedded palette table and default values.
    pub fn with_defaults(regions: &RegionSet) -> Result<Self> {
        Self::new(
            regions,
            Arc::new(PaletteTable::load()?),
            &MapDefaults::default(),
        )
    }

    // ------------------------------------------------------------------
    // Derived-field updates
    // ------------------------------------------------------------------

    /// Switches palette scheme and category count together.
    ///
    /// On [`MapError::UnknownScheme`] nothing changes.
    pub fn select_scheme(&mut self, scheme: &str, categories: usize) -> Result<()> {
        let color_scheme = ColorScheme::from_palette(&self.palettes, scheme, categories)?;

        debug!(
            scheme,
            categories,
            no_data = color_scheme.no_data(),
            "selected color scheme"
        );

        self.scheme_name = scheme.to_string();
        self.categories = categories;
        self.color_scheme = color_scheme;

        while self.legend.len() < self.color_scheme.len() {
            self.legend.push(default_label(self.legend.len()));
        }

        Ok(())
    }

    /// Changes only the category count, keeping the current scheme.
    pub fn set_categories(&mut self, categories: usize) -> Result<()> {
        let scheme = self.scheme_name.clone();
        self.select_scheme(&scheme, categories)
    }

    /// Writes a legend label, truncated to the label limit.
    pub fn set_legend_label(&mut self, index: usize, text: &str) -> Result<()> {
        let truncated: String = text.chars().take(self.label_limit).collect();
        self.restore_legend_label(index, truncated)
    }

    /// Writes a legend label as stored in a map file, without truncation.
    ///
    /// Labels saved under a larger limit keep their full text.
    pub(crate) fn restore_legend_label(&mut self, index: usize, text: String) -> Result<()> {
        let len = self.legend.len();
        let slot = self
            .legend
            .get_mut(index)
            .ok_or(MapError::LegendIndexOutOfRange { index, len })?;

        *slot = single_line(text);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Region values
    // ------------------------------------------------------------------

    /// Sets a region's category. No range check; rendering clamps.
    pub fn set_region_value(&mut self, id: &str, value: CategoryIndex) -> Result<()> {
        let slot = self
            .values
            .get_mut(id)
            .ok_or_else(|| MapError::UnknownRegion(id.to_string()))?;
        *slot = value;
        Ok(())
    }

    /// Advances a region to the next category, wrapping to "no data" after the last.
    ///
    /// Returns the new value.
    pub fn cycle_region_value(&mut self, id: &str) -> Result<CategoryIndex> {
        let len = self.color_scheme.len();
        let slot = self
            .values
            .get_mut(id)
            .ok_or_else(|| MapError::UnknownRegion(id.to_string()))?;

        *slot = slot.cycled(len);
        debug!(region = id, value = %slot, "cycled region value");
        Ok(*slot)
    }

    /// Resets every region to "no data".
    pub fn clear_values(&mut self) {
        for value in self.values.values_mut() {
            *value = CategoryIndex::NO_DATA;
        }
    }

    // ------------------------------------------------------------------
    // Plain setters
    // ------------------------------------------------------------------

    /// Shows or hides the "no data" legend entry.
    pub fn set_exclude_no_data(&mut self, exclude: bool) {
        self.exclude_no_data = exclude;
    }

    /// Sets the map title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = single_line(title);
    }

    /// Sets the document background color.
    pub fn set_background_color(&mut self, color: impl Into<String>) {
        self.background_color = single_line(color);
    }

    /// Sets the font family.
    pub fn set_font(&mut self, font: impl Into<String>) {
        self.font = single_line(font);
    }

    /// Sets the legend heading.
    pub fn set_legend_title(&mut self, title: impl Into<String>) {
        self.legend_title = single_line(title);
    }

    // ------------------------------------------------------------------
    // CSV
    // ------------------------------------------------------------------

    /// Replaces the configuration from `key,value` text. See [`csv::import`].
    pub fn import_from_text(&mut self, text: &str) -> ImportReport {
        csv::import(self, text)
    }

    /// Serializes the configuration as `key,value` text. See [`csv::export`].
    pub fn export_to_text(&self) -> String {
        csv::export(self)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Map title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Selected palette scheme name.
    pub fn scheme_name(&self) -> &str {
        &self.scheme_name
    }

    /// Number of non-"no data" categories.
    pub fn categories(&self) -> usize {
        self.categories
    }

    /// Derived color array.
    pub fn color_scheme(&self) -> &ColorScheme {
        &self.color_scheme
    }

    /// Whether the "no data" entry is left out of the legend.
    pub fn exclude_no_data(&self) -> bool {
        self.exclude_no_data
    }

    /// Legend heading.
    pub fn legend_title(&self) -> &str {
        &self.legend_title
    }

    /// All legend labels, including surplus slots beyond the active range.
    pub fn legend(&self) -> &[String] {
        &self.legend
    }

    /// Background color.
    pub fn background_color(&self) -> &str {
        &self.background_color
    }

    /// Font family.
    pub fn font(&self) -> &str {
        &self.font
    }

    /// Region values keyed by region id.
    pub fn values(&self) -> &BTreeMap<String, CategoryIndex> {
        &self.values
    }

    /// Value of one region.
    pub fn value(&self, id: &str) -> Option<CategoryIndex> {
        self.values.get(id).copied()
    }

    /// Maximum legend label length in characters.
    pub fn label_limit(&self) -> usize {
        self.label_limit
    }

    /// Palette table used for scheme lookups.
    pub fn palettes(&self) -> &PaletteTable {
        &self.palettes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::palette::MIN_CATEGORIES;

    fn config() -> MapConfiguration {
        let regions = RegionSet::embedded().unwrap();
        MapConfiguration::with_defaults(&regions).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = config();
        assert_eq!(config.title(), "Title");
        assert_eq!(config.scheme_name(), "Reds");
        assert_eq!(config.categories(), 3);
        assert_eq!(
            config.color_scheme().as_slice(),
            ["#aaaaaa", "#fee0d2", "#fc9272", "#de2d26"]
        );
        assert!(!config.exclude_no_data());
        assert_eq!(config.legend().len(), 10);
        assert_eq!(config.legend()[0], "No data");
        assert_eq!(config.legend()[3], "Cat. 3");
        assert_eq!(config.values().len(), 51);
        assert!(config.values().values().all(|v| v.is_no_data()));
    }

    #[test]
    fn test_select_scheme_keeps_length_invariant() {
        let mut config = config();
        let names: Vec<String> = config
            .palettes()
            .schemes()
            .iter()
            .map(|s| s.name.clone())
            .collect();

        for name in names {
            for categories in MIN_CATEGORIES..=MAX_CATEGORIES {
                config.select_scheme(&name, categories).unwrap();
                assert_eq!(config.color_scheme().len(), categories + 1);
                assert!(config.legend().len() >= config.color_scheme().len());
            }
        }
    }

    #[test]
    fn test_select_scheme_twice_is_idempotent() {
        let mut config = config();
        config.select_scheme("Greys", 5).unwrap();
        let first = config.color_scheme().clone();
        config.select_scheme("Greys", 5).unwrap();
        assert_eq!(config.color_scheme(), &first);
        assert_eq!(config.color_scheme().len(), 6);
    }

    #[test]
    fn test_unknown_scheme_keeps_prior_state() {
        let mut config = config();
        config.select_scheme("Blues", 5).unwrap();
        let before = config.clone();

        let err = config.select_scheme("Blues", 12).unwrap_err();
        assert!(matches!(err, MapError::UnknownScheme { .. }));
        assert_eq!(config, before);

        assert!(config.select_scheme("Nonexistent", 3).is_err());
        assert_eq!(config, before);
    }

    #[test]
    fn test_set_categories_keeps_scheme() {
        let mut config = config();
        config.select_scheme("Purples", 4).unwrap();
        config.set_categories(7).unwrap();
        assert_eq!(config.scheme_name(), "Purples");
        assert_eq!(config.color_scheme().len(), 8);
    }

    #[test]
    fn test_legend_labels_survive_shrink_and_grow() {
        let mut config = config();
        config.select_scheme("Reds", 7).unwrap();
        config.set_legend_label(7, "Highest").unwrap();
        config.select_scheme("Reds", 3).unwrap();
        assert_eq!(config.legend()[7], "Highest");
        config.select_scheme("Reds", 7).unwrap();
        assert_eq!(config.legend()[7], "Highest");
    }

    #[test]
    fn test_set_legend_label_truncates_and_checks_index() {
        let mut config = config();
        config.set_legend_label(1, "A very long label indeed").unwrap();
        assert_eq!(config.legend()[1].chars().count(), DEFAULT_LABEL_LIMIT);
        assert_eq!(config.legend()[1], "A very long labe");

        let err = config.set_legend_label(10, "x").unwrap_err();
        assert!(matches!(
            err,
            MapError::LegendIndexOutOfRange { index: 10, len: 10 }
        ));
    }

    #[test]
    fn test_label_limit_from_defaults() {
        let regions = RegionSet::embedded().unwrap();
        let defaults = MapDefaults {
            label_limit: 4,
            ..MapDefaults::default()
        };
        let mut config =
            MapConfiguration::new(&regions, Arc::new(PaletteTable::load().unwrap()), &defaults)
                .unwrap();
        config.set_legend_label(2, "Medium").unwrap();
        assert_eq!(config.legend()[2], "Medi");
    }

    #[test]
    fn test_text_setters_replace_line_breaks() {
        let mut config = config();
        config.set_title("Line one\nLine two");
        config.set_legend_title("A\r\nB");
        config.set_font("Times\nNew Roman");
        config.set_legend_label(1, "Lo\nw").unwrap();

        assert_eq!(config.title(), "Line one Line two");
        assert_eq!(config.legend_title(), "A  B");
        assert_eq!(config.font(), "Times New Roman");
        assert_eq!(config.legend()[1], "Lo w");
    }

    #[test]
    fn test_whitespace_is_kept() {
        let mut config = config();
        config.set_title("  Padded ");
        config.set_legend_label(1, "Low ").unwrap();
        assert_eq!(config.title(), "  Padded ");
        assert_eq!(config.legend()[1], "Low ");
    }

    #[test]
    fn test_restore_legend_label_skips_truncation() {
        let mut config = config();
        config
            .restore_legend_label(2, "A label longer than sixteen".to_string())
            .unwrap();
        assert_eq!(config.legend()[2], "A label longer than sixteen");
        assert!(config.restore_legend_label(10, String::new()).is_err());
    }

    #[test]
    fn test_set_region_value() {
        let mut config = config();
        config.set_region_value("CA", CategoryIndex::new(2)).unwrap();
        assert_eq!(config.value("CA"), Some(CategoryIndex::new(2)));

        // No range check in the store
        config.set_region_value("TX", CategoryIndex::new(9)).unwrap();
        assert_eq!(config.value("TX"), Some(CategoryIndex::new(9)));

        let err = config
            .set_region_value("ZZ", CategoryIndex::new(1))
            .unwrap_err();
        assert!(matches!(err, MapError::UnknownRegion(id) if id == "ZZ"));
        assert_eq!(config.values().len(), 51);
    }

    #[test]
    fn test_cycle_region_value_scenario() {
        let mut config = config();
        let seen: Vec<usize> = (0..4)
            .map(|_| config.cycle_region_value("OH").unwrap().get())
            .collect();
        assert_eq!(seen, vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_cycle_returns_to_start_after_len_clicks() {
        let mut config = config();
        for categories in MIN_CATEGORIES..=MAX_CATEGORIES {
            config.select_scheme("Blues", categories).unwrap();
            let len = config.color_scheme().len();
            config.set_region_value("NY", CategoryIndex::new(1)).unwrap();

            for step in 1..len {
                let value = config.cycle_region_value("NY").unwrap();
                if step == len - 2 {
                    assert_eq!(value.get(), len - 1);
                }
            }
            // one short of a full turn lands on 0, the last click restores 1
            assert_eq!(config.value("NY"), Some(CategoryIndex::NO_DATA));
            assert_eq!(
                config.cycle_region_value("NY").unwrap(),
                CategoryIndex::new(1)
            );
        }
    }

    #[test]
    fn test_cycle_unknown_region() {
        let mut config = config();
        assert!(config.cycle_region_value("XX").is_err());
    }

    #[test]
    fn test_clear_values() {
        let mut config = config();
        config.set_region_value("WA", CategoryIndex::new(3)).unwrap();
        config.clear_values();
        assert!(config.values().values().all(|v| v.is_no_data()));
    }

    #[test]
    fn test_plain_setters() {
        let mut config = config();
        config.set_title("Population");
        config.set_background_color("#eeeeee");
        config.set_font("Georgia");
        config.set_legend_title("People");
        config.set_exclude_no_data(true);

        assert_eq!(config.title(), "Population");
        assert_eq!(config.background_color(), "#eeeeee");
        assert_eq!(config.font(), "Georgia");
        assert_eq!(config.legend_title(), "People");
        assert!(config.exclude_no_data());
    }
}
