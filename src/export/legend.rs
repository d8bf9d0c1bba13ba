//! Legend layout: index-aligned swatches and labels on a fixed grid.

use crate::models::{CategoryIndex, MapConfiguration};

/// Grid geometry for legend entries.
///
/// Entry `i` sits in row `i % rows_per_column` of column `i / rows_per_column`.
/// Placement follows the category index, so hiding "no data" leaves its slot empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendGrid {
    /// Left edge of the first swatch column
    pub origin_x: i32,
    /// Top edge of the first swatch row
    pub origin_y: i32,
    /// Vertical distance between rows
    pub row_pitch: i32,
    /// Horizontal distance between columns
    pub column_pitch: i32,
    /// Rows before wrapping to the next column
    pub rows_per_column: usize,
    /// Swatch width
    pub swatch_width: i32,
    /// Swatch height
    pub swatch_height: i32,
    /// Label offset from the swatch's top-left corner
    pub label_offset: (i32, i32),
}

impl Default for LegendGrid {
    fn default() -> Self {
        Self {
            origin_x: 950,
            origin_y: 350,
            row_pitch: 20,
            column_pitch: 150,
            rows_per_column: 10,
            swatch_width: 30,
            swatch_height: 20,
            label_offset: (35, 15),
        }
    }
}

impl LegendGrid {
    /// Top-left corner of the swatch for `index`.
    #[must_use]
    pub fn swatch_origin(&self, index: usize) -> (i32, i32) {
        let rows = self.rows_per_column.max(1);
        let column = i32::try_from(index / rows).unwrap_or(i32::MAX);
        let row = i32::try_from(index % rows).unwrap_or(i32::MAX);
        (
            self.origin_x + column * self.column_pitch,
            self.origin_y + row * self.row_pitch,
        )
    }
}

/// One legend row: swatch color and label sharing a category index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    /// Category index shared by color and label
    pub index: CategoryIndex,
    /// Swatch fill, `color_scheme[index]`
    pub color: String,
    /// Label text, `legend[index]`
    pub label: String,
    /// Swatch top-left corner
    pub swatch: (i32, i32),
    /// Swatch size
    pub size: (i32, i32),
    /// Label baseline position
    pub label_at: (i32, i32),
}

impl LegendEntry {
    /// Swatch outline as SVG path data.
    #[must_use]
    pub fn swatch_path(&self) -> String {
        let (x, y) = self.swatch;
        let (w, h) = self.size;
        format!("M {x} {y} h {w} v {h} h -{w} Z")
    }
}

/// Lays out legend entries for `exclude_no_data..color_scheme.len()`.
pub fn layout_legend(config: &MapConfiguration, grid: &LegendGrid) -> Vec<LegendEntry> {
    let colors = config.color_scheme().as_slice();
    let first = usize::from(config.exclude_no_data());

    colors
        .iter()
        .enumerate()
        .skip(first)
        .map(|(i, color)| {
            let (x, y) = grid.swatch_origin(i);
            let (dx, dy) = grid.label_offset;
            LegendEntry {
                index: CategoryIndex::new(u8::try_from(i).unwrap_or(u8::MAX)),
                color: color.clone(),
                label: config.legend().get(i).cloned().unwrap_or_default(),
                swatch: (x, y),
                size: (grid.swatch_width, grid.swatch_height),
                label_at: (x + dx, y + dy),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RegionSet;

    fn config() -> MapConfiguration {
        MapConfiguration::with_defaults(&RegionSet::embedded().unwrap()).unwrap()
    }

    #[test]
    fn test_entries_align_with_colors_and_labels() {
        let mut config = config();
        config.select_scheme("Blues", 5).unwrap();
        config.set_legend_label(2, "Some").unwrap();

        let entries = layout_legend(&config, &LegendGrid::default());

        assert_eq!(entries.len(), 6);
        for entry in &entries {
            let i = entry.index.get();
            assert_eq!(entry.color, config.color_scheme().as_slice()[i]);
            assert_eq!(entry.label, config.legend()[i]);
        }
        assert_eq!(entries[2].label, "Some");
    }

    #[test]
    fn test_exclude_no_data_drops_first_entry_only() {
        let mut config = config();
        config.set_exclude_no_data(true);

        let entries = layout_legend(&config, &LegendGrid::default());

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].index, CategoryIndex::new(1));
        // slot position still follows the index
        assert_eq!(entries[0].swatch, (950, 370));
    }

    #[test]
    fn test_grid_positions() {
        let entries = layout_legend(&config(), &LegendGrid::default());
        assert_eq!(entries[0].swatch, (950, 350));
        assert_eq!(entries[0].label_at, (985, 365));
        assert_eq!(entries[3].swatch, (950, 410));
        assert_eq!(entries[0].swatch_path(), "M 950 350 h 30 v 20 h -30 Z");
    }

    #[test]
    fn test_wraps_to_next_column() {
        let grid = LegendGrid {
            rows_per_column: 2,
            ..LegendGrid::default()
        };
        assert_eq!(grid.swatch_origin(1), (950, 370));
        assert_eq!(grid.swatch_origin(2), (1100, 350));
        assert_eq!(grid.swatch_origin(5), (1250, 370));
    }
}
