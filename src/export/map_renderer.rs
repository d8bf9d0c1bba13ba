//! Map renderer: configuration snapshot plus region dataset to an SVG document.
//!
//! [`render`] is pure. It builds a [`MapDocument`] describing every element,
//! and [`MapDocument::to_svg`] serializes it. The same inputs always produce
//! byte-identical output.

use super::legend::{layout_legend, LegendEntry, LegendGrid};
use crate::models::{CategoryIndex, MapConfiguration, RegionSet};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write as _;

/// Fixed id of the root `<svg>` element.
pub const DOCUMENT_ID: &str = "us-map";

/// Document viewBox as `(min_x, min_y, width, height)`.
pub const VIEW_BOX: (i32, i32, i32, i32) = (50, -100, 1200, 700);

/// Regions too small to hold an inline label; listed beside the map.
pub const OVERFLOW_LABELS: [&str; 8] = ["NH", "VT", "MA", "RI", "CT", "NJ", "DE", "DC"];

const STROKE_WIDTH: &str = ".97063";
const TEXT_COLOR: &str = "#000";
const LEGEND_FRAME: &str = "M 930 310 h 300 v 250 h -300 Z";
const OVERFLOW_ORIGIN: (i32, i32) = (1035, 115);
const OVERFLOW_PITCH: i32 = 20;
const LABEL_SIZE: u32 = 12;

/// Horizontal alignment of a text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Text starts at `x`
    Start,
    /// Text is centred on `x`
    Middle,
}

/// A positioned line of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    /// Element id, if addressable
    pub id: Option<&'static str>,
    /// Baseline position
    pub at: (i32, i32),
    /// Font size in px
    pub size: u32,
    /// Alignment
    pub anchor: Anchor,
    /// Text content
    pub text: String,
}

/// A clickable region shape.
///
/// A host routes a click on the shape (identified by `id`) to
/// [`MapConfiguration::cycle_region_value`] and re-renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionShape {
    /// Region id, emitted as `data-id`
    pub id: String,
    /// Region name, emitted as `data-name`
    pub name: String,
    /// SVG path data
    pub path: String,
    /// Current value as stored (unclamped)
    pub value: CategoryIndex,
    /// Fill color, `color_scheme[min(value, len - 1)]`
    pub fill: String,
}

/// The rendered map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapDocument {
    /// Root element id
    pub id: &'static str,
    /// Document background color
    pub background_color: String,
    /// Font family for every text element
    pub font: String,
    /// Map title
    pub title: TextBlock,
    /// Legend heading
    pub legend_title: TextBlock,
    /// Legend entries, index-aligned
    pub legend: Vec<LegendEntry>,
    /// Labels for regions too small to label inline
    pub overflow_labels: Vec<TextBlock>,
    /// Region shapes in dataset order
    pub regions: Vec<RegionShape>,
}

/// Renders the map for a configuration snapshot.
pub fn render(config: &MapConfiguration, regions: &RegionSet) -> MapDocument {
    render_with_grid(config, regions, &LegendGrid::default())
}

/// Renders the map with a custom legend grid.
pub fn render_with_grid(
    config: &MapConfiguration,
    regions: &RegionSet,
    grid: &LegendGrid,
) -> MapDocument {
    let scheme = config.color_scheme();

    let shapes = regions
        .iter()
        .map(|region| {
            let value = config.value(&region.id).unwrap_or_default();
            RegionShape {
                id: region.id.clone(),
                name: region.name.clone(),
                path: region.path.clone(),
                value,
                fill: scheme.fill_for(value).to_string(),
            }
        })
        .collect();

    let (min_x, _, width, _) = VIEW_BOX;

    let overflow_labels = OVERFLOW_LABELS
        .iter()
        .zip(0..)
        .map(|(code, row)| TextBlock {
            id: None,
            at: (OVERFLOW_ORIGIN.0, OVERFLOW_ORIGIN.1 + row * OVERFLOW_PITCH),
            size: LABEL_SIZE,
            anchor: Anchor::Start,
            text: (*code).to_string(),
        })
        .collect();

    MapDocument {
        id: DOCUMENT_ID,
        background_color: config.background_color().to_string(),
        font: config.font().to_string(),
        title: TextBlock {
            id: Some("map-title"),
            at: (min_x + width / 2, -10),
            size: 50,
            anchor: Anchor::Middle,
            text: config.title().to_string(),
        },
        legend_title: TextBlock {
            id: Some("legend-title"),
            at: (grid.origin_x, grid.origin_y - 10),
            size: 25,
            anchor: Anchor::Start,
            text: config.legend_title().to_string(),
        },
        legend: layout_legend(config, grid),
        overflow_labels,
        regions: shapes,
    }
}

impl MapDocument {
    /// Finds a region shape by id.
    #[must_use]
    pub fn region(&self, id: &str) -> Option<&RegionShape> {
        self.regions.iter().find(|r| r.id == id)
    }

    /// Serializes the document as a standalone SVG string.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        let (min_x, min_y, width, height) = VIEW_BOX;
        let background = encode_double_quoted_attribute(&self.background_color);

        let _ = writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" id="{}" version="1.1" viewBox="{} {} {} {}" width="{}" height="{}" fill="none" stroke="{}" stroke-linejoin="round" style="background-color:{}">"#,
            self.id, min_x, min_y, width, height, width, height, TEXT_COLOR, background
        );
        let _ = writeln!(
            out,
            r#"<defs><style type="text/css">path {{ fill-rule: evenodd; }}</style></defs>"#
        );
        let _ = writeln!(
            out,
            r#"<rect id="background" x="{min_x}" y="{min_y}" width="{width}" height="{height}" fill="{background}" stroke="none"/>"#
        );

        self.write_text(&mut out, &self.title);
        self.write_text(&mut out, &self.legend_title);
        let _ = writeln!(
            out,
            r#"<path id="legend-frame" d="{LEGEND_FRAME}" stroke-width="{STROKE_WIDTH}"/>"#
        );

        out.push_str("<g id=\"overflow-labels\">\n");
        for label in &self.overflow_labels {
            self.write_text(&mut out, label);
        }
        out.push_str("</g>\n");

        out.push_str("<g id=\"regions\">\n");
        for region in &self.regions {
            let _ = writeln!(
                out,
                r#"<path data-id="{}" data-name="{}" d="{}" fill="{}" stroke-width="{}"/>"#,
                encode_double_quoted_attribute(&region.id),
                encode_double_quoted_attribute(&region.name),
                encode_double_quoted_attribute(&region.path),
                encode_double_quoted_attribute(&region.fill),
                STROKE_WIDTH
            );
        }
        out.push_str("</g>\n");

        out.push_str("<g id=\"legend\">\n");
        for entry in &self.legend {
            let _ = writeln!(
                out,
                r#"<path data-id="L{}" d="{}" fill="{}" stroke-width="{}"/>"#,
                entry.index,
                entry.swatch_path(),
                encode_double_quoted_attribute(&entry.color),
                STROKE_WIDTH
            );
            self.write_text(
                &mut out,
                &TextBlock {
                    id: None,
                    at: entry.label_at,
                    size: LABEL_SIZE,
                    anchor: Anchor::Start,
                    text: entry.label.clone(),
                },
            );
        }
        out.push_str("</g>\n");

        out.push_str("</svg>\n");
        out
    }

    fn write_text(&self, out: &mut String, block: &TextBlock) {
        let id = block
            .id
            .map(|id| format!(r#" id="{id}""#))
            .unwrap_or_default();
        let anchor = match block.anchor {
            Anchor::Start => "",
            Anchor::Middle => r#" text-anchor="middle""#,
        };
        let _ = writeln!(
            out,
            r#"<text{} x="{}" y="{}"{} font-family="{}" font-size="{}" fill="{}" stroke="none">{}</text>"#,
            id,
            block.at.0,
            block.at.1,
            anchor,
            encode_double_quoted_attribute(&self.font),
            block.size,
            TEXT_COLOR,
            encode_text(&block.text)
        );
    }
}
