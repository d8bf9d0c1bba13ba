//! Line-oriented `key,value` codec for map configurations.
//!
//! Each line is split on the first comma only; anything after a second comma
//! stays part of the value. Known keys set scalar fields, `legend<N>` sets a
//! legend label, and every other key is a region id.
//!
//! Text values are taken verbatim, surrounding whitespace included; numbers,
//! flags and the scheme name are trimmed before parsing. The format has no
//! escaping, so the configuration keeps line breaks out of its text fields.
//!
//! Import is fail-soft: a line that cannot be applied is skipped and reported
//! as a [`MalformedCsvLine`] in the returned [`ImportReport`].

use crate::models::{CategoryIndex, MapConfiguration};
use std::fmt::{self, Write as _};
use tracing::{debug, warn};

/// Keys for scalar fields, in export order.
pub mod keys {
    /// Map title
    pub const TITLE: &str = "title";
    /// Palette scheme name
    pub const COLOR: &str = "color";
    /// Category count
    pub const CATEGORIES: &str = "categories";
    /// 0 or 1
    pub const EXCLUDE_NO_DATA: &str = "excludeNoData";
    /// Legend heading
    pub const LEGEND_TITLE: &str = "legendTitle";
    /// Font family
    pub const FONT_FAMILY: &str = "fontFamily";
    /// Accepted on import as an alias of [`FONT_FAMILY`]
    pub const FONT: &str = "font";
    /// Background color
    pub const BACKGROUND_COLOR: &str = "backgroundColor";
    /// Prefix of legend label keys (`legend0`, `legend1`, ...)
    pub const LEGEND_PREFIX: &str = "legend";
}

/// A line that was skipped during import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedCsvLine {
    /// 1-based line number
    pub line_number: usize,
    /// The raw line text
    pub line: String,
    /// Why the line was skipped
    pub reason: String,
}

impl fmt::Display for MalformedCsvLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: {} ({})",
            self.line_number, self.reason, self.line
        )
    }
}

/// Outcome of an import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Number of lines applied
    pub applied: usize,
    /// Lines that were skipped, in input order
    pub warnings: Vec<MalformedCsvLine>,
}

impl ImportReport {
    /// True if every non-blank line was applied.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// One parsed line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Title(String),
    Color(String),
    Categories(usize),
    ExcludeNoData(bool),
    LegendTitle(String),
    Font(String),
    BackgroundColor(String),
    LegendLabel(usize, String),
    Region(String, CategoryIndex),
}

/// Splits a line on its first comma. Only the key is trimmed.
fn split_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(',')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value))
}

fn parse_flag(value: &str) -> Result<bool, String> {
    match value {
        "0" | "false" => Ok(false),
        "1" | "true" => Ok(true),
        other => Err(format!("expected 0 or 1, got '{other}'")),
    }
}

/// Parses one non-blank line into an entry.
fn parse_line(line: &str) -> Result<Entry, String> {
    let (key, value) = split_line(line).ok_or_else(|| "expected key,value".to_string())?;
    let trimmed = value.trim();

    let entry = match key {
        keys::TITLE => Entry::Title(value.to_string()),
        keys::COLOR => Entry::Color(trimmed.to_string()),
        keys::CATEGORIES => Entry::Categories(
            trimmed
                .parse()
                .map_err(|_| format!("categories must be a number, got '{value}'"))?,
        ),
        keys::EXCLUDE_NO_DATA => Entry::ExcludeNoData(parse_flag(trimmed)?),
        keys::LEGEND_TITLE => Entry::LegendTitle(value.to_string()),
        keys::FONT_FAMILY | keys::FONT => Entry::Font(value.to_string()),
        keys::BACKGROUND_COLOR => Entry::BackgroundColor(value.to_string()),
        _ => match legend_index(key) {
            Some(index) => Entry::LegendLabel(index, value.to_string()),
            None => Entry::Region(
                key.to_string(),
                trimmed
                    .parse()
                    .map_err(|_| format!("value for '{key}' must be 0-255, got '{value}'"))?,
            ),
        },
    };

    Ok(entry)
}

/// `legend<N>` with N all digits.
fn legend_index(key: &str) -> Option<usize> {
    let digits = key.strip_prefix(keys::LEGEND_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Replaces `config` from `key,value` text.
///
/// Work happens on a staged copy: region values are applied as lines are
/// read, the scheme is re-selected once with the imported color and category
/// count, then legend labels and the remaining scalars are set and the copy
/// is committed. Lines that cannot be applied become warnings; the import never
/// aborts. If the imported scheme is unknown the prior scheme is kept.
pub fn import(config: &mut MapConfiguration, text: &str) -> ImportReport {
    let mut staged = config.clone();
    let mut report = ImportReport::default();

    let mut color = staged.scheme_name().to_string();
    let mut categories = staged.categories();
    let mut scalars = Vec::new();
    let mut labels = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let skip = |reason: String| MalformedCsvLine {
            line_number: index + 1,
            line: line.to_string(),
            reason,
        };

        match parse_line(line) {
            Ok(Entry::Color(name)) => {
                color = name;
                report.applied += 1;
            }
            Ok(Entry::Categories(count)) => {
                categories = count;
                report.applied += 1;
            }
            Ok(Entry::Region(id, value)) => match staged.set_region_value(&id, value) {
                Ok(()) => report.applied += 1,
                Err(e) => report.warnings.push(skip(e.to_string())),
            },
            Ok(Entry::LegendLabel(slot, label)) => labels.push((index + 1, line, slot, label)),
            Ok(entry) => {
                scalars.push(entry);
                report.applied += 1;
            }
            Err(reason) => report.warnings.push(skip(reason)),
        }
    }

    if let Err(e) = staged.select_scheme(&color, categories) {
        warn!(error = %e, "keeping previous color scheme");
        report.warnings.push(MalformedCsvLine {
            line_number: 0,
            line: format!("{color},{categories}"),
            reason: e.to_string(),
        });
    }

    for (line_number, line, slot, label) in labels {
        match staged.restore_legend_label(slot, label) {
            Ok(()) => report.applied += 1,
            Err(e) => report.warnings.push(MalformedCsvLine {
                line_number,
                line: line.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    for entry in scalars {
        match entry {
            Entry::Title(v) => staged.set_title(v),
            Entry::ExcludeNoData(v) => staged.set_exclude_no_data(v),
            Entry::LegendTitle(v) => staged.set_legend_title(v),
            Entry::Font(v) => staged.set_font(v),
            Entry::BackgroundColor(v) => staged.set_background_color(v),
            Entry::Color(_)
            | Entry::Categories(_)
            | Entry::Region(..)
            | Entry::LegendLabel(..) => {}
        }
    }

    for warning in &report.warnings {
        warn!("skipped CSV {}", warning);
    }
    debug!(
        applied = report.applied,
        skipped = report.warnings.len(),
        "imported map configuration"
    );

    *config = staged;
    report
}

/// Serializes `config` as `key,value` lines.
///
/// Scalars come first in a fixed order, then the active legend labels
/// (`legend0` through `legend<categories>`), then one line per region in id order.
pub fn export(config: &MapConfiguration) -> String {
    let mut out = String::new();

    let scalars = [
        (keys::TITLE, config.title().to_string()),
        (keys::COLOR, config.scheme_name().to_string()),
        (keys::CATEGORIES, config.categories().to_string()),
        (
            keys::EXCLUDE_NO_DATA,
            u8::from(config.exclude_no_data()).to_string(),
        ),
        (keys::LEGEND_TITLE, config.legend_title().to_string()),
        (keys::FONT_FAMILY, config.font().to_string()),
        (keys::BACKGROUND_COLOR, config.background_color().to_string()),
    ];
    for (key, value) in scalars {
        let _ = writeln!(out, "{key},{value}");
    }

    for (index, label) in config
        .legend()
        .iter()
        .take(config.color_scheme().len())
        .enumerate()
    {
        let _ = writeln!(out, "{}{},{}", keys::LEGEND_PREFIX, index, label);
    }

    for (id, value) in config.values() {
        let _ = writeln!(out, "{id},{value}");
    }

    out
}
