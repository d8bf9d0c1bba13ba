//! Palette table mapping a named scheme and category count to a color ramp.
//!
//! The embedded table carries the ColorBrewer ramps offered by the map maker,
//! each available for 3 to 9 categories.

use crate::error::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Smallest category count offered by the palette table.
pub const MIN_CATEGORIES: usize = 3;

/// Largest category count offered by the palette table.
pub const MAX_CATEGORIES: usize = 9;

/// Sentinel used when the scheme does not name one.
pub const DEFAULT_NO_DATA: &str = "#aaaaaa";

/// Sentinel candidates tried, in order, when the preferred one collides with the ramp.
const NO_DATA_FALLBACKS: [&str; 3] = [DEFAULT_NO_DATA, "#ffffff", "#000000"];

/// How a scheme progresses across its categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeKind {
    /// Light to dark, for ordered data
    Sequential,
    /// Two hues meeting at a pale midpoint
    Diverging,
    /// Distinct hues, for nominal data
    Qualitative,
}

impl fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sequential => "sequential",
            Self::Diverging => "diverging",
            Self::Qualitative => "qualitative",
        };
        f.pad(name)
    }
}

/// A named scheme with one ramp per supported category count.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Scheme {
    /// Scheme name used as lookup key (e.g., "Reds").
    pub name: String,
    /// Progression kind.
    pub kind: SchemeKind,
    /// Preferred "no data" sentinel color for this scheme.
    pub no_data: String,
    /// Ramps keyed by category count.
    pub ramps: BTreeMap<usize, Vec<String>>,
}

impl Scheme {
    /// Category counts this scheme has ramps for, ascending.
    pub fn category_counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.ramps.keys().copied()
    }

    /// Sentinel for a given ramp.
    ///
    /// Uses the scheme's preferred color unless the ramp already contains it,
    /// then the first fallback the ramp does not contain.
    #[must_use]
    pub fn no_data_for(&self, ramp: &[String]) -> String {
        let contains = |color: &str| ramp.iter().any(|c| c.eq_ignore_ascii_case(color));

        if !contains(self.no_data.as_str()) {
            return self.no_data.clone();
        }

        NO_DATA_FALLBACKS
            .iter()
            .find(|&&candidate| !contains(candidate))
            .map_or_else(|| self.no_data.clone(), |c| (*c).to_string())
    }
}

/// The static palette lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaletteTable {
    schemes: Vec<Scheme>,
}

impl PaletteTable {
    /// Loads the palette table from embedded JSON data.
    ///
    /// # Errors
    /// Returns an error if the JSON data cannot be parsed or a ramp length
    /// does not match its category count.
    pub fn load() -> Result<Self> {
        let json_data = include_str!("../data/palettes.json");
        Self::from_json(json_data)
    }

    /// Parses a palette table from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let table: Self =
            serde_json::from_str(json).map_err(|e| MapError::PaletteData(e.to_string()))?;

        for scheme in &table.schemes {
            for (count, ramp) in &scheme.ramps {
                if ramp.len() != *count {
                    return Err(MapError::PaletteData(format!(
                        "scheme '{}' ramp for {} categories has {} colors",
                        scheme.name,
                        count,
                        ramp.len()
                    )));
                }
            }
        }

        Ok(table)
    }

    /// Looks up the ramp for `(scheme, categories)`.
    #[must_use]
    pub fn lookup(&self, scheme: &str, categories: usize) -> Option<&[String]> {
        self.scheme(scheme)?
            .ramps
            .get(&categories)
            .map(Vec::as_slice)
    }

    /// Finds a scheme by name.
    #[must_use]
    pub fn scheme(&self, name: &str) -> Option<&Scheme> {
        self.schemes.iter().find(|s| s.name == name)
    }

    /// All schemes in table order.
    #[must_use]
    pub fn schemes(&self) -> &[Scheme] {
        &self.schemes
    }

    /// Checks that `(scheme, categories)` exists in the table.
    pub fn ensure(&self, scheme: &str, categories: usize) -> Result<()> {
        self.lookup(scheme, categories)
            .map(|_| ())
            .ok_or_else(|| MapError::UnknownScheme {
                scheme: scheme.to_string(),
                categories,
            })
    }
}
