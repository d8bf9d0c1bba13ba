//! Derived color array: "no data" sentinel followed by a palette ramp.

use super::palette::PaletteTable;
use super::CategoryIndex;
use crate::error::{MapError, Result};
use serde::Serialize;

/// Colors indexed by [`CategoryIndex`].
///
/// Index 0 holds the "no data" sentinel, indices 1..=n the palette ramp.
/// The length is always `categories + 1` and the sentinel never reappears
/// later in the array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColorScheme {
    colors: Vec<String>,
}

// never empty: palette-built schemes hold at least the sentinel and three colors
#[allow(clippy::len_without_is_empty)]
impl ColorScheme {
    /// Builds the scheme for `(scheme, categories)` from the palette table.
    ///
    /// The sentinel is always prepended to a fresh copy of the ramp, so
    /// building twice from the same arguments yields the same array.
    pub fn from_palette(table: &PaletteTable, scheme: &str, categories: usize) -> Result<Self> {
        let unknown = || MapError::UnknownScheme {
            scheme: scheme.to_string(),
            categories,
        };

        let entry = table.scheme(scheme).ok_or_else(unknown)?;
        let ramp = table.lookup(scheme, categories).ok_or_else(unknown)?;

        let mut colors = Vec::with_capacity(ramp.len() + 1);
        colors.push(entry.no_data_for(ramp));
        colors.extend(ramp.iter().cloned());

        Ok(Self { colors })
    }

    /// Number of colors, including the sentinel.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// The "no data" sentinel color.
    #[must_use]
    pub fn no_data(&self) -> &str {
        &self.colors[0]
    }

    /// Color for a region value, clamped to the last slot.
    #[must_use]
    pub fn fill_for(&self, value: CategoryIndex) -> &str {
        &self.colors[value.clamped(self.colors.len())]
    }

    /// All colors in index order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.colors
    }
}
