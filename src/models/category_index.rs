//! Category index shared by color schemes, legends and region values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Index of a category bucket.
///
/// Index 0 is the reserved "no data" slot; 1..=n are the palette categories.
/// The same index addresses the color scheme, the legend and region values.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CategoryIndex(u8);

impl CategoryIndex {
    /// The "no data" slot.
    pub const NO_DATA: Self = Self(0);

    /// Creates an index from a raw value.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Returns the index as `usize` for slice access.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0 as usize
    }

    /// True for the reserved "no data" slot.
    #[must_use]
    pub const fn is_no_data(self) -> bool {
        self.0 == 0
    }

    /// Next index in a scheme of `len` colors, wrapping to 0 at the top.
    #[must_use]
    pub fn cycled(self, len: usize) -> Self {
        let next = self.get() + 1;
        if next >= len {
            Self::NO_DATA
        } else {
            // next < len <= u8::MAX + 1 in practice; saturate otherwise
            Self(u8::try_from(next).unwrap_or(u8::MAX))
        }
    }

    /// Clamps the index to the last slot of a scheme with `len` colors.
    #[must_use]
    pub fn clamped(self, len: usize) -> usize {
        self.get().min(len.saturating_sub(1))
    }
}

impl From<u8> for CategoryIndex {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl fmt::Display for CategoryIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CategoryIndex {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u8>().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycled_wraps_at_top() {
        let len = 4;
        let mut index = CategoryIndex::NO_DATA;
        let mut seen = Vec::new();
        for _ in 0..len {
            index = index.cycled(len);
            seen.push(index.get());
        }
        assert_eq!(seen, vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_cycled_out_of_range_goes_to_zero() {
        // Value left over from a larger scheme
        assert_eq!(CategoryIndex::new(7).cycled(4), CategoryIndex::NO_DATA);
    }

    #[test]
    fn test_clamped() {
        assert_eq!(CategoryIndex::new(7).clamped(4), 3);
        assert_eq!(CategoryIndex::new(2).clamped(4), 2);
        assert_eq!(CategoryIndex::new(2).clamped(0), 0);
    }

    #[test]
    fn test_parse() {
        assert_eq!("3".parse::<CategoryIndex>().unwrap(), CategoryIndex::new(3));
        assert_eq!(" 0 ".parse::<CategoryIndex>().unwrap(), CategoryIndex::NO_DATA);
        assert!("-1".parse::<CategoryIndex>().is_err());
        assert!("two".parse::<CategoryIndex>().is_err());
    }
}
