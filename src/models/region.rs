//! Static region dataset: state id, display name and SVG path geometry.

use crate::error::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// A single map region (state or territory).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Stable identifier, typically the postal abbreviation (e.g., "CA")
    pub id: String,
    /// Display name (e.g., "California")
    pub name: String,
    /// SVG path data, treated as opaque
    pub path: String,
}

/// Ordered, immutable set of regions loaded once at startup.
///
/// # Validation
///
/// - At least one region
/// - Region ids are non-empty and unique
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSet {
    regions: Vec<Region>,
}

impl RegionSet {
    /// Loads the built-in U.S. state tile grid.
    pub fn embedded() -> Result<Self> {
        Self::from_json(include_str!("../data/us_states.json"))
    }

    /// Parses a region dataset from JSON text (`{"regions": [...]}`).
    pub fn from_json(json: &str) -> Result<Self> {
        let set: Self =
            serde_json::from_str(json).map_err(|e| MapError::RegionData(e.to_string()))?;
        set.validate()?;
        Ok(set)
    }

    /// Loads a region dataset from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| MapError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.regions.is_empty() {
            return Err(MapError::RegionData("dataset has no regions".to_string()));
        }

        let mut seen = HashSet::new();
        for region in &self.regions {
            if region.id.trim().is_empty() {
                return Err(MapError::RegionData("region id cannot be empty".to_string()));
            }
            if !seen.insert(region.id.as_str()) {
                return Err(MapError::RegionData(format!(
                    "duplicate region id '{}'",
                    region.id
                )));
            }
        }

        Ok(())
    }

    /// Iterates regions in dataset order.
    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    /// Number of regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// True if the set holds no regions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Finds a region by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    /// True if the id belongs to a region in this set.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
}

impl<'a> IntoIterator for &'a RegionSet {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}
