//! Data models for the map configuration and its static inputs.
//!
//! This module contains the palette table, the region dataset and the
//! user-editable configuration. Models are independent of rendering and I/O.

pub mod category_index;
pub mod color_scheme;
pub mod map_configuration;
pub mod palette;
pub mod region;

// Re-export all model types
pub use category_index::CategoryIndex;
pub use color_scheme::ColorScheme;
pub use map_configuration::{MapConfiguration, MapDefaults};
pub use palette::{PaletteTable, Scheme, SchemeKind};
pub use region::{Region, RegionSet};
