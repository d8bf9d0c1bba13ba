//! Service layer for business logic.
//!
//! This module contains services that coordinate the configuration store,
//! the renderer and file I/O on behalf of a host.

pub mod map_editor;
pub mod map_files;

// Re-export commonly used types
pub use map_editor::{ExportArtifact, MapAction, MapEditor};
pub use map_files::MapFileService;
