//! CLI command handlers for US Map Maker.
//!
//! This module provides headless, scriptable access to map creation, editing
//! and rendering for automation and batch workflows.

pub mod common;
pub mod config;
pub mod cycle;
pub mod new;
pub mod render;
pub mod schemes;
pub mod set;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use cycle::CycleArgs;
pub use new::NewArgs;
pub use render::RenderArgs;
pub use schemes::SchemesArgs;
pub use set::SetArgs;
