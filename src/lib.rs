//! US Map Maker Library
//!
//! This library provides the core of a choropleth map maker for U.S. states:
//! a validated map configuration, an SVG renderer with an index-aligned legend,
//! PNG export and a line-oriented CSV import/export format.

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
