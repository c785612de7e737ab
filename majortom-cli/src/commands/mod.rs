//! CLI command implementations.
//!
//! - [`tile`] - cells covering a bounding box, as GeoJSON
//! - [`count`] - number of cells covering a bounding box
//! - [`lookup`] - identifier to cell
//! - [`config`] - configuration file management

pub mod common;
pub mod config;
pub mod count;
pub mod lookup;
pub mod tile;
