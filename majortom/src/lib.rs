//! MajorTOM - a global, near-equal-area grid of roughly square cells
//!
//! The grid tiles an area of interest into cells of a configured size in
//! meters, optionally with half-shifted overlap cells, and gives every cell a
//! stable identifier that can be resolved back to the cell.
//!
//! # Modules
//!
//! - [`grid`]: spacing model, tiling, counting and streaming
//! - [`id`]: geohash and grid-index identifiers, reverse lookup
//! - [`config`]: `~/.majortom/config.ini`
//! - [`logging`]: tracing subscriber setup
//!
//! ```
//! use geo_types::{coord, Rect};
//! use majortom::grid::Grid;
//!
//! let grid = Grid::new(320.0, false)?;
//! let aoi = Rect::new(coord! { x: 8.54, y: 47.37 }, coord! { x: 8.55, y: 47.38 });
//!
//! for cell in grid.tile(&aoi)? {
//!     let id = grid.cell_id(&cell)?;
//!     assert!(grid.cell_by_id(&id)?.is_exact());
//! }
//! # Ok::<(), majortom::grid::GridError>(())
//! ```

pub mod config;
pub mod grid;
pub mod id;
pub mod logging;

/// Version of the MajorTOM library and CLI.
///
/// Synchronized across the workspace from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_grid_module_exists() {
        use crate::grid::Grid;
        let grid = Grid::new(320.0, true);
        assert!(grid.is_ok());
    }
}
