//! Global MajorTOM grid.
//!
//! The sphere is cut into latitude rows of equal angular height. Each row is
//! cut into columns whose count follows the circumference of the row's lower
//! parallel, so every cell is roughly `cell_size` meters on a side.
//!
//! With overlap enabled, every (row, column) position also yields an
//! east-shifted and a south-shifted cell, offset by half a spacing step. The
//! grid is then deliberately over-complete: a feature straddling a primary
//! cell boundary still lies inside some emitted cell.
//!
//! # Usage
//!
//! ```
//! use geo_types::{coord, Rect};
//! use majortom::grid::Grid;
//!
//! let grid = Grid::new(320.0, true)?;
//! let aoi = Rect::new(
//!     coord! { x: -76.3353, y: 39.5432 },
//!     coord! { x: -76.3306, y: 39.5477 },
//! );
//!
//! let cells = grid.tile(&aoi)?;
//! assert!(!cells.is_empty());
//! # Ok::<(), majortom::grid::GridError>(())
//! ```
//!
//! Cells are kept when their bounding box intersects the AOI's bounding box.
//! This over-includes; callers needing exact coverage must post-filter with
//! a real polygon intersection.

mod aoi;
mod cell;
mod error;
mod spacing;
mod stream;
mod tiling;


use std::ops::RangeInclusive;

use geo_types::{coord, Rect};

pub use aoi::Aoi;
pub use cell::{CellKind, GridCell};
pub use error::GridError;
pub use spacing::{Spacing, EARTH_RADIUS_M, LAT_DEGREES, LON_DEGREES};
pub use stream::{StreamOptions, StreamOutcome, TileStream, DEFAULT_STREAM_BUFFER};
pub use tiling::CellIter;

use crate::id::IdScheme;

/// Grid configuration. Immutable once built and cheap to copy, so one value
/// can serve any number of concurrent queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    spacing: Spacing,
    overlap: bool,
    scheme: IdScheme,
}

impl Grid {
    /// Create a grid with cells of roughly `cell_size` meters.
    ///
    /// Fails with [`GridError::InvalidConfiguration`] unless `cell_size` is
    /// finite and positive.
    pub fn new(cell_size: f64, overlap: bool) -> Result<Self, GridError> {
        Ok(Self {
            spacing: Spacing::new(cell_size)?,
            overlap,
            scheme: IdScheme::default(),
        })
    }

    /// Use `scheme` for identifiers produced by [`cell_id`](Self::cell_id).
    pub fn with_scheme(mut self, scheme: IdScheme) -> Self {
        self.scheme = scheme;
        self
    }

    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.spacing.cell_size()
    }

    #[inline]
    pub fn overlap(&self) -> bool {
        self.overlap
    }

    #[inline]
    pub fn scheme(&self) -> IdScheme {
        self.scheme
    }

    #[inline]
    pub fn spacing(&self) -> &Spacing {
        &self.spacing
    }

    /// Number of latitude rows.
    #[inline]
    pub fn row_count(&self) -> u64 {
        self.spacing.row_count()
    }

    /// Angular height of every row, in degrees.
    #[inline]
    pub fn lat_spacing(&self) -> f64 {
        self.spacing.lat_spacing()
    }

    /// Cell kinds emitted per grid position.
    pub(crate) fn kinds(&self) -> &'static [CellKind] {
        const PRIMARY_ONLY: [CellKind; 1] = [CellKind::Primary];
        if self.overlap {
            &CellKind::ALL
        } else {
            &PRIMARY_ONLY
        }
    }

    /// Geometry shared by every cell of `row`.
    pub(crate) fn row_geometry(&self, row: u64) -> RowGeometry {
        let lat = self.spacing.row_latitude(row);
        RowGeometry {
            row,
            lat,
            lat_spacing: self.spacing.lat_spacing(),
            lon_spacing: self.spacing.lon_spacing(lat),
            columns: self.spacing.column_count(lat),
        }
    }

    /// Rows that may hold cells intersecting `bounds`.
    pub(crate) fn row_band(&self, bounds: &Rect<f64>) -> RangeInclusive<u64> {
        padded_band(
            bounds.min().y + 90.0,
            bounds.max().y + 90.0,
            self.spacing.lat_spacing(),
            self.row_count() - 1,
        )
    }

    /// The cell at a grid position, if this grid emits such a cell.
    pub fn cell_at(&self, row: u64, col: u64, kind: CellKind) -> Option<GridCell> {
        if row >= self.row_count() || !self.kinds().contains(&kind) {
            return None;
        }
        let geometry = self.row_geometry(row);
        if col >= geometry.columns {
            return None;
        }
        Some(geometry.cell(col, kind))
    }
}

/// Per-row constants used to build cells.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RowGeometry {
    pub(crate) row: u64,
    pub(crate) lat: f64,
    pub(crate) lat_spacing: f64,
    pub(crate) lon_spacing: f64,
    pub(crate) columns: u64,
}

impl RowGeometry {
    /// Bounding box of the cell of `kind` anchored at column `col`.
    pub(crate) fn cell_rect(&self, col: u64, kind: CellKind) -> Rect<f64> {
        let lon = -180.0 + col as f64 * self.lon_spacing;
        let (west, south) = match kind {
            CellKind::Primary => (lon, self.lat),
            CellKind::EastShifted => (lon + self.lon_spacing / 2.0, self.lat),
            CellKind::SouthShifted => (lon, self.lat - self.lat_spacing / 2.0),
        };
        Rect::new(
            coord! { x: west, y: south },
            coord! { x: west + self.lon_spacing, y: south + self.lat_spacing },
        )
    }

    pub(crate) fn cell(&self, col: u64, kind: CellKind) -> GridCell {
        GridCell::from_rect(self.row, col, kind, self.cell_rect(col, kind))
    }

    /// Columns of this row that may hold cells intersecting `bounds`.
    pub(crate) fn column_band(&self, bounds: &Rect<f64>) -> RangeInclusive<u64> {
        padded_band(
            bounds.min().x + 180.0,
            bounds.max().x + 180.0,
            self.lon_spacing,
            self.columns - 1,
        )
    }
}

/// Index band covering `[lo, hi]` (offsets from the grid origin), padded by
/// one step on each side and clamped to `0..=last`.
fn padded_band(lo: f64, hi: f64, step: f64, last: u64) -> RangeInclusive<u64> {
    let last_f = last as f64;
    let start = ((lo / step).floor() - 1.0).clamp(0.0, last_f) as u64;
    let end = ((hi / step).floor() + 1.0).clamp(0.0, last_f) as u64;
    start..=end.max(start)
}
