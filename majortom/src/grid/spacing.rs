//! Row and column spacing derived from a target cell size.
//!
//! All rows share the same angular height. Columns are recomputed per row
//! from the circumference of the parallel at the row's lower edge, so cells
//! narrow in longitude toward the poles while staying close to the target
//! width in meters.

use std::f64::consts::PI;

use super::error::GridError;

/// Sphere radius used for all spacing calculations (WGS-84 equatorial radius).
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Degrees of latitude from pole to pole.
pub const LAT_DEGREES: f64 = 180.0;

/// Degrees of longitude around a parallel.
pub const LON_DEGREES: f64 = 360.0;

/// Spacing model for a grid with a fixed target cell size.
///
/// Nothing is cached: every value is cheap to recompute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    cell_size: f64,
}

impl Spacing {
    /// Create a spacing model for cells of roughly `cell_size` meters.
    pub fn new(cell_size: f64) -> Result<Self, GridError> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(GridError::InvalidConfiguration { cell_size });
        }
        Ok(Self { cell_size })
    }

    /// Target cell size in meters.
    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of latitude rows between the poles. Always at least 1.
    #[inline]
    pub fn row_count(&self) -> u64 {
        ((PI * EARTH_RADIUS_M / self.cell_size).ceil() as u64).max(1)
    }

    /// Angular height of every row, in degrees.
    #[inline]
    pub fn lat_spacing(&self) -> f64 {
        LAT_DEGREES / self.row_count() as f64
    }

    /// Latitude of the lower edge of `row`.
    ///
    /// Rows run from the south pole (row 0 at -90°) northward;
    /// `row_latitude(row_count())` is the north pole.
    #[inline]
    pub fn row_latitude(&self, row: u64) -> f64 {
        -90.0 + row as f64 * self.lat_spacing()
    }

    /// Number of columns in a row whose lower edge is at `lat` degrees.
    ///
    /// Latitudes are clamped to [-90, 90]. At the poles the parallel has no
    /// length, so the count is clamped to a single column.
    pub fn column_count(&self, lat: f64) -> u64 {
        let lat = lat.clamp(-90.0, 90.0);
        let circumference = 2.0 * PI * EARTH_RADIUS_M * lat.to_radians().cos();
        let columns = (circumference / self.cell_size).ceil();
        if columns.is_finite() && columns >= 1.0 {
            columns as u64
        } else {
            1
        }
    }

    /// Checked variant of [`column_count`](Self::column_count) that rejects
    /// latitudes which are not finite or lie outside [-90, 90].
    pub fn try_column_count(&self, lat: f64) -> Result<u64, GridError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(GridError::DegenerateLatitude(lat));
        }
        Ok(self.column_count(lat))
    }

    /// Angular width of the columns in a row whose lower edge is at `lat`.
    #[inline]
    pub fn lon_spacing(&self, lat: f64) -> f64 {
        LON_DEGREES / self.column_count(lat) as f64
    }
}
