//! Identifier → cell resolution.

use geo_types::{coord, Coord, Rect};
use tracing::debug;

use super::{CellId, IdScheme};
use crate::grid::{Grid, GridCell, GridError};

/// Result of resolving an identifier.
///
/// Geohash decoding loses precision, so a geohash that is not exactly some
/// cell's identifier resolves to the nearest candidate instead. The two
/// cases are kept apart so callers can tell them apart.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// A cell whose identifier equals the one queried.
    Exact(GridCell),
    /// The cell whose centroid lies closest to the decoded location.
    ///
    /// `distance` is the Euclidean distance in degrees (lon/lat space)
    /// between that centroid and the centre of the decoded geohash box.
    Approximate { cell: GridCell, distance: f64 },
}

impl Resolution {
    pub fn cell(&self) -> &GridCell {
        match self {
            Resolution::Exact(cell) | Resolution::Approximate { cell, .. } => cell,
        }
    }

    pub fn into_cell(self) -> GridCell {
        match self {
            Resolution::Exact(cell) | Resolution::Approximate { cell, .. } => cell,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Resolution::Exact(_))
    }
}

impl Grid {
    /// Resolve an identifier produced by [`Grid::cell_id`] (either scheme)
    /// or a plain geohash back to a cell of this grid.
    ///
    /// Grid index identifiers resolve exactly or not at all. Geohash
    /// identifiers are decoded to a box and only the cells around its centre
    /// are searched, so the work stays bounded however short the geohash.
    /// A cell with the same identifier wins; otherwise the cell whose
    /// centroid lies nearest the centre is returned as
    /// [`Resolution::Approximate`].
    pub fn cell_by_id(&self, id: &str) -> Result<Resolution, GridError> {
        match CellId::parse(id)? {
            CellId::Index { row, col, kind } => self
                .cell_at(row, col, kind)
                .map(Resolution::Exact)
                .ok_or_else(|| GridError::NotFound(id.to_string())),
            CellId::Geohash(hash) => self.resolve_geohash(id, hash),
        }
    }

    fn resolve_geohash(&self, id: &str, hash: String) -> Result<Resolution, GridError> {
        let region = geohash::decode_bbox(&hash).map_err(|e| GridError::IdentifierDecode {
            id: id.to_string(),
            reason: e.to_string(),
        })?;
        let wanted = CellId::Geohash(hash).to_string();
        let center = region.center();
        let not_found = || GridError::NotFound(id.to_string());

        // Cells containing the centre bound how far the nearest centroid can be.
        let reach = match self.nearest_in(&Rect::new(center, center), &wanted, center)? {
            Some(Resolution::Approximate { distance, .. }) => distance,
            Some(exact) => return Ok(exact),
            None => return Err(not_found()),
        };
        let offset = coord! { x: reach, y: reach };
        let window = Rect::new(center - offset, center + offset);
        debug!(id, reach, "Resolving geohash identifier");

        self.nearest_in(&window, &wanted, center)?.ok_or_else(not_found)
    }

    /// Scan the cells over `window` for `wanted`, falling back to the one
    /// nearest `center`.
    fn nearest_in(
        &self,
        window: &Rect<f64>,
        wanted: &str,
        center: Coord<f64>,
    ) -> Result<Option<Resolution>, GridError> {
        let mut nearest: Option<(f64, GridCell)> = None;
        for cell in self.cells(window)? {
            if self.cell_id_with(IdScheme::Geohash, &cell)? == wanted {
                return Ok(Some(Resolution::Exact(cell)));
            }
            let centroid = cell.centroid();
            let distance = (centroid.x() - center.x).hypot(centroid.y() - center.y);
            let closer = match &nearest {
                None => true,
                Some((best, best_cell)) => {
                    distance < *best
                        || (distance == *best && position(&cell) < position(best_cell))
                }
            };
            if closer {
                nearest = Some((distance, cell));
            }
        }

        Ok(nearest.map(|(distance, cell)| Resolution::Approximate { cell, distance }))
    }
}

/// Ordering key that makes nearest-cell ties deterministic.
fn position(cell: &GridCell) -> (u64, u64, crate::grid::CellKind) {
    (cell.row(), cell.col(), cell.kind())
}
