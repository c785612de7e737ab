//! Tiling and counting against an area of interest.
//!
//! All three entry points walk the same row band and per-row column bands,
//! and keep a cell only when its bounding box intersects the AOI's bounding
//! box, so [`Grid::tile`], [`Grid::cells`] and [`Grid::count_all_cells`]
//! always agree.

use std::ops::RangeInclusive;

use geo::Intersects;
use geo_types::Rect;
use num_bigint::BigUint;
use rayon::prelude::*;
use tracing::debug;

use super::aoi::{usable_bounds, Aoi};
use super::cell::{CellKind, GridCell};
use super::error::GridError;
use super::{Grid, RowGeometry};

impl Grid {
    /// All cells intersecting the AOI's bounding box.
    ///
    /// Rows are scanned in parallel; each row builds its own list and the
    /// lists are concatenated afterwards. The returned order is not
    /// meaningful.
    pub fn tile<A: Aoi + ?Sized>(&self, aoi: &A) -> Result<Vec<GridCell>, GridError> {
        let bounds = usable_bounds(aoi)?;
        let rows = self.row_band(&bounds);

        let per_row: Vec<Vec<GridCell>> = rows
            .clone()
            .into_par_iter()
            .map(|row| RowCells::new(self, row, bounds).collect())
            .collect();

        let cells: Vec<GridCell> = per_row.into_iter().flatten().collect();
        debug!(
            cell_size = self.cell_size(),
            overlap = self.overlap(),
            start_row = rows.start(),
            end_row = rows.end(),
            cells = cells.len(),
            "Tiled area of interest"
        );
        Ok(cells)
    }

    /// Lazily enumerate the cells intersecting the AOI's bounding box.
    ///
    /// Single-threaded, row by row from south to north. Yields exactly the
    /// cells [`tile`](Self::tile) returns.
    pub fn cells<A: Aoi + ?Sized>(&self, aoi: &A) -> Result<CellIter, GridError> {
        let bounds = usable_bounds(aoi)?;
        Ok(CellIter {
            grid: *self,
            bounds,
            rows: self.row_band(&bounds),
            current: None,
        })
    }

    /// Number of primary cells intersecting the AOI's bounding box.
    ///
    /// Overlap cells are not counted even when the grid emits them, so this
    /// equals `tile(aoi).len()` for a grid without overlap. No cells are
    /// built; the result does not fit in 64 bits for fine grids over large
    /// areas.
    pub fn count_cells<A: Aoi + ?Sized>(&self, aoi: &A) -> Result<BigUint, GridError> {
        self.count_kinds(aoi, &[CellKind::Primary])
    }

    /// Number of cells, overlap cells included, that [`tile`](Self::tile)
    /// would return.
    pub fn count_all_cells<A: Aoi + ?Sized>(&self, aoi: &A) -> Result<BigUint, GridError> {
        self.count_kinds(aoi, self.kinds())
    }

    fn count_kinds<A: Aoi + ?Sized>(
        &self,
        aoi: &A,
        kinds: &[CellKind],
    ) -> Result<BigUint, GridError> {
        let bounds = usable_bounds(aoi)?;
        let rows = self.row_band(&bounds);

        let mut total = BigUint::from(0u32);
        let mut widest_row = 0u64;
        for row in rows.clone() {
            let geometry = self.row_geometry(row);
            let columns = geometry.column_band(&bounds);
            let row_total: u64 = kinds
                .iter()
                .map(|&kind| kept_columns(&geometry, columns.clone(), kind, &bounds))
                .sum();
            widest_row = widest_row.max(row_total);
            total += row_total;
        }

        debug!(
            cell_size = self.cell_size(),
            start_row = rows.start(),
            end_row = rows.end(),
            widest_row,
            total = %total,
            "Counted cells"
        );
        Ok(total)
    }
}

/// Number of columns in `band` whose cell of `kind` intersects `bounds`.
///
/// Cell edges grow monotonically with the column index, so the kept columns
/// form one contiguous run; only the ends of the band are probed.
fn kept_columns(
    geometry: &RowGeometry,
    band: RangeInclusive<u64>,
    kind: CellKind,
    bounds: &Rect<f64>,
) -> u64 {
    let (first, last) = (*band.start(), *band.end());
    let span = Rect::new(
        geometry.cell_rect(first, kind).min(),
        geometry.cell_rect(last, kind).max(),
    );
    if !span.intersects(bounds) {
        return 0;
    }

    let hits = |col: u64| geometry.cell_rect(col, kind).intersects(bounds);
    let Some(lo) = (first..=last).find(|&col| hits(col)) else {
        return 0;
    };
    let hi = (lo..=last).rev().find(|&col| hits(col)).unwrap_or(lo);
    hi - lo + 1
}

/// Kept cells of a single row, in column order.
struct RowCells {
    geometry: RowGeometry,
    kinds: &'static [CellKind],
    bounds: Rect<f64>,
    columns: RangeInclusive<u64>,
    col: Option<u64>,
    kind_idx: usize,
}

impl RowCells {
    fn new(grid: &Grid, row: u64, bounds: Rect<f64>) -> Self {
        Self::from_geometry(grid.row_geometry(row), grid.kinds(), bounds)
    }

    fn from_geometry(
        geometry: RowGeometry,
        kinds: &'static [CellKind],
        bounds: Rect<f64>,
    ) -> Self {
        let mut columns = geometry.column_band(&bounds);
        let col = columns.next();
        Self {
            geometry,
            kinds,
            bounds,
            columns,
            col,
            kind_idx: 0,
        }
    }
}

impl Iterator for RowCells {
    type Item = GridCell;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let col = self.col?;
            if self.kind_idx >= self.kinds.len() {
                self.kind_idx = 0;
                self.col = self.columns.next();
                continue;
            }

            let kind = self.kinds[self.kind_idx];
            self.kind_idx += 1;

            let rect = self.geometry.cell_rect(col, kind);
            if rect.intersects(&self.bounds) {
                return Some(GridCell::from_rect(self.geometry.row, col, kind, rect));
            }
        }
    }
}

/// Lazy, row-major iterator over the cells intersecting an AOI.
///
/// Created by [`Grid::cells`]. Finite: it ends once every candidate row has
/// been scanned.
pub struct CellIter {
    grid: Grid,
    bounds: Rect<f64>,
    rows: RangeInclusive<u64>,
    current: Option<RowCells>,
}

impl CellIter {
    /// The AOI bounding box being scanned.
    pub fn bounds(&self) -> Rect<f64> {
        self.bounds
    }
}

impl Iterator for CellIter {
    type Item = GridCell;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(cell) = self.current.as_mut().and_then(Iterator::next) {
                return Some(cell);
            }
            let row = self.rows.next()?;
            self.current = Some(RowCells::from_geometry(
                self.grid.row_geometry(row),
                self.grid.kinds(),
                self.bounds,
            ));
        }
    }
}
