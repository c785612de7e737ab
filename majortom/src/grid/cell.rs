//! Grid cell types.

use std::fmt;

use geo_types::{coord, LineString, Point, Polygon, Rect};

use super::error::GridError;
use crate::id::{geohash_of, GEOHASH_PRECISION};

/// Which of the three cells anchored at a (row, column) position this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CellKind {
    /// Anchored on the row and column grid lines.
    Primary,
    /// Shifted east by half the row's longitude spacing.
    EastShifted,
    /// Shifted south by half the latitude spacing.
    SouthShifted,
}

impl CellKind {
    /// All kinds, in emission order.
    pub const ALL: [CellKind; 3] = [
        CellKind::Primary,
        CellKind::EastShifted,
        CellKind::SouthShifted,
    ];

    /// Single-character tag used in index-based identifiers.
    pub fn tag(self) -> char {
        match self {
            CellKind::Primary => 'p',
            CellKind::EastShifted => 'e',
            CellKind::SouthShifted => 's',
        }
    }

    /// Inverse of [`tag`](Self::tag).
    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'p' => Some(CellKind::Primary),
            'e' => Some(CellKind::EastShifted),
            's' => Some(CellKind::SouthShifted),
            _ => None,
        }
    }

    /// Whether this is one of the overlap kinds.
    #[inline]
    pub fn is_overlap(self) -> bool {
        self != CellKind::Primary
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellKind::Primary => "primary",
            CellKind::EastShifted => "east",
            CellKind::SouthShifted => "south",
        };
        f.write_str(name)
    }
}

/// A single grid cell.
///
/// The geometry is a closed, axis-aligned 5-point ring in (lon, lat) order:
/// south-west, south-east, north-east, north-west, south-west. Bounding box,
/// centroid and identifier are derived from that ring.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    row: u64,
    col: u64,
    kind: CellKind,
    bounds: Rect<f64>,
    polygon: Polygon<f64>,
}

impl GridCell {
    pub(crate) fn from_rect(row: u64, col: u64, kind: CellKind, rect: Rect<f64>) -> Self {
        let (min, max) = (rect.min(), rect.max());
        let ring = LineString::new(vec![
            coord! { x: min.x, y: min.y },
            coord! { x: max.x, y: min.y },
            coord! { x: max.x, y: max.y },
            coord! { x: min.x, y: max.y },
            coord! { x: min.x, y: min.y },
        ]);
        Self {
            row,
            col,
            kind,
            bounds: rect,
            polygon: Polygon::new(ring, vec![]),
        }
    }

    /// Row index of the anchoring grid position.
    #[inline]
    pub fn row(&self) -> u64 {
        self.row
    }

    /// Column index of the anchoring grid position.
    #[inline]
    pub fn col(&self) -> u64 {
        self.col
    }

    /// Primary or overlap kind.
    #[inline]
    pub fn kind(&self) -> CellKind {
        self.kind
    }

    /// The cell's polygon.
    #[inline]
    pub fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }

    /// Consume the cell, returning its polygon.
    pub fn into_polygon(self) -> Polygon<f64> {
        self.polygon
    }

    /// Axis-aligned bounding box of the ring.
    #[inline]
    pub fn bounds(&self) -> Rect<f64> {
        self.bounds
    }

    /// Centre of the bounding box.
    pub fn centroid(&self) -> Point<f64> {
        Point::from(self.bounds().center())
    }

    /// Geohash of the centroid at `precision` characters.
    ///
    /// Used for coarse bucket or partition keys; the full cell identity is
    /// [`Grid::cell_id`](super::Grid::cell_id).
    pub fn geohash(&self, precision: usize) -> Result<String, GridError> {
        if !(1..=GEOHASH_PRECISION).contains(&precision) {
            return Err(GridError::InvalidPrecision(precision));
        }
        geohash_of(self.centroid(), precision)
    }
}
