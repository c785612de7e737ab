//! Cell identifiers.
//!
//! Two identifier schemes exist and they are not interchangeable:
//!
//! - **Geohash** (default): the geohash of the cell's bounding-box centroid.
//!   Derived from continuous geometry, so prefixes support proximity search
//!   and coarser bucketing.
//! - **Grid index**: base62 row and column indices plus the cell kind.
//!   Derived from discrete grid positions and only meaningful for a grid
//!   with the same cell size.
//!
//! Every identifier starts with a tag character naming its scheme (`G` or
//! `I`). Neither tag is part of the geohash alphabet, so untagged strings are
//! read as plain geohashes.
//!
//! ```
//! use majortom::grid::Grid;
//! use majortom::id::CellId;
//!
//! let grid = Grid::new(1000.0, false)?;
//! let cell = grid.tile(&geo_types::Rect::new((8.0, 47.0), (8.001, 47.001)))?.remove(0);
//! let id = grid.cell_id(&cell)?;
//! assert!(id.starts_with('G'));
//! assert!(matches!(CellId::parse(&id)?, CellId::Geohash(_)));
//! # Ok::<(), majortom::grid::GridError>(())
//! ```

mod resolve;

use std::fmt;
use std::str::FromStr;

use geo_types::{coord, Point};

use crate::grid::{CellKind, Grid, GridCell, GridError};

pub use resolve::Resolution;

/// Geohash length of a full cell identifier.
///
/// Canonical MajorTOM identifiers carry a 20-character geohash, but the
/// codec stops at 12. Longer geohashes are truncated to this length when
/// parsed, so a 20-character id resolves to the same cell as its prefix.
pub const GEOHASH_PRECISION: usize = 12;

/// Tag of geohash identifiers.
pub const GEOHASH_TAG: char = 'G';

/// Tag of grid index identifiers.
pub const INDEX_TAG: char = 'I';

/// Identifier scheme used by [`Grid::cell_id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IdScheme {
    /// Geohash of the cell centroid.
    #[default]
    Geohash,
    /// Base62 row and column indices.
    GridIndex,
}

impl fmt::Display for IdScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdScheme::Geohash => f.write_str("geohash"),
            IdScheme::GridIndex => f.write_str("index"),
        }
    }
}

impl FromStr for IdScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "geohash" => Ok(IdScheme::Geohash),
            "index" | "grid_index" => Ok(IdScheme::GridIndex),
            other => Err(format!(
                "unknown identifier scheme '{}' (expected 'geohash' or 'index')",
                other
            )),
        }
    }
}

/// A parsed cell identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellId {
    /// Centroid geohash, at most [`GEOHASH_PRECISION`] characters.
    Geohash(String),
    /// Grid position.
    Index { row: u64, col: u64, kind: CellKind },
}

impl CellId {
    /// Parse a tagged or untagged identifier.
    ///
    /// Geohash bodies longer than [`GEOHASH_PRECISION`] are truncated. The
    /// geohash characters themselves are only checked when decoded.
    pub fn parse(id: &str) -> Result<Self, GridError> {
        let mut chars = id.chars();
        match chars.next() {
            None => Err(decode_error(id, "identifier is empty")),
            Some(GEOHASH_TAG) => parse_geohash(id, chars.as_str()),
            Some(INDEX_TAG) => parse_index(id, chars.as_str()),
            Some(_) => parse_geohash(id, id),
        }
    }

    pub fn scheme(&self) -> IdScheme {
        match self {
            CellId::Geohash(_) => IdScheme::Geohash,
            CellId::Index { .. } => IdScheme::GridIndex,
        }
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellId::Geohash(hash) => write!(f, "{}{}", GEOHASH_TAG, hash),
            CellId::Index { row, col, kind } => write!(
                f,
                "{}{}.{}.{}",
                INDEX_TAG,
                base62::encode(*row),
                base62::encode(*col),
                kind.tag()
            ),
        }
    }
}

impl FromStr for CellId {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CellId::parse(s)
    }
}

fn parse_geohash(id: &str, body: &str) -> Result<CellId, GridError> {
    let hash: String = body.chars().take(GEOHASH_PRECISION).collect();
    if hash.is_empty() {
        return Err(decode_error(id, "geohash is empty"));
    }
    Ok(CellId::Geohash(hash))
}

fn parse_index(id: &str, body: &str) -> Result<CellId, GridError> {
    let mut parts = body.split('.');
    let (Some(row), Some(col), Some(kind), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(decode_error(id, "expected <row>.<col>.<kind>"));
    };

    let row = decode_base62(id, row)?;
    let col = decode_base62(id, col)?;
    let mut kind_chars = kind.chars();
    let kind = match (kind_chars.next(), kind_chars.next()) {
        (Some(tag), None) => CellKind::from_tag(tag),
        _ => None,
    }
    .ok_or_else(|| decode_error(id, format!("unknown cell kind '{}'", kind)))?;

    Ok(CellId::Index { row, col, kind })
}

fn decode_base62(id: &str, digits: &str) -> Result<u64, GridError> {
    let value = base62::decode(digits)
        .map_err(|e| decode_error(id, format!("bad base62 '{}': {:?}", digits, e)))?;
    u64::try_from(value).map_err(|_| decode_error(id, format!("index '{}' out of range", digits)))
}

fn decode_error(id: &str, reason: impl Into<String>) -> GridError {
    GridError::IdentifierDecode {
        id: id.to_string(),
        reason: reason.into(),
    }
}

/// Largest longitude the geohash codec keeps on the eastern edge; it encodes
/// 180° itself as -180°.
const MAX_LONGITUDE: f64 = f64::from_bits(180f64.to_bits() - 1);

/// Geohash of `point`, clamped onto the globe first.
///
/// Overlap cells on the last column or the first row stick out past the
/// antimeridian or the south pole; their centroids are pulled back to the
/// nearest valid coordinate.
pub(crate) fn geohash_of(point: Point<f64>, precision: usize) -> Result<String, GridError> {
    let c = coord! {
        x: point.x().clamp(-180.0, MAX_LONGITUDE),
        y: point.y().clamp(-90.0, 90.0),
    };
    geohash::encode(c, precision).map_err(|e| GridError::IdentifierEncode(e.to_string()))
}

impl Grid {
    /// Identifier of `cell` in this grid's scheme.
    pub fn cell_id(&self, cell: &GridCell) -> Result<String, GridError> {
        self.cell_id_with(self.scheme(), cell)
    }

    /// Identifier of `cell` in an explicit scheme.
    pub fn cell_id_with(&self, scheme: IdScheme, cell: &GridCell) -> Result<String, GridError> {
        let id = match scheme {
            IdScheme::Geohash => CellId::Geohash(cell.geohash(GEOHASH_PRECISION)?),
            IdScheme::GridIndex => CellId::Index {
                row: cell.row(),
                col: cell.col(),
                kind: cell.kind(),
            },
        };
        Ok(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tagged_geohash() {
        let id = CellId::parse("Gdr1u2wkp3v9h").unwrap();
        assert_eq!(id, CellId::Geohash("dr1u2wkp3v9h".to_string()));
        assert_eq!(id.to_string(), "Gdr1u2wkp3v9h");
    }

    #[test]
    fn test_parse_untagged_geohash() {
        let id = CellId::parse("dr1u2wk").unwrap();
        assert_eq!(id, CellId::Geohash("dr1u2wk".to_string()));
    }

    #[test]
    fn test_long_geohash_is_truncated() {
        let id = CellId::parse("Gdr1u2wkp3v9h0123456789").unwrap();
        assert_eq!(id, CellId::Geohash("dr1u2wkp3v9h".to_string()));
    }

    #[test]
    fn test_parse_index_roundtrip() {
        let id = CellId::Index {
            row: 51234,
            col: 987654,
            kind: CellKind::SouthShifted,
        };
        let text = id.to_string();
        assert!(text.starts_with(INDEX_TAG));
        assert!(text.ends_with(".s"));
        assert_eq!(CellId::parse(&text).unwrap(), id);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "G", "I", "I1.2", "I1.2.x", "I1.2.p.3", "I!.2.p", "I1.2.pe"] {
            assert!(
                matches!(CellId::parse(bad), Err(GridError::IdentifierDecode { .. })),
                "'{}' should not parse",
                bad
            );
        }
    }

    #[test]
    fn test_scheme_from_str() {
        assert_eq!("geohash".parse::<IdScheme>(), Ok(IdScheme::Geohash));
        assert_eq!("Index".parse::<IdScheme>(), Ok(IdScheme::GridIndex));
        assert!("base32".parse::<IdScheme>().is_err());
        assert_eq!(IdScheme::GridIndex.to_string(), "index");
    }

    #[test]
    fn test_geohash_of_keeps_eastern_edge_east() {
        for x in [180.0, 180.0005, 179.9999999] {
            let hash = geohash_of(Point::new(x, 10.0), GEOHASH_PRECISION).unwrap();
            let region = geohash::decode_bbox(&hash).unwrap();
            assert!(region.min().x > 179.0, "{} encoded as {:?}", x, region);
        }
    }

    #[test]
    fn test_geohash_of_clamps_off_globe_points() {
        let inside = geohash_of(Point::new(180.0, -90.0), 6).unwrap();
        let outside = geohash_of(Point::new(180.0000001, -90.0000001), 6).unwrap();
        assert_eq!(inside, outside);
    }
}
