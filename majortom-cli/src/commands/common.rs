//! Common types and utilities shared across CLI commands.

use clap::{Args, ValueEnum};
use geo_types::{coord, Rect};
use majortom::id::IdScheme;

/// Identifier scheme selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SchemeArg {
    /// Geohash of the cell centroid (prefix-searchable)
    Geohash,
    /// Base62 row/column indices (exact for one cell size)
    Index,
}

impl From<SchemeArg> for IdScheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Geohash => IdScheme::Geohash,
            SchemeArg::Index => IdScheme::GridIndex,
        }
    }
}

/// Grid options shared by every command that builds a grid.
///
/// Unset options fall back to the `[grid]` section of config.ini.
#[derive(Debug, Clone, Default, Args)]
pub struct GridArgs {
    /// Target cell size in meters
    #[arg(long)]
    pub cell_size: Option<f64>,

    /// Emit east- and south-shifted overlap cells
    #[arg(long, conflicts_with = "no_overlap")]
    pub overlap: bool,

    /// Emit primary cells only
    #[arg(long)]
    pub no_overlap: bool,

    /// Identifier scheme
    #[arg(long, value_enum)]
    pub scheme: Option<SchemeArg>,
}

impl GridArgs {
    /// Overlap override, if either flag was given.
    pub fn overlap(&self) -> Option<bool> {
        match (self.overlap, self.no_overlap) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// Parse a `W,S,E,N` bounding box in degrees.
pub fn parse_bbox(s: &str) -> Result<Rect<f64>, String> {
    let values = s
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| format!("'{}' is not a number", part.trim()))
        })
        .collect::<Result<Vec<f64>, String>>()?;

    let [west, south, east, north] = values[..] else {
        return Err(format!(
            "expected 4 comma-separated values W,S,E,N, got {}",
            values.len()
        ));
    };

    if values.iter().any(|v| !v.is_finite()) {
        return Err("coordinates must be finite".to_string());
    }
    if !(-180.0..=180.0).contains(&west) || !(-180.0..=180.0).contains(&east) {
        return Err("longitudes must be between -180 and 180".to_string());
    }
    if !(-90.0..=90.0).contains(&south) || !(-90.0..=90.0).contains(&north) {
        return Err("latitudes must be between -90 and 90".to_string());
    }
    if west > east || south > north {
        return Err("expected west <= east and south <= north".to_string());
    }

    Ok(Rect::new(
        coord! { x: west, y: south },
        coord! { x: east, y: north },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bbox() {
        let rect = parse_bbox("-76.3353, 39.5432,-76.3306,39.5477").unwrap();
        assert_eq!(rect.min(), coord! { x: -76.3353, y: 39.5432 });
        assert_eq!(rect.max(), coord! { x: -76.3306, y: 39.5477 });
    }

    #[test]
    fn test_parse_bbox_rejects_bad_input() {
        for bad in [
            "1,2,3",
            "1,2,3,4,5",
            "a,2,3,4",
            "10,0,5,1",
            "0,10,1,5",
            "-181,0,0,1",
            "0,-91,1,0",
            "NaN,0,1,1",
        ] {
            assert!(parse_bbox(bad).is_err(), "'{}' should be rejected", bad);
        }
    }

    #[test]
    fn test_overlap_flags() {
        let mut args = GridArgs::default();
        assert_eq!(args.overlap(), None);
        args.overlap = true;
        assert_eq!(args.overlap(), Some(true));
        args.overlap = false;
        args.no_overlap = true;
        assert_eq!(args.overlap(), Some(false));
    }

    #[test]
    fn test_scheme_conversion() {
        assert_eq!(IdScheme::from(SchemeArg::Index), IdScheme::GridIndex);
        assert_eq!(IdScheme::from(SchemeArg::Geohash), IdScheme::Geohash);
    }
}
