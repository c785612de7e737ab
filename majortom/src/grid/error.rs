//! Error types for the grid module.

use thiserror::Error;

/// Errors that can occur while building or querying a grid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// Cell size is not a finite, positive number of meters.
    #[error("Invalid grid configuration: cell size {cell_size} m (must be finite and > 0)")]
    InvalidConfiguration { cell_size: f64 },

    /// Latitude cannot be turned into a column count.
    #[error("Degenerate latitude: {0} (must be finite and between -90 and 90)")]
    DegenerateLatitude(f64),

    /// The area of interest has no usable bounding box.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A cell identifier could not be parsed or decoded.
    #[error("Failed to decode cell identifier '{id}': {reason}")]
    IdentifierDecode { id: String, reason: String },

    /// A cell centroid could not be encoded.
    #[error("Failed to encode cell identifier: {0}")]
    IdentifierEncode(String),

    /// Geohash precision is outside the codec's supported range.
    #[error("Invalid geohash precision: {0} (must be between 1 and 12)")]
    InvalidPrecision(usize),

    /// The identifier decoded, but no grid cell exists there.
    #[error("No grid cell found for identifier '{0}'")]
    NotFound(String),

    /// The streaming producer task panicked or was aborted.
    #[error("Tile stream producer failed: {0}")]
    StreamProducer(String),
}
