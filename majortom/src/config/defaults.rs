//! Default values for all configuration settings, and `ConfigFile::default()`.

use super::settings::*;
use crate::grid::DEFAULT_STREAM_BUFFER;
use crate::id::IdScheme;

/// Default target cell size in meters.
pub const DEFAULT_CELL_SIZE: f64 = 320.0;

/// Overlap cells are emitted unless turned off.
pub const DEFAULT_OVERLAP: bool = true;

/// Default identifier scheme.
pub const DEFAULT_SCHEME: IdScheme = IdScheme::Geohash;

/// Default streaming channel capacity, in cells.
pub const DEFAULT_STREAM_BUFFER_SIZE: usize = DEFAULT_STREAM_BUFFER;

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            grid: GridSettings {
                cell_size: DEFAULT_CELL_SIZE,
                overlap: DEFAULT_OVERLAP,
                scheme: DEFAULT_SCHEME,
            },
            stream: StreamSettings {
                buffer: DEFAULT_STREAM_BUFFER_SIZE,
            },
            logging: LoggingSettings { file: None },
        }
    }
}
