//! Settings structs, one per `[section]` of the INI file.

use std::path::PathBuf;

use crate::grid::{Grid, GridError, StreamOptions};
use crate::id::IdScheme;

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Grid settings
    pub grid: GridSettings,
    /// Streaming settings
    pub stream: StreamSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// `[grid]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSettings {
    /// Target cell size in meters.
    pub cell_size: f64,
    /// Whether east- and south-shifted overlap cells are emitted.
    pub overlap: bool,
    /// Identifier scheme for emitted cells.
    pub scheme: IdScheme,
}

/// `[stream]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamSettings {
    /// Channel capacity used by streaming tiling.
    pub buffer: usize,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Optional log file; logs go to stderr only when unset.
    pub file: Option<PathBuf>,
}

impl ConfigFile {
    /// Build the grid described by the `[grid]` section.
    pub fn grid(&self) -> Result<Grid, GridError> {
        Ok(Grid::new(self.grid.cell_size, self.grid.overlap)?.with_scheme(self.grid.scheme))
    }

    /// Streaming options from the `[stream]` section.
    pub fn stream_options(&self) -> StreamOptions {
        StreamOptions::with_buffer(self.stream.buffer)
    }
}
