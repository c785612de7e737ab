//! User configuration stored in `~/.majortom/config.ini`.
//!
//! # Example
//!
//! ```
//! use majortom::config::ConfigFile;
//!
//! let config = ConfigFile::default();
//! let grid = config.grid()?;
//! assert_eq!(grid.cell_size(), 320.0);
//! assert!(grid.overlap());
//! # Ok::<(), majortom::grid::GridError>(())
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::{
    DEFAULT_CELL_SIZE, DEFAULT_OVERLAP, DEFAULT_SCHEME, DEFAULT_STREAM_BUFFER_SIZE,
};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{ConfigFile, GridSettings, LoggingSettings, StreamSettings};
