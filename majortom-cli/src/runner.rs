//! CLI runner for common setup.
//!
//! Loads the config file, initializes logging and resolves the grid from
//! config values and command-line overrides.

use std::path::{Path, PathBuf};

use crate::commands::common::GridArgs;
use crate::error::CliError;
use majortom::config::{config_file_path, ConfigFile};
use majortom::grid::{Grid, StreamOptions};
use majortom::logging::{init_logging, LoggingGuard, LoggingOptions};
use tracing::{debug, info};

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Load config from `config_path` (or the default path) and initialize
    /// logging. `log_file` overrides the configured log file.
    pub fn new(
        config_path: Option<&Path>,
        verbose: bool,
        log_file: Option<PathBuf>,
    ) -> Result<Self, CliError> {
        let config = match config_path {
            Some(path) => ConfigFile::load_from(path)?,
            None => ConfigFile::load()?,
        };

        let options = LoggingOptions::default()
            .verbose(verbose)
            .with_file(log_file.or_else(|| config.logging.file.clone()));
        let logging_guard =
            init_logging(&options).map_err(|e| CliError::LoggingInit(e.to_string()))?;

        let source = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(config_file_path);
        debug!(path = %source.display(), "Configuration loaded");

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!(version = majortom::VERSION, command, "MajorTOM CLI");
    }

    /// Build the grid from config values overridden by `args`.
    pub fn grid(&self, args: &GridArgs) -> Result<Grid, CliError> {
        let settings = &self.config.grid;
        let cell_size = args.cell_size.unwrap_or(settings.cell_size);
        let overlap = args.overlap().unwrap_or(settings.overlap);
        let scheme = args.scheme.map(Into::into).unwrap_or(settings.scheme);

        let grid = Grid::new(cell_size, overlap)?.with_scheme(scheme);
        info!(
            cell_size,
            overlap,
            scheme = %scheme,
            rows = grid.row_count(),
            "Grid ready"
        );
        Ok(grid)
    }

    /// Streaming options from config.
    pub fn stream_options(&self) -> StreamOptions {
        self.config.stream_options()
    }
}
