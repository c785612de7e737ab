//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and a single exit code.

use std::fmt;
use std::process;
use majortom::config::ConfigFileError;
use majortom::grid::GridError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Grid construction, tiling or lookup failed
    Grid(GridError),
    /// A command-line argument was rejected after parsing
    InvalidArgument(String),
    /// Failed to write output
    FileWrite { path: String, error: std::io::Error },
    /// Streaming runtime error
    Stream(String),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Grid(GridError::IdentifierDecode { .. }) => {
                eprintln!();
                eprintln!("Identifiers look like 'G<geohash>' or 'I<row>.<col>.<p|e|s>'.");
                eprintln!("Untagged strings are read as plain geohashes.");
            }
            CliError::Grid(GridError::NotFound(_)) => {
                eprintln!();
                eprintln!("Grid index identifiers only resolve on a grid with the same");
                eprintln!("cell size and overlap setting they were produced with.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Grid(e) => write!(f, "{}", e),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write '{}': {}", path, error)
            }
            CliError::Stream(msg) => write!(f, "Streaming failed: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Grid(e) => Some(e),
            CliError::FileWrite { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<GridError> for CliError {
    fn from(e: GridError) -> Self {
        CliError::Grid(e)
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}
