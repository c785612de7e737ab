//! MajorTOM CLI - Command-line interface
//!
//! Tiles bounding boxes into MajorTOM grid cells, counts cells, resolves
//! cell identifiers and manages `~/.majortom/config.ini`.

mod commands;
mod error;
mod output;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::count::CountArgs;
use commands::lookup::LookupArgs;
use commands::tile::TileArgs;
use error::CliError;
use runner::CliRunner;

#[derive(Parser)]
#[command(name = "majortom")]
#[command(version = majortom::VERSION)]
#[command(about = "Global MajorTOM grid: tile, count and look up cells", long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    verbose: bool,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Use this config file instead of ~/.majortom/config.ini
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit the cells covering a bounding box as GeoJSON
    Tile(TileArgs),

    /// Count the cells covering a bounding box
    Count(CountArgs),

    /// Resolve a cell identifier to its cell
    Lookup(LookupArgs),

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        verbose,
        log_file,
        config,
        command,
    } = cli;
    let runner = || CliRunner::new(config.as_deref(), verbose, log_file.clone());

    match command {
        Commands::Tile(args) => commands::tile::run(&runner()?, args),
        Commands::Count(args) => commands::count::run(&runner()?, args),
        Commands::Lookup(args) => commands::lookup::run(&runner()?, args),
        Commands::Config { command } => commands::config::run(command, config.as_deref()),
    }
}
