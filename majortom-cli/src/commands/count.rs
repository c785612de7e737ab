//! `majortom count` - count cells without building them.

use clap::Args;
use geo_types::Rect;
use tracing::info;

use super::common::{parse_bbox, GridArgs};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the count command.
#[derive(Debug, Args)]
pub struct CountArgs {
    /// Area of interest as W,S,E,N in degrees
    #[arg(long, value_parser = parse_bbox, allow_hyphen_values = true)]
    pub bbox: Rect<f64>,

    #[command(flatten)]
    pub grid: GridArgs,

    /// Include overlap cells in the count
    #[arg(long)]
    pub all: bool,
}

/// Run the count command. Prints the count on stdout.
pub fn run(runner: &CliRunner, args: CountArgs) -> Result<(), CliError> {
    runner.log_startup("count");
    let grid = runner.grid(&args.grid)?;

    let count = if args.all {
        grid.count_all_cells(&args.bbox)?
    } else {
        grid.count_cells(&args.bbox)?
    };

    info!(count = %count, all = args.all, "Count complete");
    println!("{}", count);
    Ok(())
}
