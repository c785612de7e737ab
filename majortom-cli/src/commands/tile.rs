//! `majortom tile` - emit the cells covering a bounding box.

use std::path::PathBuf;

use clap::Args;
use geo_types::Rect;
use majortom::grid::{Grid, StreamOptions, StreamOutcome};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::common::{parse_bbox, GridArgs};
use crate::error::CliError;
use crate::output::{cell_feature, FeatureWriter, OutputFormat};
use crate::runner::CliRunner;

/// Arguments for the tile command.
#[derive(Debug, Args)]
pub struct TileArgs {
    /// Area of interest as W,S,E,N in degrees
    #[arg(long, value_parser = parse_bbox, allow_hyphen_values = true)]
    pub bbox: Rect<f64>,

    #[command(flatten)]
    pub grid: GridArgs,

    /// Output layout
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Stream cells as they are found instead of tiling in parallel first
    #[arg(long)]
    pub stream: bool,

    /// Write to a file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Run the tile command.
pub fn run(runner: &CliRunner, args: TileArgs) -> Result<(), CliError> {
    runner.log_startup("tile");
    let grid = runner.grid(&args.grid)?;

    if args.stream {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| CliError::Stream(e.to_string()))?;
        runtime.block_on(stream_cells(grid, &args, runner.stream_options()))
    } else {
        write_batch(grid, &args)
    }
}

fn write_batch(grid: Grid, args: &TileArgs) -> Result<(), CliError> {
    let cells = grid.tile(&args.bbox)?;
    let mut writer = FeatureWriter::create(args.output.as_deref(), args.format)?;
    for cell in &cells {
        writer.write(&cell_feature(&grid, cell)?)?;
    }
    let target = writer.target().to_string();
    let written = writer.finish()?;
    info!(cells = written, output = %target, "Tiling complete");
    Ok(())
}

async fn stream_cells(
    grid: Grid,
    args: &TileArgs,
    options: StreamOptions,
) -> Result<(), CliError> {
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping tile stream");
            on_interrupt.cancel();
        }
    });

    let mut stream = grid.tile_stream(&args.bbox, options, cancel)?;
    let mut writer = FeatureWriter::create(args.output.as_deref(), args.format)?;
    while let Some(cell) = stream.next().await {
        writer.write(&cell_feature(&grid, &cell)?)?;
    }

    let outcome = stream.finish().await?;
    let target = writer.target().to_string();
    let written = writer.finish()?;

    match outcome {
        StreamOutcome::Completed { .. } => {
            info!(cells = written, output = %target, buffer = options.buffer, "Streaming complete");
            Ok(())
        }
        StreamOutcome::Cancelled { cells } | StreamOutcome::Disconnected { cells } => Err(
            CliError::Stream(format!("stopped early after {} cells", cells)),
        ),
    }
}
