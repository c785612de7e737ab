//! `majortom lookup` - resolve an identifier back to its cell.

use clap::Args;
use majortom::id::Resolution;
use serde_json::{json, Map};
use tracing::info;

use super::common::GridArgs;
use crate::error::CliError;
use crate::output::{cell_feature, print_feature, with_properties};
use crate::runner::CliRunner;

/// Arguments for the lookup command.
#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Cell identifier (G<geohash>, I<row>.<col>.<kind>, or a bare geohash)
    pub id: String,

    #[command(flatten)]
    pub grid: GridArgs,
}

/// Run the lookup command. Prints the cell as a GeoJSON Feature.
pub fn run(runner: &CliRunner, args: LookupArgs) -> Result<(), CliError> {
    runner.log_startup("lookup");
    let grid = runner.grid(&args.grid)?;
    let resolution = grid.cell_by_id(&args.id)?;

    let mut extra = Map::new();
    extra.insert("query".to_string(), json!(args.id));
    match &resolution {
        Resolution::Exact(_) => {
            extra.insert("match".to_string(), json!("exact"));
        }
        Resolution::Approximate { distance, .. } => {
            extra.insert("match".to_string(), json!("approximate"));
            extra.insert("distance".to_string(), json!(distance));
        }
    }

    let cell = resolution.cell();
    info!(
        id = %args.id,
        row = cell.row(),
        col = cell.col(),
        kind = %cell.kind(),
        exact = resolution.is_exact(),
        "Lookup complete"
    );
    print_feature(&with_properties(cell_feature(&grid, cell)?, extra))
}
