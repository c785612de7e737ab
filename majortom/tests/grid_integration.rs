//! Integration tests for the public grid API.
//!
//! These tests drive the crate the way an embedder would:
//! - Config file → grid → tiling → identifiers → reverse lookup
//! - Batch, lazy and streamed tiling of the same area agree
//! - Concurrent queries against one shared grid
//!
//! Run with: `cargo test --test grid_integration`

use std::collections::HashSet;
use std::sync::Arc;

use geo_types::{coord, polygon, MultiPolygon, Polygon, Rect};
use num_bigint::BigUint;
use tokio_util::sync::CancellationToken;

use majortom::config::ConfigFile;
use majortom::grid::{CellKind, Grid, GridCell, GridError, StreamOptions};
use majortom::id::{CellId, IdScheme, Resolution};

// ============================================================================
// Fixtures
// ============================================================================

fn zurich() -> Polygon<f64> {
    polygon![
        (x: 8.530, y: 47.365),
        (x: 8.555, y: 47.362),
        (x: 8.560, y: 47.380),
        (x: 8.535, y: 47.385),
        (x: 8.530, y: 47.365),
    ]
}

fn keys(cells: &[GridCell]) -> HashSet<(u64, u64, CellKind)> {
    cells.iter().map(|c| (c.row(), c.col(), c.kind())).collect()
}

// ============================================================================
// Config → grid
// ============================================================================

#[test]
fn test_grid_from_config_file() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("config.ini");
    std::fs::write(
        &path,
        "[grid]\ncell_size = 500\noverlap = false\nscheme = index\n\n[stream]\nbuffer = 8\n",
    )
    .unwrap();

    let config = ConfigFile::load_from(&path).unwrap();
    let grid = config.grid().unwrap();
    assert_eq!(grid.cell_size(), 500.0);
    assert!(!grid.overlap());
    assert_eq!(grid.scheme(), IdScheme::GridIndex);
    assert_eq!(config.stream_options(), StreamOptions::with_buffer(8));

    let cells = grid.tile(&zurich()).unwrap();
    assert!(cells.iter().all(|c| c.kind() == CellKind::Primary));
    let id = grid.cell_id(&cells[0]).unwrap();
    assert!(matches!(CellId::parse(&id).unwrap(), CellId::Index { .. }));
}

// ============================================================================
// Identifier round-trips
// ============================================================================

#[test]
fn test_every_cell_roundtrips_in_both_schemes() {
    for scheme in [IdScheme::Geohash, IdScheme::GridIndex] {
        let grid = Grid::new(320.0, true).unwrap().with_scheme(scheme);
        for cell in grid.tile(&zurich()).unwrap() {
            let id = grid.cell_id(&cell).unwrap();
            match grid.cell_by_id(&id).unwrap() {
                Resolution::Exact(found) => assert_eq!(found.polygon(), cell.polygon()),
                other => panic!("{} ({}) resolved to {:?}", id, scheme, other),
            }
        }
    }
}

#[test]
fn test_geohash_prefix_groups_neighbours() {
    let grid = Grid::new(320.0, false).unwrap();
    let cells = grid.tile(&zurich()).unwrap();
    let buckets: HashSet<String> = cells.iter().map(|c| c.geohash(4).unwrap()).collect();
    // A few kilometres fit inside one or two 4-character geohash buckets.
    assert!(buckets.len() <= 2, "{:?}", buckets);
}

#[test]
fn test_index_ids_depend_on_cell_size() {
    let coarse = Grid::new(1000.0, false).unwrap().with_scheme(IdScheme::GridIndex);
    let fine = Grid::new(320.0, false).unwrap().with_scheme(IdScheme::GridIndex);

    let cell = coarse.tile(&zurich()).unwrap().remove(0);
    let id = coarse.cell_id(&cell).unwrap();
    let elsewhere = fine.cell_by_id(&id).unwrap().into_cell();
    assert_ne!(elsewhere.polygon(), cell.polygon());
}

#[test]
fn test_lookup_errors() {
    let grid = Grid::new(320.0, true).unwrap();
    assert!(matches!(
        grid.cell_by_id(""),
        Err(GridError::IdentifierDecode { .. })
    ));
    assert!(matches!(
        grid.cell_by_id("Izzzzzzzzzz.0.p"),
        Err(GridError::NotFound(_))
    ));
}

// ============================================================================
// Tiling agreement
// ============================================================================

#[tokio::test]
async fn test_batch_lazy_and_streamed_agree() {
    let grid = Grid::new(320.0, true).unwrap();
    let aoi = zurich();

    let batch = keys(&grid.tile(&aoi).unwrap());
    let lazy = keys(&grid.cells(&aoi).unwrap().collect::<Vec<_>>());

    let mut stream = grid
        .tile_stream(&aoi, StreamOptions::default(), CancellationToken::new())
        .unwrap();
    let mut streamed = Vec::new();
    while let Some(cell) = stream.next().await {
        streamed.push(cell);
    }
    let outcome = stream.finish().await.unwrap();

    assert_eq!(batch, lazy);
    assert_eq!(batch, keys(&streamed));
    assert_eq!(outcome.cells(), streamed.len() as u64);
    assert_eq!(grid.count_all_cells(&aoi).unwrap(), BigUint::from(batch.len()));
}

#[test]
fn test_multipolygon_covers_union_of_boxes() {
    let grid = Grid::new(1000.0, false).unwrap();
    let a = Rect::new(coord! { x: 8.0, y: 47.0 }, coord! { x: 8.02, y: 47.02 });
    let b = Rect::new(coord! { x: 8.10, y: 47.10 }, coord! { x: 8.12, y: 47.12 });
    let multi = MultiPolygon::new(vec![a.to_polygon(), b.to_polygon()]);

    // Only the bounding box of the whole AOI is used.
    let hull = Rect::new(coord! { x: 8.0, y: 47.0 }, coord! { x: 8.12, y: 47.12 });
    assert_eq!(
        keys(&grid.tile(&multi).unwrap()),
        keys(&grid.tile(&hull).unwrap())
    );
}

#[test]
fn test_concurrent_queries_share_one_grid() {
    let grid = Arc::new(Grid::new(320.0, true).unwrap());
    let expected = keys(&grid.tile(&zurich()).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let grid = Arc::clone(&grid);
            std::thread::spawn(move || keys(&grid.tile(&zurich()).unwrap()))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_antimeridian_box_is_not_wrapped() {
    let grid = Grid::new(10_000.0, false).unwrap();
    let east_edge = Rect::new(coord! { x: 179.95, y: 0.0 }, coord! { x: 180.0, y: 0.05 });
    let cells = grid.tile(&east_edge).unwrap();
    assert!(!cells.is_empty());
    assert!(cells.iter().all(|c| c.bounds().min().x > 170.0));
}
