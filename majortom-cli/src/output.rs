//! GeoJSON rendering of grid cells.
//!
//! Two layouts are supported: a single `FeatureCollection` document, or
//! newline-delimited features (one `Feature` per line). Both can be written
//! incrementally, so streamed tiling never holds more than one cell.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;
use majortom::grid::{Grid, GridCell};
use serde_json::{json, Map, Value};

use crate::error::CliError;

/// Output layout.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// A single GeoJSON FeatureCollection
    #[default]
    Geojson,
    /// One GeoJSON Feature per line
    Ndjson,
}

/// GeoJSON `Feature` for a cell, with its identifier and grid position.
pub fn cell_feature(grid: &Grid, cell: &GridCell) -> Result<Value, CliError> {
    let id = grid.cell_id(cell)?;
    let ring: Vec<[f64; 2]> = cell
        .polygon()
        .exterior()
        .coords()
        .map(|c| [c.x, c.y])
        .collect();

    Ok(json!({
        "type": "Feature",
        "id": id,
        "geometry": {
            "type": "Polygon",
            "coordinates": [ring],
        },
        "properties": {
            "id": id,
            "row": cell.row(),
            "col": cell.col(),
            "kind": cell.kind().to_string(),
        },
    }))
}

/// Add extra properties to a feature built by [`cell_feature`].
pub fn with_properties(mut feature: Value, extra: Map<String, Value>) -> Value {
    if let Some(props) = feature
        .get_mut("properties")
        .and_then(Value::as_object_mut)
    {
        props.extend(extra);
    }
    feature
}

/// Incremental feature writer.
pub struct FeatureWriter {
    out: Box<dyn Write>,
    target: String,
    format: OutputFormat,
    written: u64,
}

impl FeatureWriter {
    /// Write to `path`, or to stdout when `None`.
    pub fn create(path: Option<&Path>, format: OutputFormat) -> Result<Self, CliError> {
        let (out, target): (Box<dyn Write>, String) = match path {
            Some(path) => {
                let file = File::create(path).map_err(|error| CliError::FileWrite {
                    path: path.display().to_string(),
                    error,
                })?;
                (Box::new(BufWriter::new(file)), path.display().to_string())
            }
            None => (Box::new(BufWriter::new(io::stdout().lock())), "<stdout>".to_string()),
        };

        let mut writer = Self {
            out,
            target,
            format,
            written: 0,
        };
        if format == OutputFormat::Geojson {
            writer.raw("{\"type\":\"FeatureCollection\",\"features\":[")?;
        }
        Ok(writer)
    }

    /// Append one feature.
    pub fn write(&mut self, feature: &Value) -> Result<(), CliError> {
        let text = feature.to_string();
        match self.format {
            OutputFormat::Geojson => {
                if self.written > 0 {
                    self.raw(",")?;
                }
                self.raw(&text)?;
            }
            OutputFormat::Ndjson => {
                self.raw(&text)?;
                self.raw("\n")?;
            }
        }
        self.written += 1;
        Ok(())
    }

    /// Close the document and flush. Returns the number of features written.
    pub fn finish(mut self) -> Result<u64, CliError> {
        if self.format == OutputFormat::Geojson {
            self.raw("]}\n")?;
        }
        let target = self.target.clone();
        self.out
            .flush()
            .map_err(|error| CliError::FileWrite { path: target, error })?;
        Ok(self.written)
    }

    /// Where output is going, for log messages.
    pub fn target(&self) -> &str {
        &self.target
    }

    fn raw(&mut self, text: &str) -> Result<(), CliError> {
        self.out
            .write_all(text.as_bytes())
            .map_err(|error| CliError::FileWrite {
                path: self.target.clone(),
                error,
            })
    }
}

/// Convenience for commands that print a single feature.
pub fn print_feature(feature: &Value) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", feature).map_err(|error| CliError::FileWrite {
        path: "<stdout>".to_string(),
        error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{coord, Rect};
    use tempfile::TempDir;

    fn sample() -> (Grid, GridCell) {
        let grid = Grid::new(1000.0, false).unwrap();
        let aoi = Rect::new(coord! { x: 8.5, y: 47.3 }, coord! { x: 8.5, y: 47.3 });
        let cell = grid.tile(&aoi).unwrap().remove(0);
        (grid, cell)
    }

    #[test]
    fn test_cell_feature_shape() {
        let (grid, cell) = sample();
        let feature = cell_feature(&grid, &cell).unwrap();

        assert_eq!(feature["type"], "Feature");
        assert_eq!(feature["geometry"]["type"], "Polygon");
        let ring = feature["geometry"]["coordinates"][0].as_array().unwrap();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring[0], ring[4]);
        assert_eq!(feature["properties"]["kind"], "primary");
        assert_eq!(feature["id"], feature["properties"]["id"]);
        assert!(feature["id"].as_str().unwrap().starts_with('G'));
    }

    #[test]
    fn test_with_properties() {
        let (grid, cell) = sample();
        let mut extra = Map::new();
        extra.insert("match".to_string(), json!("exact"));
        let feature = with_properties(cell_feature(&grid, &cell).unwrap(), extra);
        assert_eq!(feature["properties"]["match"], "exact");
        assert_eq!(feature["properties"]["row"], cell.row());
    }

    #[test]
    fn test_feature_collection_file() {
        let (grid, cell) = sample();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cells.geojson");

        let mut writer = FeatureWriter::create(Some(&path), OutputFormat::Geojson).unwrap();
        writer.write(&cell_feature(&grid, &cell).unwrap()).unwrap();
        writer.write(&cell_feature(&grid, &cell).unwrap()).unwrap();
        assert_eq!(writer.finish().unwrap(), 2);

        let doc: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["type"], "FeatureCollection");
        assert_eq!(doc["features"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_feature_collection_is_valid() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.geojson");
        let writer = FeatureWriter::create(Some(&path), OutputFormat::Geojson).unwrap();
        assert_eq!(writer.finish().unwrap(), 0);

        let doc: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(doc["features"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_ndjson_file() {
        let (grid, cell) = sample();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cells.ndjson");

        let mut writer = FeatureWriter::create(Some(&path), OutputFormat::Ndjson).unwrap();
        for _ in 0..3 {
            writer.write(&cell_feature(&grid, &cell).unwrap()).unwrap();
        }
        writer.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in lines {
            let feature: Value = serde_json::from_str(line).unwrap();
            assert_eq!(feature["type"], "Feature");
        }
    }
}
