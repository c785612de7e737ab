//! INI serialization: `ConfigFile` → commented INI string.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let log_file = config
        .logging
        .file
        .as_deref()
        .map(path_to_string)
        .unwrap_or_default();

    format!(
        r#"[grid]
; Target cell size in meters (default: 320)
cell_size = {}
; Emit east- and south-shifted overlap cells (default: true)
overlap = {}
; Cell identifier scheme (default: geohash)
;   geohash - geohash of the cell centroid, prefix-searchable
;   index   - base62 row/column indices, exact for this cell size only
scheme = {}

[stream]
; Channel capacity in cells for streaming output (default: 1024)
buffer = {}

[logging]
; Log file path. Leave empty to log to stderr only.
file = {}
"#,
        config.grid.cell_size,
        config.grid.overlap,
        config.grid.scheme,
        config.stream.buffer,
        log_file,
    )
}

fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::IdScheme;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");

        let mut config = ConfigFile::default();
        config.grid.cell_size = 1000.0;
        config.grid.overlap = false;
        config.grid.scheme = IdScheme::GridIndex;
        config.stream.buffer = 64;
        config.logging.file = Some(PathBuf::from("/tmp/majortom.log"));
        config.save_to(&config_path).unwrap();

        let loaded = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_default_output_is_commented() {
        let content = to_config_string(&ConfigFile::default());
        assert!(content.contains("[grid]"));
        assert!(content.contains("cell_size = 320"));
        assert!(content.contains("overlap = true"));
        assert!(content.contains("scheme = geohash"));
        assert!(content.contains("; Target cell size"));
    }
}
