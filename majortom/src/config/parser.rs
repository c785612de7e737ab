//! INI parsing: `Ini` → `ConfigFile`.
//!
//! The single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::id::IdScheme;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [grid] section
    if let Some(section) = ini.section(Some("grid")) {
        if let Some(v) = section.get("cell_size") {
            config.grid.cell_size = v
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|size| size.is_finite() && *size > 0.0)
                .ok_or_else(|| {
                    invalid("grid", "cell_size", v, "must be a positive number of meters")
                })?;
        }
        if let Some(v) = section.get("overlap") {
            config.grid.overlap = parse_bool(v);
        }
        if let Some(v) = section.get("scheme") {
            config.grid.scheme = v
                .parse::<IdScheme>()
                .map_err(|_| invalid("grid", "scheme", v, "must be 'geohash' or 'index'"))?;
        }
    }

    // [stream] section
    if let Some(section) = ini.section(Some("stream")) {
        if let Some(v) = section.get("buffer") {
            config.stream.buffer = v
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|buffer| *buffer > 0)
                .ok_or_else(|| invalid("stream", "buffer", v, "must be a positive integer"))?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = Some(expand_tilde(v));
            }
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub(super) fn parse_bool(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    v == "true" || v == "1" || v == "yes" || v == "on"
}

pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;
    use tempfile::TempDir;

    fn load(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");
        std::fs::write(&config_path, content).unwrap();
        ConfigFile::load_from(&config_path)
    }

    #[test]
    fn test_partial_config() {
        let config = load(
            r#"
[grid]
cell_size = 1000
"#,
        )
        .unwrap();

        assert_eq!(config.grid.cell_size, 1000.0);
        assert_eq!(config.grid.overlap, DEFAULT_OVERLAP);
        assert_eq!(config.grid.scheme, DEFAULT_SCHEME);
        assert_eq!(config.stream.buffer, DEFAULT_STREAM_BUFFER_SIZE);
    }

    #[test]
    fn test_full_config() {
        let config = load(
            r#"
[grid]
cell_size = 10.5
overlap = no
scheme = index

[stream]
buffer = 16

[logging]
file = /var/log/majortom.log
"#,
        )
        .unwrap();

        assert_eq!(config.grid.cell_size, 10.5);
        assert!(!config.grid.overlap);
        assert_eq!(config.grid.scheme, IdScheme::GridIndex);
        assert_eq!(config.stream.buffer, 16);
        assert_eq!(
            config.logging.file,
            Some(PathBuf::from("/var/log/majortom.log"))
        );
    }

    #[test]
    fn test_invalid_cell_size() {
        for bad in ["0", "-5", "abc", "inf"] {
            let err = load(&format!("[grid]\ncell_size = {}\n", bad)).unwrap_err();
            assert!(err.to_string().contains("cell_size"), "{}", err);
        }
    }

    #[test]
    fn test_invalid_scheme() {
        let err = load("[grid]\nscheme = h3\n").unwrap_err();
        assert!(err.to_string().contains("must be 'geohash' or 'index'"));
    }

    #[test]
    fn test_invalid_buffer() {
        let err = load("[stream]\nbuffer = 0\n").unwrap_err();
        assert!(matches!(err, ConfigFileError::InvalidValue { ref key, .. } if key == "buffer"));
    }

    #[test]
    fn test_empty_log_file_means_none() {
        let config = load("[logging]\nfile =\n").unwrap();
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_expand_tilde() {
        let path = expand_tilde("~/test/path");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(path, home.join("test/path"));
        }

        let path = expand_tilde("/absolute/path");
        assert_eq!(path, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_parse_bool_values() {
        for v in ["true", "TRUE", "1", "yes", " on "] {
            assert!(parse_bool(v), "{}", v);
        }
        for v in ["false", "0", "no", "off", ""] {
            assert!(!parse_bool(v), "{}", v);
        }
    }
}
