/// Loading of the scene configuration file.
use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use fcstack_core::SceneConfig;
use log::{debug, info};

use crate::error::AppError;

/// Load the scene configuration.
///
/// An explicit `path` must exist. Without one, the per-user
/// `config.toml` is used when present and built-in defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<SceneConfig, AppError> {
    if let Some(path) = path {
        return read_config(path);
    }

    match default_config_path() {
        Some(path) if path.is_file() => read_config(&path),
        path => {
            debug!(searched:? = path; "No config file found, using defaults");
            Ok(SceneConfig::default())
        }
    }
}

/// `<config dir>/fcstack/config.toml` for the current platform
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "fcstack").map(|dirs| dirs.config_dir().join("config.toml"))
}

fn read_config(path: &Path) -> Result<SceneConfig, AppError> {
    let source = fs::read_to_string(path).map_err(|source| AppError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    let config = toml::from_str(&source).map_err(|source| AppError::ParseConfig {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path:? = path; "Loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_explicit_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "start_offset = 1.5\n\n[[layers]]\ntag = \"Gasket\"\nthickness = 0.08\ncolor = 0x00ffff"
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.start_offset, 1.5);
        assert_eq!(config.layers.len(), 1);
        assert_eq!(config.layers[0].tag, "Gasket");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, AppError::ReadConfig { .. }));
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[footprint]\nwidth = \"wide\"").unwrap();
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, AppError::ParseConfig { .. }));
    }
}
