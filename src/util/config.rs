use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use serde_json::Error as SerdeError;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "FlightFarePredictor";
const APP_NAME: &str = "FlightFarePredictor";

pub const MODEL_ENV: &str = "FLIGHT_FARE_MODEL";
pub const COLUMNS_ENV: &str = "FLIGHT_FARE_COLUMNS";
pub const DEFAULT_MODEL_FILE: &str = "artifacts/random_forest_model.json";
pub const DEFAULT_COLUMNS_FILE: &str = "artifacts/model_columns.json";

/// Where the prediction artifacts live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub columns_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_FILE),
            columns_path: PathBuf::from(DEFAULT_COLUMNS_FILE),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    model_path: Option<PathBuf>,
    #[serde(default)]
    columns_path: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse {path}: {source}")]
    Serde { path: PathBuf, source: SerdeError },
}

pub fn config_file() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join("config.json"))
}

pub fn data_dir() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.data_local_dir().to_path_buf())
}

impl AppConfig {
    /// Environment variables win over `config.json`, which wins over the defaults.
    pub fn load() -> Self {
        let file = config_file();
        match Self::resolve(|key| std::env::var(key).ok(), file.as_deref()) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unreadable config file");
                Self::resolve(|key| std::env::var(key).ok(), None).unwrap_or_default()
            }
        }
    }

    pub fn resolve(
        env: impl Fn(&str) -> Option<String>,
        file: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let from_file = match file {
            Some(path) if path.exists() => read_config_file(path)?,
            _ => ConfigFile::default(),
        };
        let defaults = Self::default();

        let pick = |key: &str, configured: Option<PathBuf>, fallback: PathBuf| {
            env(key)
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
                .or(configured)
                .unwrap_or(fallback)
        };

        Ok(Self {
            model_path: pick(MODEL_ENV, from_file.model_path, defaults.model_path),
            columns_path: pick(COLUMNS_ENV, from_file.columns_path, defaults.columns_path),
        })
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| ConfigError::Serde {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn falls_back_to_defaults() {
        let config = AppConfig::resolve(no_env, None).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn file_overrides_defaults_field_by_field() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "model_path": "/models/forest.json" }"#).unwrap();

        let config = AppConfig::resolve(no_env, Some(&path)).unwrap();
        assert_eq!(config.model_path, PathBuf::from("/models/forest.json"));
        assert_eq!(config.columns_path, PathBuf::from(DEFAULT_COLUMNS_FILE));
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{ "model_path": "/models/forest.json", "columns_path": "/models/cols.json" }"#,
        )
        .unwrap();

        let env = |key: &str| (key == COLUMNS_ENV).then(|| "/env/cols.json".to_string());
        let config = AppConfig::resolve(env, Some(&path)).unwrap();
        assert_eq!(config.model_path, PathBuf::from("/models/forest.json"));
        assert_eq!(config.columns_path, PathBuf::from("/env/cols.json"));
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempdir().unwrap();
        let config = AppConfig::resolve(no_env, Some(&dir.path().join("nope.json"))).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ model_path").unwrap();
        let err = AppConfig::resolve(no_env, Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Serde { .. }));
    }
}
