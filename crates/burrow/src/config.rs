//! Filesystem initialization settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// The file is not a valid config
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        /// Config file path
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

/// Settings applied when a [`VirtualFs`](crate::VirtualFs) is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FsConfig {
    /// Directories created at startup (with their ancestors)
    pub initial_dirs: Vec<String>,
    /// Working directory after startup
    pub cwd: String,
}

impl Default for FsConfig {
    fn default() -> Self {
        Self {
            initial_dirs: vec!["/memories".to_string(), "/artifacts".to_string()],
            cwd: "/".to_string(),
        }
    }
}

impl FsConfig {
    /// A config with no initial directories.
    pub fn empty() -> Self {
        Self {
            initial_dirs: Vec::new(),
            ..Default::default()
        }
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dirs() {
        let config = FsConfig::default();
        assert_eq!(config.initial_dirs, vec!["/memories", "/artifacts"]);
        assert_eq!(config.cwd, "/");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = FsConfig::from_json(r#"{"cwd": "/artifacts"}"#).unwrap();
        assert_eq!(config.cwd, "/artifacts");
        assert_eq!(config.initial_dirs.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = FsConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_unknown_json_type_is_error() {
        assert!(FsConfig::from_json(r#"{"initial_dirs": "/memories"}"#).is_err());
    }

    #[test]
    fn test_empty() {
        assert!(FsConfig::empty().initial_dirs.is_empty());
    }
}
