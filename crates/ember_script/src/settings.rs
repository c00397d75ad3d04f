//! Settings management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an alternative settings file.
pub const CONFIG_ENV: &str = "EMBER_CONFIG";

/// Settings file looked up in the working directory when `EMBER_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "ember.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Which function to call and where to find it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Module search directory, relative to the working directory.
    pub search_path: String,
    pub module: String,
    pub function: String,
    /// Upper bound on runtime heap usage in bytes. Unlimited when absent.
    pub memory_limit: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search_path: "./py".to_string(),
            module: "main".to_string(),
            function: "hello_world".to_string(),
            memory_limit: None,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            tracing::debug!("no settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `$EMBER_CONFIG`, falling back to `./ember.json`.
    pub fn discover() -> Result<Self, SettingsError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_demo_module() {
        let settings = Settings::default();
        assert_eq!(settings.search_path, "./py");
        assert_eq!(settings.module, "main");
        assert_eq!(settings.function, "hello_world");
        assert_eq!(settings.memory_limit, None);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = Settings::load(Path::new("tests/fixtures/does-not-exist.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let settings = Settings::load(Path::new("tests/fixtures/settings.json")).unwrap();
        assert_eq!(settings.function, "explode");
        assert_eq!(settings.memory_limit, Some(16 * 1024 * 1024));
        assert_eq!(settings.search_path, "./py");
        assert_eq!(settings.module, "main");
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let err = Settings::load(Path::new("tests/fixtures/broken.js")).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }
}
