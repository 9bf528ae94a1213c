//! Global configuration model for the compose engine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DockpanelError, Result};

/// Root configuration for the compose engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Environment file referenced by every service in strict mode.
    pub env_file: String,
    /// Whether newly created documents start in strict mode.
    pub strict_by_default: bool,
    /// Base directory for persisted document snapshots.
    pub data_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            env_file: crate::constants::DEFAULT_ENV_FILE.to_owned(),
            strict_by_default: false,
            data_dir: crate::constants::data_dir().clone(),
        }
    }
}

impl EngineConfig {
    /// Loads a configuration from a JSON file.
    ///
    /// Missing fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON,
    /// or declares an empty `env_file`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| DockpanelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw)?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if self.env_file.trim().is_empty() {
            return Err(DockpanelError::Config {
                message: "env_file must not be empty".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_uses_dot_env() {
        let config = EngineConfig::default();
        assert_eq!(config.env_file, ".env");
        assert!(!config.strict_by_default);
    }

    #[test]
    fn from_file_fills_missing_fields() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, r#"{{"strict_by_default": true}}"#).expect("write");

        let config = EngineConfig::from_file(file.path()).expect("should load");
        assert!(config.strict_by_default);
        assert_eq!(config.env_file, ".env");
    }

    #[test]
    fn from_file_rejects_empty_env_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, r#"{{"env_file": "  "}}"#).expect("write");

        let err = EngineConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("env_file"), "got: {err}");
    }

    #[test]
    fn from_file_missing_path_is_io_error() {
        let err = EngineConfig::from_file(Path::new("/nonexistent/dockpanel.json")).unwrap_err();
        assert!(matches!(err, DockpanelError::Io { .. }));
    }
}
