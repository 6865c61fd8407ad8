//! Configuration file management.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sensordb_store::StoreOptions;

/// Longest busy timeout accepted in the config file (one minute).
pub const MAX_BUSY_TIMEOUT_MS: u64 = 60_000;

/// Configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage settings.
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from the default path, or defaults if it doesn't exist.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = default_config_path();
        if path.exists() {
            Self::load_validated(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Read {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.as_ref().to_path_buf(),
            source: e,
        })
    }

    /// Load and validate configuration from a file.
    pub fn load_validated<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let errors = self.storage.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file path.
    pub path: PathBuf,
    /// Milliseconds to wait on a locked database before giving up.
    pub busy_timeout_ms: u64,
    /// Use write-ahead logging.
    pub wal: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let options = StoreOptions::default();
        Self {
            path: sensordb_store::default_db_path(),
            busy_timeout_ms: options.busy_timeout.as_millis() as u64,
            wal: options.wal,
        }
    }
}

impl StorageConfig {
    /// Validate storage configuration.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.path.as_os_str().is_empty() {
            errors.push(ValidationError {
                field: "storage.path".to_string(),
                message: "database path cannot be empty".to_string(),
            });
        }

        if self.busy_timeout_ms > MAX_BUSY_TIMEOUT_MS {
            errors.push(ValidationError {
                field: "storage.busy_timeout_ms".to_string(),
                message: format!(
                    "busy timeout {} is too long (maximum {} ms)",
                    self.busy_timeout_ms, MAX_BUSY_TIMEOUT_MS
                ),
            });
        }

        errors
    }

    /// Options to open the store with.
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            busy_timeout: Duration::from_millis(self.busy_timeout_ms),
            wal: self.wal,
        }
    }
}

/// Default configuration file path.
///
/// - Linux: `~/.config/sensordb/config.toml`
/// - macOS: `~/Library/Application Support/sensordb/config.toml`
/// - Windows: `C:\Users\<user>\AppData\Roaming\sensordb\config.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sensordb")
        .join("config.toml")
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    Validation(Vec<ValidationError>),
}

/// A single validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field path (e.g., `storage.path`).
    pub field: String,
    /// Description of the validation failure.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.storage.store_options(), StoreOptions::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            [storage]
            path = "/tmp/sensors.db"
            busy_timeout_ms = 250
            wal = false
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.path, PathBuf::from("/tmp/sensors.db"));
        assert_eq!(
            config.storage.store_options(),
            StoreOptions {
                busy_timeout: Duration::from_millis(250),
                wal: false,
            }
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[storage]\nwal = false\n").unwrap();
        assert!(!config.storage.wal);
        assert_eq!(config.storage.path, sensordb_store::default_db_path());

        let empty: Config = toml::from_str("").unwrap();
        assert_eq!(empty, Config::default());
    }

    #[test]
    fn test_validation_collects_errors() {
        let config = Config {
            storage: StorageConfig {
                path: PathBuf::new(),
                busy_timeout_ms: MAX_BUSY_TIMEOUT_MS + 1,
                wal: true,
            },
        };

        let err = config.validate().unwrap_err();
        let ConfigError::Validation(errors) = &err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "storage.path");
        assert_eq!(errors[1].field, "storage.busy_timeout_ms");
        assert!(err.to_string().contains("storage.path: database path cannot be empty"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage\npath = ").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_validated_rejects_bad_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage]\nbusy_timeout_ms = 999999\n").unwrap();

        let err = Config::load_validated(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
