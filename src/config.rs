//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\literalura\config.toml
//! - macOS: ~/Library/Application Support/literalura/config.toml
//! - Linux: ~/.config/literalura/config.toml
//!
//! The config file is human-readable and editable. Every field has a
//! default, so a missing file or a partial file is always usable.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote catalog settings
    pub catalog: CatalogConfig,

    /// Local store settings
    pub store: StoreConfig,
}

/// Remote catalog (Gutendex) settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Books endpoint; searches are sent to `{base_url}/?search=...`
    pub base_url: String,

    /// Connect and read timeout in seconds
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://gutendex.com/books".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Local store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Database file (None = literalura.db in the working directory)
    pub path: Option<PathBuf>,

    /// Upper bound for every individual store call, in milliseconds
    pub timeout_ms: u64,

    /// Load the built-in sample catalog when the store is empty
    pub seed_on_startup: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            timeout_ms: 5000,
            seed_on_startup: true,
        }
    }
}

impl StoreConfig {
    /// Store call bound as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("literalura"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    load_from(&path)
}

/// Load configuration from a specific file, with the same fallbacks as [`load`].
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::debug!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to the OS config directory
///
/// Returns the path that was written.
pub fn save(config: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)?;
    Ok(path)
}

/// Save configuration to a specific file
///
/// Creates the parent directory if it doesn't exist.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[catalog]"));
        assert!(toml.contains("[store]"));
        assert!(toml.contains("gutendex.com"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[store]
path = "/var/lib/literalura/catalog.db"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(
            config.store.path,
            Some(PathBuf::from("/var/lib/literalura/catalog.db"))
        );
        assert_eq!(config.store.timeout_ms, 5000);
        assert!(config.store.seed_on_startup);
        assert_eq!(config.catalog, CatalogConfig::default());
    }

    #[test]
    fn test_store_timeout_duration() {
        let store = StoreConfig {
            timeout_ms: 250,
            ..StoreConfig::default()
        };
        assert_eq!(store.timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.catalog.base_url = "http://localhost:8000/books".to_string();
        config.store.seed_on_startup = false;

        save_to(&config, &path).unwrap();
        assert!(!path.with_extension("toml.tmp").exists());
        assert_eq!(load_from(&path), config);
    }

    #[test]
    fn test_missing_or_broken_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert_eq!(load_from(&missing), Config::default());

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[store\ntimeout_ms = ").unwrap();
        assert_eq!(load_from(&broken), Config::default());
    }
}
