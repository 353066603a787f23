//! Configuration types.
//!
//! Configuration is optional. When no config file exists, defaults apply.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Default pause between dismissing the first dialog and presenting the second.
const DEFAULT_SETTLE_DELAY_MS: u64 = 500;

/// Runtime configuration for a menu construct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuConfig {
    /// Milliseconds to wait after dismissing the initial dialog before
    /// presenting the secondary one. Zero presents immediately.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

fn default_settle_delay_ms() -> u64 {
    DEFAULT_SETTLE_DELAY_MS
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
        }
    }
}

impl MenuConfig {
    /// Create a config with a custom settle delay.
    pub fn with_settle_delay(delay: Duration) -> Self {
        Self {
            settle_delay_ms: u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// The settle delay as a `Duration`.
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("duet"))
}

/// Get the path to config.toml.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

/// Load the config from the default location.
///
/// A missing file yields the default config.
pub fn load_config() -> Result<MenuConfig, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(MenuConfig::default());
    }
    load_config_from(&path)
}

/// Load the config from an explicit path.
pub fn load_config_from(path: &Path) -> Result<MenuConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
    let config: MenuConfig = toml::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))?;
    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settle_delay() {
        let config = MenuConfig::default();
        assert_eq!(config.settle_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_with_settle_delay_saturates() {
        let config = MenuConfig::with_settle_delay(Duration::from_millis(250));
        assert_eq!(config.settle_delay_ms, 250);

        let config = MenuConfig::with_settle_delay(Duration::MAX);
        assert_eq!(config.settle_delay_ms, u64::MAX);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "settle_delay_ms = 120").unwrap();

        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.settle_delay_ms, 120);
    }

    #[test]
    fn test_missing_key_uses_default() {
        let file = tempfile::NamedTempFile::new().unwrap();

        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config, MenuConfig::default());
    }

    #[test]
    fn test_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "settle_delay_ms = \"soon\"").unwrap();

        let result = load_config_from(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config_from(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
