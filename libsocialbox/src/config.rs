//! Configuration management for SocialBox

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};
use crate::types::PlatformKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub transport: TransportConfig,
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the per-key JSON state files
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Minimum simulated round-trip latency in milliseconds
    pub min_latency_ms: u64,
    /// Maximum simulated round-trip latency in milliseconds
    pub max_latency_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Platforms preselected when composing without an explicit choice
    pub platforms: Vec<String>,
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        Ok(config)
    }

    /// The storage directory with tilde expansion applied
    pub fn storage_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.storage.path).to_string())
    }

    /// Default platforms parsed into kinds, skipping unknown names
    pub fn default_platforms(&self) -> Vec<PlatformKind> {
        self.defaults
            .platforms
            .iter()
            .filter_map(|name| match name.parse() {
                Ok(kind) => Some(kind),
                Err(_) => {
                    tracing::warn!(platform = %name, "ignoring unknown platform in config");
                    None
                }
            })
            .collect()
    }

    /// Create a default configuration
    pub fn default_config() -> Self {
        Self {
            storage: StorageConfig {
                path: "~/.local/share/socialbox".to_string(),
            },
            transport: TransportConfig {
                min_latency_ms: 800,
                max_latency_ms: 1500,
            },
            defaults: DefaultsConfig {
                platforms: vec!["facebook".to_string()],
            },
        }
    }
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("SOCIALBOX_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("socialbox").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default_config();
        assert_eq!(config.transport.min_latency_ms, 800);
        assert_eq!(config.transport.max_latency_ms, 1500);
        assert_eq!(config.defaults.platforms, vec!["facebook"]);
    }

    #[test]
    fn test_load_from_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[storage]
path = "/tmp/socialbox-test"

[transport]
min_latency_ms = 0
max_latency_ms = 5

[defaults]
platforms = ["twitter", "linkedin"]
"#
        )
        .unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.storage.path, "/tmp/socialbox-test");
        assert_eq!(config.transport.max_latency_ms, 5);
        assert_eq!(config.defaults.platforms.len(), 2);
    }

    #[test]
    fn test_default_platforms_skips_unknown() {
        let mut config = Config::default_config();
        config.defaults.platforms =
            vec!["twitter".to_string(), "myspace".to_string(), "LinkedIn".to_string()];
        assert_eq!(
            config.default_platforms(),
            vec![PlatformKind::Twitter, PlatformKind::LinkedIn]
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("does-not-exist.toml");
        assert!(Config::load_from_path(&path).is_err());
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not valid toml [[[").unwrap();
        assert!(Config::load_from_path(&path).is_err());
    }

    #[test]
    fn test_config_round_trip() {
        let config = Config::default_config();
        let serialized = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.storage.path, config.storage.path);
        assert_eq!(parsed.transport.min_latency_ms, config.transport.min_latency_ms);
    }
}
