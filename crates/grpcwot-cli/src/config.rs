//! CLI configuration.
//!
//! Configuration is stored in TOML format at:
//! - Linux: `~/.config/grpcwot/config.toml`
//! - macOS: `~/Library/Application Support/grpcwot/config.toml`
//! - Windows: `%APPDATA%\grpcwot\config.toml`
//!
//! Every key is optional; command-line flags take precedence over the file.

use anyhow::{Context, Result, bail};
use grpcwot_td::{DEFAULT_CONTENT_TYPE, DEFAULT_HOST, DEFAULT_PORT, TdSettings};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default Thing Description file name.
pub const DEFAULT_TD_FILE: &str = "td.jsonld";

/// Default classification record file name.
pub const DEFAULT_CLASSIFICATION_FILE: &str = "classificationConfig.json";

/// CLI configuration.
///
/// # Examples
///
/// ```toml
/// [target]
/// host = "127.0.0.1"
/// port = 50051
/// content_type = "application/grpc+proto"
///
/// [output]
/// dir = "."
/// td_file = "td.jsonld"
/// classification_file = "classificationConfig.json"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    /// Where the described service is reachable
    #[serde(default)]
    pub target: TargetConfig,

    /// Where generated files are written
    #[serde(default)]
    pub output: OutputConfig,
}

/// Target endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TargetConfig {
    /// Host name or IP address
    pub host: String,

    /// TCP port
    pub port: u16,

    /// Form content type
    pub content_type: String,
}

/// Output file settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory
    pub dir: PathBuf,

    /// Thing Description file name
    pub td_file: String,

    /// Classification record file name
    pub classification_file: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            td_file: DEFAULT_TD_FILE.to_string(),
            classification_file: DEFAULT_CLASSIFICATION_FILE.to_string(),
        }
    }
}

impl Config {
    /// Loads the configuration from `path`, or from the default location.
    ///
    /// A missing default file yields the defaults; an explicitly given file
    /// must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (config_path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match default_config_path() {
                Some(path) => (path, false),
                None => {
                    debug!("No config directory on this platform, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        if !explicit && !config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file {}", config_path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("invalid config file {}", config_path.display()))?;
        debug!("Loaded config from {}", config_path.display());
        Ok(config)
    }

    /// Parses and validates a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a value is invalid.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.target.host.trim().is_empty() {
            bail!("target.host must not be empty");
        }
        if self.target.port == 0 {
            bail!("target.port must be greater than 0");
        }
        if self.target.content_type.trim().is_empty() {
            bail!("target.content_type must not be empty");
        }
        for (key, name) in [
            ("output.td_file", &self.output.td_file),
            ("output.classification_file", &self.output.classification_file),
        ] {
            if name.trim().is_empty() {
                bail!("{key} must not be empty");
            }
        }
        Ok(())
    }

    /// Returns the Thing Description settings of the target.
    #[must_use]
    pub fn td_settings(&self) -> TdSettings {
        TdSettings::default()
            .with_host(&self.target.host)
            .with_port(self.target.port)
            .with_content_type(&self.target.content_type)
    }

    /// Path of the Thing Description file.
    #[must_use]
    pub fn td_path(&self) -> PathBuf {
        self.output.dir.join(&self.output.td_file)
    }

    /// Path of the classification record file.
    #[must_use]
    pub fn classification_path(&self) -> PathBuf {
        self.output.dir.join(&self.output.classification_file)
    }
}

/// Gets the default configuration file path.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("grpcwot").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.target.host, "127.0.0.1");
        assert_eq!(config.target.port, 50051);
        assert_eq!(config.output.td_file, "td.jsonld");
        assert_eq!(config.output.classification_file, "classificationConfig.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::from_toml("[target]\nport = 8080\n").unwrap();
        assert_eq!(config.target.port, 8080);
        assert_eq!(config.target.host, "127.0.0.1");
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml(
            r#"
            [target]
            host = "lamp.local"
            port = 9000
            content_type = "application/grpc"

            [output]
            dir = "/tmp/things"
            td_file = "lamp.jsonld"
            classification_file = "lamp-classes.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.td_path(), PathBuf::from("/tmp/things/lamp.jsonld"));
        assert_eq!(config.classification_path(), PathBuf::from("/tmp/things/lamp-classes.json"));

        let settings = config.td_settings();
        assert_eq!(settings.href("Lamp", "Color"), "http://lamp.local:9000/Lamp/Color");
        assert_eq!(settings.content_type, "application/grpc");
    }

    #[test]
    fn test_config_validation_zero_port() {
        assert!(Config::from_toml("[target]\nport = 0\n").is_err());
    }

    #[test]
    fn test_config_validation_empty_file_name() {
        assert!(Config::from_toml("[output]\ntd_file = \"\"\n").is_err());
    }

    #[test]
    fn test_config_rejects_malformed_toml() {
        assert!(Config::from_toml("[target\nport = 1").is_err());
    }

    #[test]
    fn test_config_serialization_round_trip() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("[target]"));
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[target]\nhost = \"10.1.1.1\"\n").unwrap();
        assert_eq!(Config::load(Some(&path)).unwrap().target.host, "10.1.1.1");
    }

    #[test]
    fn test_default_config_path() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("grpcwot/config.toml"));
        }
    }
}
