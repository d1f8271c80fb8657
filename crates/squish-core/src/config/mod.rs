//! Configuration management for Squish.
//!
//! Configuration is loaded from the platform config directory with defaults
//! for every field, so an empty or partial file is valid.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Squish.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Image conversion defaults
    pub convert: ConvertConfig,

    /// Compression defaults
    pub compress: CompressConfig,

    /// Resource limits
    pub limits: LimitsConfig,

    /// Download destination
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/rs.squish.squish/config.toml
    /// - Linux: ~/.config/squish/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\squish\config\config.toml
    ///
    /// Falls back to ~/.squish/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("rs", "squish", "squish")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".squish").join("config.toml")
            })
    }

    /// Get the resolved output directory (with ~ expansion).
    pub fn output_dir(&self) -> PathBuf {
        let path_str = self.output.dir.to_string_lossy();
        let expanded = shellexpand::tilde(&path_str);
        PathBuf::from(expanded.into_owned())
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CompressTarget, ImageTarget};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.convert.format, ImageTarget::Webp);
        assert_eq!(config.convert.quality, 80);
        assert_eq!(config.compress.format, CompressTarget::Gz);
        assert_eq!(config.limits.max_file_size_mb, 512);
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[convert]"));
        assert!(toml.contains("[compress]"));
        assert!(toml.contains("format = \"webp\""));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml_str("[compress]\nformat = \"br\"\n").unwrap();
        assert_eq!(config.compress.format, CompressTarget::Br);
        assert_eq!(config.compress.gzip_level, 6);
        assert_eq!(config.convert.quality, 80);
    }

    #[test]
    fn test_from_toml_str_validates() {
        let err = Config::from_toml_str("[convert]\nquality = 101\n").unwrap_err();
        assert!(err.to_string().contains("convert.quality"));
    }

    #[test]
    fn test_unknown_format_is_parse_error() {
        let err = Config::from_toml_str("[convert]\nformat = \"tga\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output]\noverwrite = true\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert!(config.output.overwrite);
    }

    #[test]
    fn test_output_dir_expands_tilde() {
        let mut config = Config::default();
        config.output.dir = PathBuf::from("~/squished");
        assert!(!config.output_dir().to_string_lossy().starts_with('~'));
    }
}
