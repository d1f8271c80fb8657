//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.convert.quality > 100 {
            return Err(ConfigError::ValidationError(
                "convert.quality must be between 0 and 100".into(),
            ));
        }
        if self.compress.gzip_level > 9 {
            return Err(ConfigError::ValidationError(
                "compress.gzip_level must be between 0 and 9".into(),
            ));
        }
        if self.compress.brotli_quality > 11 {
            return Err(ConfigError::ValidationError(
                "compress.brotli_quality must be between 0 and 11".into(),
            ));
        }
        if !(10..=24).contains(&self.compress.brotli_window) {
            return Err(ConfigError::ValidationError(
                "compress.brotli_window must be between 10 and 24".into(),
            ));
        }
        if self.limits.max_file_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_file_size_mb must be > 0".into(),
            ));
        }
        if self.limits.max_image_dimension == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_image_dimension must be > 0".into(),
            ));
        }
        if self.limits.decode_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "limits.decode_timeout_ms must be > 0".into(),
            ));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(
                "logging.format must be \"pretty\" or \"json\"".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_quality_over_100() {
        let mut config = Config::default();
        config.convert.quality = 101;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("convert.quality"));
    }

    #[test]
    fn test_validate_rejects_gzip_level() {
        let mut config = Config::default();
        config.compress.gzip_level = 10;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("gzip_level"));
    }

    #[test]
    fn test_validate_rejects_brotli_window() {
        let mut config = Config::default();
        config.compress.brotli_window = 9;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("brotli_window"));

        config.compress.brotli_window = 25;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.limits.decode_timeout_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("decode_timeout_ms"));
    }

    #[test]
    fn test_validate_rejects_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("logging.format"));
    }
}
