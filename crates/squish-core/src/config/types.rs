//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::{CompressTarget, ImageTarget};

/// Image conversion defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Target format ("png", "jpeg" or "webp")
    pub format: ImageTarget,

    /// Quality (0-100), used by lossy encoders only
    pub quality: u8,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            format: ImageTarget::Webp,
            quality: 80,
        }
    }
}

/// Compression defaults and codec tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressConfig {
    /// Target format ("gz" or "br")
    pub format: CompressTarget,

    /// Deflate level (0-9)
    pub gzip_level: u32,

    /// Brotli quality (0-11)
    pub brotli_quality: u32,

    /// Brotli window size as log2 (10-24)
    pub brotli_window: u32,
}

impl Default for CompressConfig {
    fn default() -> Self {
        Self {
            format: CompressTarget::Gz,
            gzip_level: 6,
            brotli_quality: 11,
            brotli_window: 22,
        }
    }
}

/// Resource limits to protect against problematic inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum input file size in megabytes
    pub max_file_size_mb: u64,

    /// Maximum image dimension (width or height)
    pub max_image_dimension: u32,

    /// Decode timeout in milliseconds
    pub decode_timeout_ms: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 512,
            max_image_dimension: 16384,
            decode_timeout_ms: 10000,
        }
    }
}

/// Where and how downloaded results are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination directory (supports `~`)
    pub dir: PathBuf,

    /// Replace existing files with the same derived name
    pub overwrite: bool,

    /// Pretty-print JSON status reports
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            overwrite: false,
            pretty: false,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
