//! Error types for the Squish conversion and compression pipeline.
//!
//! Errors are organized by stage so that status messages can name the file,
//! the stage, and the specific issue.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Squish operations.
#[derive(Error, Debug)]
pub enum SquishError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Pipeline processing errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Image decoding failed (corrupt or unsupported input)
    #[error("Decode error for {name}: {message}")]
    Decode { name: String, message: String },

    /// Re-encoding to the target image format failed
    #[error("Encode error for {name}: {message}")]
    Encode { name: String, message: String },

    /// A compression codec failed
    #[error("Compression failed for {name}: {message}")]
    Compress { name: String, message: String },

    /// Operation timed out
    #[error("Timeout in {stage} stage for {name} after {timeout_ms}ms")]
    Timeout {
        name: String,
        stage: String,
        timeout_ms: u64,
    },

    /// File exceeds size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// Image dimensions exceed limit
    #[error("Image too large: {name} ({width}x{height} > {max_dim})")]
    ImageTooLarge {
        name: String,
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// Unknown target format identifier
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Format is known but its codec failed to initialize
    #[error("Format {format} is unavailable: {reason}")]
    FormatUnavailable { format: String, reason: String },

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Reading the input file failed
    #[error("Cannot read {path}: {message}")]
    Read { path: PathBuf, message: String },

    /// Download target already exists and overwriting is disabled
    #[error("Output already exists: {0} (enable overwrite to replace it)")]
    OutputExists(PathBuf),

    /// Writing the downloaded artifact failed
    #[error("Cannot write {path}: {message}")]
    Write { path: PathBuf, message: String },
}

/// Convenience type alias for Squish results.
pub type Result<T> = std::result::Result<T, SquishError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
