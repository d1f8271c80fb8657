//! Reading files from disk into a [`PendingInput`], with size checks.

use std::path::Path;

use crate::config::LimitsConfig;
use crate::error::PipelineError;
use crate::types::PendingInput;

/// Validates and loads files before intake.
#[derive(Debug, Clone)]
pub struct Validator {
    limits: LimitsConfig,
}

impl Validator {
    /// Create a new validator with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Check a file exists, is a regular file, and is within the size limit.
    pub fn validate(&self, path: &Path) -> Result<u64, PipelineError> {
        if !path.exists() {
            return Err(PipelineError::FileNotFound(path.to_path_buf()));
        }

        let metadata = std::fs::metadata(path).map_err(|e| PipelineError::Read {
            path: path.to_path_buf(),
            message: format!("Cannot read metadata: {}", e),
        })?;

        if !metadata.is_file() {
            return Err(PipelineError::Read {
                path: path.to_path_buf(),
                message: "Not a regular file".to_string(),
            });
        }

        let max_bytes = self.limits.max_file_size_mb.saturating_mul(1024 * 1024);
        if metadata.len() > max_bytes {
            return Err(PipelineError::FileTooLarge {
                path: path.to_path_buf(),
                size_mb: metadata.len() / (1024 * 1024),
                max_mb: self.limits.max_file_size_mb,
            });
        }

        Ok(metadata.len())
    }

    /// Validate `path` and read it whole.
    ///
    /// The display name is the file name; the media type is guessed from the
    /// extension, then from the content.
    pub async fn load(&self, path: &Path) -> Result<PendingInput, PipelineError> {
        self.validate(path)?;

        let bytes = tokio::fs::read(path).await.map_err(|e| PipelineError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        let input = PendingInput::guessed(name, bytes);
        tracing::debug!(
            "Loaded {:?} ({} bytes, {})",
            input.name,
            input.size(),
            input.media_type
        );
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let validator = Validator::new(LimitsConfig::default());
        let err = validator.validate(Path::new("/no/such/file.bin")).unwrap_err();
        assert!(matches!(err, PipelineError::FileNotFound(_)));
    }

    #[test]
    fn test_directory_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let validator = Validator::new(LimitsConfig::default());
        let err = validator.validate(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Not a regular file"));
    }

    #[test]
    fn test_size_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.bin");
        std::fs::write(&path, vec![0u8; 1024 * 1024 + 1]).unwrap();

        let validator = Validator::new(LimitsConfig {
            max_file_size_mb: 1,
            ..LimitsConfig::default()
        });
        let err = validator.validate(&path).unwrap_err();
        assert!(matches!(err, PipelineError::FileTooLarge { max_mb: 1, .. }));
    }

    #[test]
    fn test_huge_size_limit_does_not_overflow() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.bin");
        std::fs::write(&path, b"abc").unwrap();

        let validator = Validator::new(LimitsConfig {
            max_file_size_mb: u64::MAX / 1024,
            ..LimitsConfig::default()
        });
        assert_eq!(validator.validate(&path).unwrap(), 3);
    }

    #[tokio::test]
    async fn test_load_guesses_media_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "plain text").unwrap();

        let input = Validator::new(LimitsConfig::default())
            .load(&path)
            .await
            .unwrap();
        assert_eq!(input.name, "notes.txt");
        assert_eq!(input.media_type, "application/octet-stream");
        assert_eq!(input.size(), 10);
    }
}
