//! Output filename derivation and writing results to disk.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{PipelineError, PipelineResult};
use crate::types::TargetFormat;

/// Derive the download name for `original` produced as `format`.
///
/// Conversions replace the extension (text after the last `.`); a name with
/// no `.` or nothing before it keeps the whole name. Compression appends.
///
/// ```
/// use squish_core::download::derive_output_name;
/// use squish_core::types::{CompressTarget, ImageTarget, TargetFormat};
///
/// let png = TargetFormat::Image(ImageTarget::Png);
/// assert_eq!(derive_output_name("photo.jpg", png), "photo.png");
///
/// let gz = TargetFormat::Compressed(CompressTarget::Gz);
/// assert_eq!(derive_output_name("report.pdf", gz), "report.pdf.gz");
/// ```
pub fn derive_output_name(original: &str, format: TargetFormat) -> String {
    match format {
        TargetFormat::Image(_) => {
            let stem = match original.rfind('.') {
                Some(idx) if idx > 0 => &original[..idx],
                _ => original,
            };
            format!("{stem}.{}", format.id())
        }
        TargetFormat::Compressed(_) => format!("{original}.{}", format.id()),
    }
}

/// Writes result bytes into a destination directory.
#[derive(Debug, Clone)]
pub struct Downloader {
    dir: PathBuf,
    overwrite: bool,
}

impl Downloader {
    /// Create a downloader writing into `dir`.
    pub fn new(dir: impl Into<PathBuf>, overwrite: bool) -> Self {
        Self {
            dir: dir.into(),
            overwrite,
        }
    }

    /// Create a downloader from the `[output]` settings.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.output_dir(), config.output.overwrite)
    }

    /// Destination directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `bytes` as `file_name` inside the destination directory.
    ///
    /// Any directory components in `file_name` are dropped.
    pub fn save(&self, file_name: &str, bytes: &[u8]) -> PipelineResult<PathBuf> {
        let base = Path::new(file_name)
            .file_name()
            .ok_or_else(|| PipelineError::Write {
                path: self.dir.join(file_name),
                message: "Invalid output file name".to_string(),
            })?;
        let path = self.dir.join(base);

        if path.exists() && !self.overwrite {
            return Err(PipelineError::OutputExists(path));
        }

        std::fs::create_dir_all(&self.dir).map_err(|e| PipelineError::Write {
            path: self.dir.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, bytes).map_err(|e| PipelineError::Write {
            path: path.clone(),
            message: e.to_string(),
        })?;

        tracing::info!("Saved {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }
}
