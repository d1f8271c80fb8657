//! Core data types for the Squish pipeline.
//!
//! These describe the session's modes, the file staged for processing, the
//! options captured for one run, and what a run produces.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::PipelineError;

/// Media type used when nothing better can be determined.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// The two mutually exclusive processing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Re-encode an image into another raster format
    #[default]
    Convert,
    /// Compress any file with a general-purpose codec
    Compress,
}

impl Mode {
    /// The file filter advertised to pickers for this mode.
    pub fn accept_filter(self) -> &'static str {
        match self {
            Mode::Convert => "image/*",
            Mode::Compress => "*/*",
        }
    }

    /// Whether a file with `media_type` passes this mode's filter.
    pub fn accepts(self, media_type: &str) -> bool {
        match self {
            Mode::Convert => media_type.starts_with("image/"),
            Mode::Compress => true,
        }
    }

    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Mode::Convert => Mode::Compress,
            Mode::Compress => Mode::Convert,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Convert => write!(f, "convert"),
            Mode::Compress => write!(f, "compress"),
        }
    }
}

/// Raster formats an image can be converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageTarget {
    Png,
    Jpeg,
    Webp,
}

impl ImageTarget {
    /// All conversion targets, in menu order.
    pub const ALL: [ImageTarget; 3] = [ImageTarget::Png, ImageTarget::Jpeg, ImageTarget::Webp];

    /// Identifier used for file extensions and config values.
    pub fn id(self) -> &'static str {
        match self {
            ImageTarget::Png => "png",
            ImageTarget::Jpeg => "jpeg",
            ImageTarget::Webp => "webp",
        }
    }

    /// Declared media type of an artifact in this format.
    pub fn media_type(self) -> &'static str {
        match self {
            ImageTarget::Png => "image/png",
            ImageTarget::Jpeg => "image/jpeg",
            ImageTarget::Webp => "image/webp",
        }
    }

    /// Whether the encoder honours a quality setting.
    ///
    /// The WebP encoder available here is lossless-only.
    pub fn supports_quality(self) -> bool {
        matches!(self, ImageTarget::Jpeg)
    }

    pub(crate) fn image_format(self) -> image::ImageFormat {
        match self {
            ImageTarget::Png => image::ImageFormat::Png,
            ImageTarget::Jpeg => image::ImageFormat::Jpeg,
            ImageTarget::Webp => image::ImageFormat::WebP,
        }
    }

    /// Parse an identifier (case-insensitive, `jpg` accepted).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpeg" | "jpg" => Some(Self::Jpeg),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }
}

/// General-purpose compression codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressTarget {
    /// Deflate in a gzip container
    Gz,
    /// Brotli stream
    Br,
}

impl CompressTarget {
    /// All compression targets, in menu order.
    pub const ALL: [CompressTarget; 2] = [CompressTarget::Gz, CompressTarget::Br];

    /// Identifier used for file extensions and config values.
    pub fn id(self) -> &'static str {
        match self {
            CompressTarget::Gz => "gz",
            CompressTarget::Br => "br",
        }
    }

    /// Declared media type of an artifact in this format.
    pub fn media_type(self) -> &'static str {
        match self {
            CompressTarget::Gz => "application/gzip",
            CompressTarget::Br => "application/x-brotli",
        }
    }

    /// Parse an identifier (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gz" | "gzip" => Some(Self::Gz),
            "br" | "brotli" => Some(Self::Br),
            _ => None,
        }
    }
}

/// The format a run produces, tagged by mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetFormat {
    Image(ImageTarget),
    Compressed(CompressTarget),
}

impl TargetFormat {
    /// Identifier used for file extensions.
    pub fn id(self) -> &'static str {
        match self {
            TargetFormat::Image(t) => t.id(),
            TargetFormat::Compressed(t) => t.id(),
        }
    }

    /// Upper-cased identifier used in status lines.
    pub fn label(self) -> String {
        self.id().to_uppercase()
    }

    pub fn media_type(self) -> &'static str {
        match self {
            TargetFormat::Image(t) => t.media_type(),
            TargetFormat::Compressed(t) => t.media_type(),
        }
    }

    /// The mode that produces this format.
    pub fn mode(self) -> Mode {
        match self {
            TargetFormat::Image(_) => Mode::Convert,
            TargetFormat::Compressed(_) => Mode::Compress,
        }
    }

    /// Parse an identifier in the context of `mode`.
    pub fn parse(mode: Mode, s: &str) -> Result<Self, PipelineError> {
        let parsed = match mode {
            Mode::Convert => ImageTarget::parse(s).map(TargetFormat::Image),
            Mode::Compress => CompressTarget::parse(s).map(TargetFormat::Compressed),
        };
        parsed.ok_or_else(|| PipelineError::UnsupportedFormat(format!("{s} (mode: {mode})")))
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Snapshot of the controls, taken once when a run starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessingOptions {
    /// Format to produce
    pub format: TargetFormat,
    /// Lossy quality fraction in [0.0, 1.0]; ignored outside image conversion
    pub quality: f32,
}

impl ProcessingOptions {
    /// Options for converting to `target` at a 0-100 quality setting.
    pub fn convert(target: ImageTarget, quality_percent: u8) -> Self {
        Self {
            format: TargetFormat::Image(target),
            quality: f32::from(quality_percent.min(100)) / 100.0,
        }
    }

    /// Options for compressing with `target`.
    pub fn compress(target: CompressTarget) -> Self {
        Self {
            format: TargetFormat::Compressed(target),
            quality: 1.0,
        }
    }
}

/// The file currently staged for processing.
#[derive(Debug, Clone)]
pub struct PendingInput {
    /// Display name, including any extension
    pub name: String,
    /// Declared media type (e.g. "image/jpeg")
    pub media_type: String,
    /// Full file content
    pub bytes: Arc<[u8]>,
    /// Generation token stamped by the session at intake
    pub(crate) generation: u64,
}

impl PendingInput {
    /// Create an input from a name, declared media type and content.
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
            generation: 0,
        }
    }

    /// Create an input whose media type is guessed from its name, then content.
    pub fn guessed(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let media_type = guess_media_type(&name, &bytes).to_string();
        Self::new(name, media_type, bytes)
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Guess a media type from the file extension, then from magic bytes.
pub fn guess_media_type(name: &str, bytes: &[u8]) -> &'static str {
    image::ImageFormat::from_path(name)
        .or_else(|_| image::guess_format(bytes))
        .map(|format| format.to_mime_type())
        .unwrap_or(OCTET_STREAM)
}

/// Bytes produced by a successful run.
#[derive(Debug, Clone)]
pub struct ResultArtifact {
    /// Encoded or compressed output
    pub bytes: Arc<[u8]>,
    /// Declared media type of `bytes`
    pub media_type: &'static str,
    /// Format the artifact was produced for
    pub format: TargetFormat,
    /// Pixel dimensions, for image artifacts
    pub dimensions: Option<(u32, u32)>,
    /// Generation of the input this was produced from
    pub(crate) source_generation: u64,
}

impl ResultArtifact {
    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Human-readable summary of a run's size delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    /// Name of the processed file
    pub file_name: String,
    /// Target format identifier
    pub format: String,
    /// Input size in bytes
    pub original_size: u64,
    /// Output size in bytes
    pub new_size: u64,
    /// `100 - new/original * 100`, negative when the output grew
    pub reduction_percent: f64,
    /// e.g. "Converted to WEBP | 2.00 MB -> 1.10 MB | Saved 45.0%"
    pub summary: String,
}

/// Which presentation the front end should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Presentation {
    /// Nothing processed yet: centered picker only
    #[default]
    Empty,
    /// A result is available for preview and download
    Output,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_accept_filter() {
        assert_eq!(Mode::Convert.accept_filter(), "image/*");
        assert_eq!(Mode::Compress.accept_filter(), "*/*");
        assert!(Mode::Convert.accepts("image/png"));
        assert!(!Mode::Convert.accepts("text/plain"));
        assert!(Mode::Compress.accepts("text/plain"));
    }

    #[test]
    fn test_target_parse_respects_mode() {
        assert_eq!(
            TargetFormat::parse(Mode::Convert, "JPG").unwrap(),
            TargetFormat::Image(ImageTarget::Jpeg)
        );
        assert_eq!(
            TargetFormat::parse(Mode::Compress, "br").unwrap(),
            TargetFormat::Compressed(CompressTarget::Br)
        );
        assert!(TargetFormat::parse(Mode::Convert, "gz").is_err());
    }

    #[test]
    fn test_target_label_and_mode() {
        let webp = TargetFormat::Image(ImageTarget::Webp);
        assert_eq!(webp.label(), "WEBP");
        assert_eq!(webp.media_type(), "image/webp");
        assert_eq!(webp.mode(), Mode::Convert);
        assert_eq!(TargetFormat::Compressed(CompressTarget::Gz).mode(), Mode::Compress);
    }

    #[test]
    fn test_convert_options_quality_fraction() {
        let options = ProcessingOptions::convert(ImageTarget::Webp, 80);
        assert!((options.quality - 0.8).abs() < f32::EPSILON);

        let clamped = ProcessingOptions::convert(ImageTarget::Jpeg, 250);
        assert!((clamped.quality - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_guess_media_type() {
        assert_eq!(guess_media_type("photo.JPG", &[]), "image/jpeg");
        assert_eq!(guess_media_type("notes.txt", b"hello"), OCTET_STREAM);
        // No extension: falls back to magic bytes
        let png_magic = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(guess_media_type("scan", &png_magic), "image/png");
    }

    #[test]
    fn test_pending_input_size() {
        let input = PendingInput::new("a.txt", "text/plain", b"abc".to_vec());
        assert!(!Mode::Convert.accepts(&input.media_type));
        assert_eq!(input.size(), 3);
    }
}
