//! Image decoding with format detection, validation, and timeout support.
//!
//! Decoding always resolves: a corrupt or unsupported image becomes
//! [`PipelineError::Decode`], a decoder that never returns becomes
//! [`PipelineError::Timeout`].

use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::config::LimitsConfig;
use crate::error::PipelineError;

/// Image decoder with configurable limits and timeout.
#[derive(Debug, Clone)]
pub struct ImageDecoder {
    limits: LimitsConfig,
}

/// Result of decoding an image.
pub struct DecodedImage {
    /// The decoded image data
    pub image: DynamicImage,
    /// Detected image format
    pub format: ImageFormat,
    /// Natural width in pixels
    pub width: u32,
    /// Natural height in pixels
    pub height: u32,
}

impl ImageDecoder {
    /// Create a new decoder with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Decode an in-memory image on a blocking thread, bounded by the
    /// configured timeout and dimension limit.
    pub async fn decode(&self, bytes: Arc<[u8]>, name: &str) -> Result<DecodedImage, PipelineError> {
        let name_owned = name.to_string();
        let timeout_duration = Duration::from_millis(self.limits.decode_timeout_ms);

        let decode_result = timeout(
            timeout_duration,
            tokio::task::spawn_blocking(move || Self::decode_sync(&bytes, &name_owned)),
        )
        .await;

        match decode_result {
            Ok(Ok(Ok(decoded))) => {
                if decoded.width > self.limits.max_image_dimension
                    || decoded.height > self.limits.max_image_dimension
                {
                    return Err(PipelineError::ImageTooLarge {
                        name: name.to_string(),
                        width: decoded.width,
                        height: decoded.height,
                        max_dim: self.limits.max_image_dimension,
                    });
                }
                Ok(decoded)
            }
            Ok(Ok(Err(e))) => Err(e),
            Ok(Err(e)) => Err(PipelineError::Decode {
                name: name.to_string(),
                message: format!("Task join error: {}", e),
            }),
            Err(_) => Err(PipelineError::Timeout {
                name: name.to_string(),
                stage: "decode".to_string(),
                timeout_ms: self.limits.decode_timeout_ms,
            }),
        }
    }

    /// Synchronous decode. Content sniffing wins over the file name.
    pub(crate) fn decode_sync(bytes: &[u8], name: &str) -> Result<DecodedImage, PipelineError> {
        let mut reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| PipelineError::Decode {
                name: name.to_string(),
                message: format!("Cannot detect image format: {}", e),
            })?;

        let format = match reader.format() {
            Some(f) => f,
            None => {
                let f = ImageFormat::from_path(name).map_err(|_| PipelineError::Decode {
                    name: name.to_string(),
                    message: "Unrecognized image format".to_string(),
                })?;
                reader.set_format(f);
                f
            }
        };

        let image = reader.decode().map_err(|e| PipelineError::Decode {
            name: name.to_string(),
            message: e.to_string(),
        })?;

        let (width, height) = image.dimensions();
        Ok(DecodedImage {
            image,
            format,
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_format_detected_by_content() {
        // PNG content under a .jpg name is still detected as PNG
        let result = ImageDecoder::decode_sync(&png_bytes(4, 3), "misnamed.jpg").unwrap();
        assert_eq!(result.format, ImageFormat::Png);
        assert_eq!((result.width, result.height), (4, 3));
    }

    #[tokio::test]
    async fn test_corrupt_input_resolves_to_error() {
        let decoder = ImageDecoder::new(LimitsConfig::default());
        let err = decoder
            .decode(Arc::from(&b"definitely not an image"[..]), "broken.png")
            .await
            .err()
            .unwrap();
        assert!(matches!(err, PipelineError::Decode { .. }));
        assert!(err.to_string().contains("broken.png"));
    }

    #[tokio::test]
    async fn test_truncated_png_resolves_to_error() {
        let decoder = ImageDecoder::new(LimitsConfig::default());
        let mut bytes = png_bytes(64, 64);
        bytes.truncate(bytes.len() / 2);
        let result = decoder.decode(Arc::from(bytes), "half.png").await;
        assert!(matches!(result, Err(PipelineError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_slow_decode_times_out() {
        let limits = LimitsConfig {
            decode_timeout_ms: 1,
            ..LimitsConfig::default()
        };
        let decoder = ImageDecoder::new(limits);
        let result = decoder
            .decode(Arc::from(png_bytes(4096, 4096)), "huge.png")
            .await;

        match result {
            Err(PipelineError::Timeout {
                name,
                stage,
                timeout_ms,
            }) => {
                assert_eq!(name, "huge.png");
                assert_eq!(stage, "decode");
                assert_eq!(timeout_ms, 1);
            }
            Err(other) => panic!("expected timeout, got {other}"),
            Ok(_) => panic!("expected timeout, decode finished"),
        }
    }

    #[tokio::test]
    async fn test_dimension_limit() {
        let limits = LimitsConfig {
            max_image_dimension: 8,
            ..LimitsConfig::default()
        };
        let decoder = ImageDecoder::new(limits);
        let result = decoder.decode(Arc::from(png_bytes(16, 4)), "wide.png").await;
        assert!(matches!(
            result,
            Err(PipelineError::ImageTooLarge { width: 16, .. })
        ));
    }
}
