//! Pipeline orchestration - dispatches one input to the codec for its target.

use std::sync::Arc;
use std::time::Instant;

use crate::codec::CompressorSet;
use crate::config::Config;
use crate::error::{PipelineError, PipelineResult};
use crate::types::{
    CompressTarget, ImageTarget, PendingInput, ProcessingOptions, ResultArtifact, TargetFormat,
};

use super::decode::ImageDecoder;
use super::encode::Surface;
use super::validate::Validator;

/// Runs the convert and compress paths.
#[derive(Clone)]
pub struct Processor {
    decoder: ImageDecoder,
    validator: Validator,
    compressors: CompressorSet,
}

impl Processor {
    /// Create a processor, initializing the compression codecs.
    pub async fn new(config: &Config) -> Self {
        Self {
            decoder: ImageDecoder::new(config.limits.clone()),
            validator: Validator::new(config.limits.clone()),
            compressors: CompressorSet::initialize(&config.compress).await,
        }
    }

    /// The codecs this processor can compress with.
    pub fn compressors(&self) -> &CompressorSet {
        &self.compressors
    }

    /// The validator used to load inputs from disk.
    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Process `input` according to `options`.
    pub async fn process(
        &self,
        input: &PendingInput,
        options: ProcessingOptions,
    ) -> PipelineResult<ResultArtifact> {
        let start = Instant::now();
        tracing::debug!("Processing {:?} -> {}", input.name, options.format);

        let artifact = match options.format {
            TargetFormat::Image(target) => self.convert(input, target, options.quality).await?,
            TargetFormat::Compressed(target) => self.compress(input, target).await?,
        };

        tracing::debug!(
            "Processed {:?} in {:?} ({} -> {} bytes)",
            input.name,
            start.elapsed(),
            input.size(),
            artifact.size()
        );
        Ok(artifact)
    }

    /// Decode, draw onto a surface of the natural size, re-encode.
    async fn convert(
        &self,
        input: &PendingInput,
        target: ImageTarget,
        quality: f32,
    ) -> PipelineResult<ResultArtifact> {
        let decoded = self.decoder.decode(input.bytes.clone(), &input.name).await?;
        tracing::trace!(
            "  Decoded {:?}: {}x{}",
            decoded.format,
            decoded.width,
            decoded.height
        );

        let name = input.name.clone();
        let encoded = tokio::task::spawn_blocking(move || {
            let surface = Surface::render(&decoded.image);
            surface
                .encode(target, quality)
                .map(|bytes| (bytes, (surface.width(), surface.height())))
        })
        .await
        .map_err(|e| PipelineError::Encode {
            name: name.clone(),
            message: format!("Task join error: {}", e),
        })?
        .map_err(|e| PipelineError::Encode {
            name,
            message: e.to_string(),
        })?;

        let (bytes, dimensions) = encoded;
        Ok(ResultArtifact {
            bytes: bytes.into(),
            media_type: target.media_type(),
            format: TargetFormat::Image(target),
            dimensions: Some(dimensions),
            source_generation: input.generation,
        })
    }

    /// Compress the whole input with the codec for `target`.
    async fn compress(
        &self,
        input: &PendingInput,
        target: CompressTarget,
    ) -> PipelineResult<ResultArtifact> {
        let codec = self.compressors.get(target)?;
        let data = Arc::clone(&input.bytes);
        let name = input.name.clone();

        let packed = tokio::task::spawn_blocking(move || codec.compress(&data))
            .await
            .map_err(|e| PipelineError::Compress {
                name: name.clone(),
                message: format!("Task join error: {}", e),
            })?
            .map_err(|e| PipelineError::Compress {
                name,
                message: e.to_string(),
            })?;

        Ok(ResultArtifact {
            bytes: packed.into(),
            media_type: target.media_type(),
            format: TargetFormat::Compressed(target),
            dimensions: None,
            source_generation: input.generation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        }));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Jpeg).unwrap();
        buf.into_inner()
    }

    #[tokio::test]
    async fn test_convert_jpeg_to_webp() {
        let processor = Processor::new(&Config::default()).await;
        let input = PendingInput::new("photo.jpg", "image/jpeg", jpeg_bytes(40, 30));

        let artifact = processor
            .process(&input, ProcessingOptions::convert(ImageTarget::Webp, 80))
            .await
            .unwrap();

        assert_eq!(artifact.media_type, "image/webp");
        assert_eq!(artifact.dimensions, Some((40, 30)));
        let back = image::load_from_memory_with_format(&artifact.bytes, ImageFormat::WebP).unwrap();
        assert_eq!(back.dimensions(), (40, 30));
    }

    #[tokio::test]
    async fn test_convert_corrupt_image_fails() {
        let processor = Processor::new(&Config::default()).await;
        let input = PendingInput::new("broken.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF, 0x00]);

        let err = processor
            .process(&input, ProcessingOptions::convert(ImageTarget::Png, 80))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, PipelineError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_compress_round_trips() {
        let processor = Processor::new(&Config::default()).await;
        let data = b"row,value\n1,2\n3,4\n".repeat(500);
        let input = PendingInput::new("table.csv", "text/csv", data.clone());

        for target in CompressTarget::ALL {
            let artifact = processor
                .process(&input, ProcessingOptions::compress(target))
                .await
                .unwrap();
            assert_eq!(artifact.media_type, target.media_type());
            assert!(artifact.size() < input.size());

            let codec = processor.compressors().get(target).unwrap();
            assert_eq!(codec.decompress(&artifact.bytes).unwrap(), data);
        }
    }

    #[tokio::test]
    async fn test_compress_with_unavailable_codec() {
        let mut config = Config::default();
        config.compress.brotli_quality = 99;
        let processor = Processor::new(&config).await;
        let input = PendingInput::new("a.txt", "text/plain", b"abc".to_vec());

        let result = processor
            .process(&input, ProcessingOptions::compress(CompressTarget::Br))
            .await;
        assert!(matches!(result, Err(PipelineError::FormatUnavailable { .. })));
    }
}
