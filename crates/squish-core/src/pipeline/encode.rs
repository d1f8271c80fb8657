//! Rendering decoded images onto an off-screen surface and re-encoding them.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, RgbImage, RgbaImage};

use crate::types::ImageTarget;

/// An RGBA raster sized to an image's natural dimensions.
pub struct Surface {
    pixels: RgbaImage,
}

impl Surface {
    /// Draw `image` at the origin of a surface exactly its size.
    pub fn render(image: &DynamicImage) -> Self {
        Self {
            pixels: image.to_rgba8(),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Encode the surface as `target`.
    ///
    /// `quality` is a fraction in [0.0, 1.0]; only JPEG uses it.
    pub fn encode(&self, target: ImageTarget, quality: f32) -> image::ImageResult<Vec<u8>> {
        let mut out = Vec::new();
        match target {
            ImageTarget::Png => {
                DynamicImage::ImageRgba8(self.pixels.clone())
                    .write_with_encoder(PngEncoder::new(&mut out))?;
            }
            ImageTarget::Jpeg => {
                let encoder = JpegEncoder::new_with_quality(&mut out, jpeg_quality(quality));
                DynamicImage::ImageRgb8(self.flatten()).write_with_encoder(encoder)?;
            }
            ImageTarget::Webp => {
                DynamicImage::ImageRgba8(self.pixels.clone())
                    .write_with_encoder(WebPEncoder::new_lossless(&mut out))?;
            }
        }
        Ok(out)
    }

    /// Composite onto opaque black, for formats without alpha.
    fn flatten(&self) -> RgbImage {
        RgbImage::from_fn(self.width(), self.height(), |x, y| {
            let [r, g, b, a] = self.pixels.get_pixel(x, y).0;
            let scale = |c: u8| ((u16::from(c) * u16::from(a) + 127) / 255) as u8;
            image::Rgb([scale(r), scale(g), scale(b)])
        })
    }
}

/// Map a quality fraction onto the JPEG encoder's 1-100 scale.
fn jpeg_quality(quality: f32) -> u8 {
    (quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, ImageFormat, Rgba};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 7) as u8, (y * 5) as u8, ((x + y) * 3) as u8, 255])
        }))
    }

    #[test]
    fn test_surface_matches_natural_size() {
        let surface = Surface::render(&gradient(37, 21));
        assert_eq!((surface.width(), surface.height()), (37, 21));
    }

    #[test]
    fn test_each_target_redecodes() {
        let surface = Surface::render(&gradient(32, 16));
        for (target, format) in [
            (ImageTarget::Png, ImageFormat::Png),
            (ImageTarget::Jpeg, ImageFormat::Jpeg),
            (ImageTarget::Webp, ImageFormat::WebP),
        ] {
            let bytes = surface.encode(target, 0.8).unwrap();
            assert_eq!(image::guess_format(&bytes).unwrap(), format);
            let back = image::load_from_memory_with_format(&bytes, format).unwrap();
            assert_eq!(back.dimensions(), (32, 16));
        }
    }

    #[test]
    fn test_jpeg_quality_changes_size() {
        let surface = Surface::render(&gradient(128, 128));
        let low = surface.encode(ImageTarget::Jpeg, 0.1).unwrap();
        let high = surface.encode(ImageTarget::Jpeg, 1.0).unwrap();
        assert!(low.len() < high.len());
    }

    #[test]
    fn test_flatten_transparent_to_black() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([200, 100, 50, 0])));
        let flat = Surface::render(&img).flatten();
        assert_eq!(flat.get_pixel(0, 0).0, [0, 0, 0]);
    }

    #[test]
    fn test_jpeg_quality_mapping() {
        assert_eq!(jpeg_quality(0.0), 1);
        assert_eq!(jpeg_quality(0.8), 80);
        assert_eq!(jpeg_quality(1.5), 100);
    }
}
