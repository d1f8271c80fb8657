//! CLI enum types for the convert and compress commands.

use clap::ValueEnum;
use squish_core::{CompressTarget, ImageTarget};

/// Raster formats accepted by `squish convert --format`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ImageFormatArg {
    /// Lossless PNG
    Png,
    /// JPEG (honours --quality)
    #[value(alias = "jpg")]
    Jpeg,
    /// Lossless WebP
    Webp,
}

impl From<ImageFormatArg> for ImageTarget {
    fn from(arg: ImageFormatArg) -> Self {
        match arg {
            ImageFormatArg::Png => ImageTarget::Png,
            ImageFormatArg::Jpeg => ImageTarget::Jpeg,
            ImageFormatArg::Webp => ImageTarget::Webp,
        }
    }
}

impl std::fmt::Display for ImageFormatArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(ImageTarget::from(*self).id())
    }
}

/// Codecs accepted by `squish compress --format`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CompressFormatArg {
    /// Gzip (deflate)
    #[value(alias = "gzip")]
    Gz,
    /// Brotli
    #[value(alias = "brotli")]
    Br,
}

impl From<CompressFormatArg> for CompressTarget {
    fn from(arg: CompressFormatArg) -> Self {
        match arg {
            CompressFormatArg::Gz => CompressTarget::Gz,
            CompressFormatArg::Br => CompressTarget::Br,
        }
    }
}

impl std::fmt::Display for CompressFormatArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(CompressTarget::from(*self).id())
    }
}
