//! Brotli compression via the `brotli` crate.
//!
//! Unlike gzip, Brotli has an explicit initialization step: parameters are
//! range-checked and a probe buffer is round-tripped before the codec is
//! offered to callers.

use std::io::{Read, Write};

use super::Compressor;

const BUFFER_SIZE: usize = 4096;

const PROBE: &[u8] = b"squish brotli probe squish brotli probe";

/// Brotli compressor with a fixed quality and window.
#[derive(Debug, Clone, Copy)]
pub struct BrotliCompressor {
    quality: u32,
    lgwin: u32,
}

impl BrotliCompressor {
    /// Validate parameters and probe the codec.
    ///
    /// Returns a human-readable reason on failure.
    pub fn init(quality: u32, lgwin: u32) -> Result<Self, String> {
        if quality > 11 {
            return Err(format!("quality {quality} is outside 0-11"));
        }
        if !(10..=24).contains(&lgwin) {
            return Err(format!("window {lgwin} is outside 10-24"));
        }

        let codec = Self { quality, lgwin };
        let packed = codec
            .compress(PROBE)
            .map_err(|e| format!("probe compression failed: {e}"))?;
        let unpacked = codec
            .decompress(&packed)
            .map_err(|e| format!("probe decompression failed: {e}"))?;
        if unpacked != PROBE {
            return Err("probe round trip mismatch".to_string());
        }

        tracing::debug!("Brotli ready (quality {quality}, window {lgwin})");
        Ok(codec)
    }
}

impl Compressor for BrotliCompressor {
    fn name(&self) -> &'static str {
        "brotli"
    }

    fn compress(&self, data: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut writer = ::brotli::CompressorWriter::new(
            Vec::with_capacity(data.len() / 2),
            BUFFER_SIZE,
            self.quality,
            self.lgwin,
        );
        writer.write_all(data)?;
        writer.flush()?;
        Ok(writer.into_inner())
    }

    fn decompress(&self, data: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut reader = ::brotli::Decompressor::new(data, BUFFER_SIZE);
        let mut out = Vec::new();
        reader.read_to_end(&mut out)?;
        Ok(out)
    }
}
