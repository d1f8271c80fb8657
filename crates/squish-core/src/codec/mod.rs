//! General-purpose compression providers.
//!
//! Each codec is a whole-buffer [`Compressor`]. [`CompressorSet`] owns one
//! instance per [`CompressTarget`] and records which ones initialized, so a
//! failed Brotli setup disables `br` instead of failing the session.

mod brotli;
mod gzip;

pub use self::brotli::BrotliCompressor;
pub use self::gzip::GzipCompressor;

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::CompressConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::types::CompressTarget;

/// A whole-buffer compression codec.
pub trait Compressor: Send + Sync {
    /// Codec name used in logs.
    fn name(&self) -> &'static str;

    /// Compress `data`, returning the codec's raw output stream.
    fn compress(&self, data: &[u8]) -> std::io::Result<Vec<u8>>;

    /// Reverse [`Compressor::compress`].
    fn decompress(&self, data: &[u8]) -> std::io::Result<Vec<u8>>;
}

/// The compressors available to a session, keyed by target.
#[derive(Clone)]
pub struct CompressorSet {
    available: HashMap<CompressTarget, Arc<dyn Compressor>>,
    unavailable: HashMap<CompressTarget, String>,
}

impl CompressorSet {
    /// Initialize every codec, disabling any that fail.
    ///
    /// Gzip has no setup step. Brotli is probed on a blocking thread; a
    /// failure is logged and `br` is reported as unavailable.
    pub async fn initialize(config: &CompressConfig) -> Self {
        let mut set = Self {
            available: HashMap::new(),
            unavailable: HashMap::new(),
        };

        set.available.insert(
            CompressTarget::Gz,
            Arc::new(GzipCompressor::new(config.gzip_level)),
        );

        let (quality, window) = (config.brotli_quality, config.brotli_window);
        let brotli = tokio::task::spawn_blocking(move || BrotliCompressor::init(quality, window))
            .await
            .unwrap_or_else(|e| Err(format!("initialization task failed: {e}")));

        match brotli {
            Ok(codec) => {
                set.available.insert(CompressTarget::Br, Arc::new(codec));
            }
            Err(reason) => {
                tracing::warn!("Brotli unavailable, disabling br: {reason}");
                set.unavailable.insert(CompressTarget::Br, reason);
            }
        }

        set
    }

    /// Whether `target` can be selected.
    pub fn is_available(&self, target: CompressTarget) -> bool {
        self.available.contains_key(&target)
    }

    /// Selectable targets, in menu order.
    pub fn available_targets(&self) -> Vec<CompressTarget> {
        CompressTarget::ALL
            .into_iter()
            .filter(|t| self.is_available(*t))
            .collect()
    }

    /// Look up the codec for `target`.
    pub fn get(&self, target: CompressTarget) -> PipelineResult<Arc<dyn Compressor>> {
        self.available.get(&target).cloned().ok_or_else(|| {
            PipelineError::FormatUnavailable {
                format: target.id().to_string(),
                reason: self
                    .unavailable
                    .get(&target)
                    .cloned()
                    .unwrap_or_else(|| "codec not initialized".to_string()),
            }
        })
    }
}
