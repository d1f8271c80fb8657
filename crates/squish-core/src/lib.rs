//! Squish Core - image conversion and file compression library.
//!
//! Squish converts images between raster formats and compresses arbitrary
//! files with gzip or Brotli, one file at a time, entirely in memory.
//!
//! # Architecture
//!
//! ```text
//! set_mode → submit_file → run ─┬─ Convert:  decode → surface → encode
//!                               └─ Compress: gzip | brotli
//!                                      ↓
//!                              StatusReport + ResultArtifact → download
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use squish_core::{Config, Mode, Session};
//!
//! #[tokio::main]
//! async fn main() -> squish_core::Result<()> {
//!     let config = Config::load()?;
//!     let session = Session::new(&config).await;
//!
//!     session.set_mode(Mode::Compress);
//!     session.set_format("br")?;
//!     session.submit_path("./server.log".as_ref()).await?;
//!     if let Some(path) = session.download()? {
//!         println!("Saved {}", path.display());
//!     }
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod codec;
pub mod config;
pub mod download;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod session;
pub mod size;
pub mod types;

// Re-exports for convenient access
pub use codec::{Compressor, CompressorSet};
pub use config::Config;
pub use download::{derive_output_name, Downloader};
pub use error::{ConfigError, PipelineError, PipelineResult, Result, SquishError};
pub use output::OutputWriter;
pub use pipeline::Processor;
pub use session::{Controls, Intake, Preview, RunOutcome, Session};
pub use size::{format_bytes, format_percent, reduction_percent};
pub use types::{
    CompressTarget, ImageTarget, Mode, PendingInput, Presentation, ProcessingOptions,
    ResultArtifact, StatusReport, TargetFormat,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[tokio::test]
    async fn test_session_from_default_config() {
        let session = Session::new(&Config::default()).await;
        assert_eq!(session.mode(), Mode::Convert);
        assert_eq!(session.controls().quality, 80);
    }
}
