//! The session controller: mode, intake, processing and download lifecycle.
//!
//! All mutable state lives in one [`SessionState`] behind a mutex that is
//! never held across an await. Every intake bumps a generation counter; a run
//! captures the generation it started with and only commits its result if no
//! newer input has arrived since, so overlapping runs resolve to the most
//! recently submitted file.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::Config;
use crate::download::{derive_output_name, Downloader};
use crate::error::{PipelineError, PipelineResult};
use crate::pipeline::Processor;
use crate::types::{
    CompressTarget, ImageTarget, Mode, PendingInput, Presentation, ProcessingOptions,
    ResultArtifact, StatusReport, TargetFormat,
};

/// Current values of the format and quality selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    /// Selected conversion target
    pub convert_format: ImageTarget,
    /// Selected compression target
    pub compress_format: CompressTarget,
    /// Quality setting, 0-100
    pub quality: u8,
}

impl Controls {
    /// Capture the options for a run in `mode`.
    pub fn options(&self, mode: Mode) -> ProcessingOptions {
        match mode {
            Mode::Convert => ProcessingOptions::convert(self.convert_format, self.quality),
            Mode::Compress => ProcessingOptions::compress(self.compress_format),
        }
    }
}

/// Everything a session mutates.
#[derive(Debug)]
struct SessionState {
    mode: Mode,
    controls: Controls,
    pending: Option<Arc<PendingInput>>,
    result: Option<ResultArtifact>,
    status: Option<String>,
    presentation: Presentation,
    generation: u64,
}

impl SessionState {
    fn clear(&mut self) {
        self.pending = None;
        self.result = None;
        self.presentation = Presentation::Empty;
    }
}

/// What intake reports back before processing starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intake {
    /// "Ready to convert <name>" or "Ready to process <name>"
    pub message: String,
    /// Whether the input can be previewed as an image in the active mode
    pub previewable: bool,
}

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// The result was committed and is ready for download
    Completed(StatusReport),
    /// The run failed; input and result were cleared
    Failed(PipelineError),
    /// A newer input arrived while this run was in flight; nothing committed
    Superseded,
}

/// A view of the current result for display.
#[derive(Debug, Clone)]
pub struct Preview {
    /// Name of the input the result came from
    pub source_name: String,
    /// Name the result would be downloaded as
    pub output_name: String,
    /// Declared media type of the result
    pub media_type: &'static str,
    /// Pixel dimensions for image results
    pub dimensions: Option<(u32, u32)>,
    /// Result content
    pub bytes: Arc<[u8]>,
}

/// A single-file conversion/compression session.
pub struct Session {
    processor: Processor,
    downloader: Downloader,
    state: Mutex<SessionState>,
}

impl Session {
    /// Create a session in Convert mode with controls taken from `config`.
    ///
    /// Codec initialization happens here; if the configured compression
    /// format is unavailable the session falls back to gzip.
    pub async fn new(config: &Config) -> Self {
        let processor = Processor::new(config).await;

        let mut compress_format = config.compress.format;
        if !processor.compressors().is_available(compress_format) {
            tracing::warn!(
                "Configured format {} is unavailable, using gz",
                compress_format.id()
            );
            compress_format = CompressTarget::Gz;
        }

        let state = SessionState {
            mode: Mode::Convert,
            controls: Controls {
                convert_format: config.convert.format,
                compress_format,
                quality: config.convert.quality.min(100),
            },
            pending: None,
            result: None,
            status: None,
            presentation: Presentation::Empty,
            generation: 0,
        };

        Self {
            processor,
            downloader: Downloader::from_config(config),
            state: Mutex::new(state),
        }
    }

    /// Replace the download destination.
    pub fn with_downloader(mut self, downloader: Downloader) -> Self {
        self.downloader = downloader;
        self
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Mode ─────────────────────────────────────────────────────────────

    /// The active mode.
    pub fn mode(&self) -> Mode {
        self.state().mode
    }

    /// Switch mode, clearing the staged input and any result.
    ///
    /// Re-selecting the active mode clears as well.
    pub fn set_mode(&self, mode: Mode) {
        let mut state = self.state();
        state.mode = mode;
        state.clear();
        state.status = None;
        state.generation += 1;
        tracing::debug!("Mode set to {mode} (accept {})", mode.accept_filter());
    }

    /// File filter for pickers in the active mode.
    pub fn accept_filter(&self) -> &'static str {
        self.mode().accept_filter()
    }

    /// Which presentation a front end should show.
    pub fn presentation(&self) -> Presentation {
        self.state().presentation
    }

    // ── Controls ─────────────────────────────────────────────────────────

    /// Current selector values.
    pub fn controls(&self) -> Controls {
        self.state().controls
    }

    /// Select the conversion target.
    pub fn set_convert_format(&self, format: ImageTarget) {
        self.state().controls.convert_format = format;
    }

    /// Select the compression target. Fails if its codec is unavailable.
    pub fn set_compress_format(&self, format: CompressTarget) -> PipelineResult<()> {
        self.processor.compressors().get(format)?;
        self.state().controls.compress_format = format;
        Ok(())
    }

    /// Select a target by identifier for the active mode.
    pub fn set_format(&self, id: &str) -> PipelineResult<()> {
        match TargetFormat::parse(self.mode(), id)? {
            TargetFormat::Image(target) => {
                self.set_convert_format(target);
                Ok(())
            }
            TargetFormat::Compressed(target) => self.set_compress_format(target),
        }
    }

    /// Set quality (0-100, clamped).
    pub fn set_quality(&self, quality: u8) {
        self.state().controls.quality = quality.min(100);
    }

    /// Compression targets that can be selected.
    pub fn available_compress_formats(&self) -> Vec<CompressTarget> {
        self.processor.compressors().available_targets()
    }

    // ── Intake ───────────────────────────────────────────────────────────

    /// Stage `file` as the pending input without processing it.
    pub fn stage_file(&self, mut file: PendingInput) -> Intake {
        let mut state = self.state();
        state.generation += 1;
        file.generation = state.generation;

        let is_image = Mode::Convert.accepts(&file.media_type);
        let previewable = state.mode == Mode::Convert && is_image;
        let message = if previewable {
            format!("Ready to convert {}", file.name)
        } else {
            format!("Ready to process {}", file.name)
        };

        if state.mode == Mode::Convert && !is_image {
            tracing::debug!(
                "{:?} is {}, not an image; attempting conversion anyway",
                file.name,
                file.media_type
            );
        }

        state.pending = Some(Arc::new(file));
        state.result = None;
        state.status = Some(message.clone());

        Intake {
            message,
            previewable,
        }
    }

    /// Stage `file` and immediately process it.
    pub async fn submit_file(&self, file: PendingInput) -> (Intake, Option<RunOutcome>) {
        let intake = self.stage_file(file);
        let outcome = self.run().await;
        (intake, outcome)
    }

    /// Load a file from disk, stage it, and process it.
    ///
    /// Errors reading the file are returned without touching session state.
    pub async fn submit_path(&self, path: &Path) -> PipelineResult<(Intake, Option<RunOutcome>)> {
        let input = self.processor.validator().load(path).await?;
        Ok(self.submit_file(input).await)
    }

    // ── Processing ───────────────────────────────────────────────────────

    /// Process the pending input with the current controls.
    ///
    /// Returns `None` when nothing is staged.
    pub async fn run(&self) -> Option<RunOutcome> {
        let (input, options) = {
            let state = self.state();
            let input = state.pending.clone()?;
            (input, state.controls.options(state.mode))
        };

        let result = self.processor.process(&input, options).await;

        let mut state = self.state();
        if state.generation != input.generation {
            tracing::debug!("Discarding stale result for {:?}", input.name);
            return Some(RunOutcome::Superseded);
        }

        match result {
            Ok(artifact) => {
                let report =
                    StatusReport::new(&input.name, options.format, input.size(), artifact.size());
                tracing::info!("{}", report.summary);
                state.result = Some(artifact);
                state.status = Some(report.summary.clone());
                state.presentation = Presentation::Output;
                Some(RunOutcome::Completed(report))
            }
            Err(error) => {
                let verb = match options.format {
                    TargetFormat::Image(_) => "convert",
                    TargetFormat::Compressed(_) => "compress",
                };
                let message = format!("Failed to {verb} {}: {error}", input.name);
                tracing::warn!("{message}");
                state.clear();
                state.status = Some(message);
                Some(RunOutcome::Failed(error))
            }
        }
    }

    // ── Output ───────────────────────────────────────────────────────────

    /// Name of the staged input, if any.
    pub fn pending_name(&self) -> Option<String> {
        self.state().pending.as_ref().map(|p| p.name.clone())
    }

    /// Whether a result for the current input is ready.
    pub fn has_result(&self) -> bool {
        self.preview().is_some()
    }

    /// Last status line (ready message, summary, or failure).
    pub fn status(&self) -> Option<String> {
        self.state().status.clone()
    }

    /// The current result, if it belongs to the current input.
    pub fn preview(&self) -> Option<Preview> {
        let state = self.state();
        let pending = state.pending.as_ref()?;
        let result = state.result.as_ref()?;
        if result.source_generation != pending.generation {
            return None;
        }
        Some(Preview {
            source_name: pending.name.clone(),
            output_name: derive_output_name(&pending.name, result.format),
            media_type: result.media_type,
            dimensions: result.dimensions,
            bytes: Arc::clone(&result.bytes),
        })
    }

    /// Write the result under its derived name.
    ///
    /// Returns `Ok(None)` when there is nothing to download.
    pub fn download(&self) -> PipelineResult<Option<PathBuf>> {
        let Some(preview) = self.preview() else {
            return Ok(None);
        };
        self.downloader
            .save(&preview.output_name, &preview.bytes)
            .map(Some)
    }

    /// Where downloads are written.
    pub fn download_dir(&self) -> &Path {
        self.downloader.dir()
    }
}
