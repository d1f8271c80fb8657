//! The `squish convert` and `squish compress` commands.

mod setup;
pub mod types;

pub use setup::{available_formats, setup_session, Overrides};
pub use types::{CompressFormatArg, ImageFormatArg};

use clap::Args;
use serde::Serialize;
use squish_core::{Config, Mode, OutputWriter, RunOutcome, Session, StatusReport};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::cli::progress::spinner;

/// Output options shared by `convert` and `compress`.
#[derive(Args, Debug, Default, Clone)]
pub struct OutputArgs {
    /// Directory to write the result into (defaults to config `output.dir`)
    #[arg(short = 'o', long)]
    pub out_dir: Option<PathBuf>,

    /// Replace an existing file with the same name
    #[arg(long)]
    pub overwrite: bool,

    /// Print the status report as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Process and report only; do not write the result
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `convert` command.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Image file to convert
    #[arg(required = true)]
    pub input: PathBuf,

    /// Target format (defaults to config `convert.format`)
    #[arg(short, long, value_enum)]
    pub format: Option<ImageFormatArg>,

    /// Quality 0-100, used by lossy formats (defaults to config `convert.quality`)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub quality: Option<u8>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for the `compress` command.
#[derive(Args, Debug)]
pub struct CompressArgs {
    /// File to compress
    #[arg(required = true)]
    pub input: PathBuf,

    /// Codec (defaults to config `compress.format`)
    #[arg(short, long, value_enum)]
    pub format: Option<CompressFormatArg>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// A status report plus where the result was written.
#[derive(Debug, Serialize)]
struct RunRecord {
    #[serde(flatten)]
    report: StatusReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_path: Option<PathBuf>,
}

/// Execute the convert command with the configuration loaded by `main`.
pub async fn execute_convert(args: ConvertArgs, config: Config) -> anyhow::Result<()> {
    let format = args.format.map(|f| f.to_string());
    let (session, config) = setup_session(
        config,
        Mode::Convert,
        Overrides {
            format: format.as_deref(),
            quality: args.quality,
            output: Some(&args.output),
        },
    )
    .await?;

    process_single(&session, &config, &args.input, &args.output).await
}

/// Execute the compress command with the configuration loaded by `main`.
pub async fn execute_compress(args: CompressArgs, config: Config) -> anyhow::Result<()> {
    let format = args.format.map(|f| f.to_string());
    let (session, config) = setup_session(
        config,
        Mode::Compress,
        Overrides {
            format: format.as_deref(),
            quality: None,
            output: Some(&args.output),
        },
    )
    .await?;

    process_single(&session, &config, &args.input, &args.output).await
}

// ── Single-file processing ─────────────────────────────────────────────────

/// Submit one file, report the outcome, and download the result.
async fn process_single(
    session: &Session,
    config: &Config,
    input: &Path,
    output: &OutputArgs,
) -> anyhow::Result<()> {
    if !input.exists() {
        anyhow::bail!(
            "Input path does not exist: {:?}\n\n  Hint: Check the file path and try again.",
            input
        );
    }

    let progress = spinner(format!("Processing {}", input.display()));
    let submitted = session.submit_path(input).await;
    progress.finish_and_clear();

    let (intake, outcome) = submitted?;
    tracing::debug!("{}", intake.message);

    let report = match outcome {
        Some(RunOutcome::Completed(report)) => report,
        Some(RunOutcome::Failed(e)) => {
            let status = session.status().unwrap_or_else(|| e.to_string());
            anyhow::bail!("{status}");
        }
        Some(RunOutcome::Superseded) | None => anyhow::bail!("Nothing was processed"),
    };

    let output_path = if output.dry_run {
        None
    } else {
        session.download()?
    };

    if output.json {
        let stdout = std::io::stdout();
        let mut writer = OutputWriter::new(BufWriter::new(stdout.lock()), config.output.pretty);
        writer.write(&RunRecord {
            report,
            output_path,
        })?;
        writer.flush()?;
    } else {
        println!("{}", report.summary);
        if let Some(path) = output_path {
            println!("Saved to {}", path.display());
        }
    }

    Ok(())
}
