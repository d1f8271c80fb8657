//! Squish CLI - convert images and compress files, one at a time.
//!
//! Squish converts raster images to PNG, JPEG or WebP and compresses any
//! file with gzip or Brotli, reporting the size change for each run.
//!
//! # Usage
//!
//! ```bash
//! # Convert an image (format and quality default to config)
//! squish convert photo.png --format jpeg --quality 75
//!
//! # Compress a file with Brotli into ./out
//! squish compress server.log --format br -o out/
//!
//! # Guided mode on a terminal
//! squish
//!
//! # View configuration
//! squish config show
//! ```

use clap::{Parser, Subcommand};
use std::io::IsTerminal;

mod cli;
mod logging;

/// Squish - image conversion and file compression.
#[derive(Parser, Debug)]
#[command(name = "squish")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert an image to PNG, JPEG or WebP
    Convert(cli::process::ConvertArgs),

    /// Compress a file with gzip or Brotli
    Compress(cli::process::CompressArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go through eprintln.
    let config = match squish_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Processing uses the default configuration. Check your config file with `squish config path`."
            );
            squish_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Squish v{}", squish_core::VERSION);

    match cli.command {
        Some(Commands::Convert(args)) => cli::process::execute_convert(args, config).await,
        Some(Commands::Compress(args)) => cli::process::execute_compress(args, config).await,
        Some(Commands::Config(args)) => cli::config::execute(args).await,
        None if std::io::stdin().is_terminal() && std::io::stderr().is_terminal() => {
            cli::interactive::run(&config).await
        }
        None => anyhow::bail!(
            "No command given and no terminal attached.\n\n  \
             Hint: run `squish convert <FILE>` or `squish compress <FILE>`, or see `squish --help`."
        ),
    }
}
