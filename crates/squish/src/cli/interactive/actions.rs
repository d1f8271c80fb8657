//! Menu actions that drive the interactive session.

use console::Style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use squish_core::{ImageTarget, Mode, RunOutcome, Session};
use std::path::PathBuf;

use crate::cli::progress::spinner;

/// Prompt for a path, then load, stage and process it.
pub async fn select_file(session: &Session, theme: &ColorfulTheme) -> anyhow::Result<()> {
    let prompt = match session.mode() {
        Mode::Convert => "Path to image",
        Mode::Compress => "Path to file",
    };

    let path = loop {
        let Some(raw_path) =
            super::handle_interrupt(Input::<String>::with_theme(theme).with_prompt(prompt).interact_text())?
        else {
            return Ok(());
        };

        let path = PathBuf::from(shellexpand::tilde(raw_path.trim()).into_owned());
        if path.is_file() {
            break path;
        }

        let warn = Style::new().for_stderr().yellow();
        eprintln!("  {}", warn.apply_to(format!("Not a file: {}", path.display())));
    };

    let progress = spinner(format!("Processing {}", path.display()));
    let submitted = session.submit_path(&path).await;
    progress.finish_and_clear();

    match submitted {
        Ok((intake, outcome)) => {
            tracing::debug!("{}", intake.message);
            if let Some(outcome) = outcome {
                report(session, &outcome);
            }
        }
        Err(e) => {
            let err = Style::new().for_stderr().red();
            eprintln!("  {} {e}", err.apply_to("✗"));
        }
    }

    Ok(())
}

/// Pick the target for the active mode. Unavailable codecs are not offered.
pub fn choose_format(session: &Session, theme: &ColorfulTheme) -> anyhow::Result<()> {
    let controls = session.controls();
    let (ids, current): (Vec<&'static str>, &str) = match session.mode() {
        Mode::Convert => (
            ImageTarget::ALL.iter().map(|t| t.id()).collect(),
            controls.convert_format.id(),
        ),
        Mode::Compress => (
            session
                .available_compress_formats()
                .iter()
                .map(|t| t.id())
                .collect(),
            controls.compress_format.id(),
        ),
    };

    let default = ids.iter().position(|id| *id == current).unwrap_or(0);
    let selection = Select::with_theme(theme)
        .with_prompt("Target format")
        .items(&ids)
        .default(default)
        .interact_opt()?;

    if let Some(id) = selection.and_then(|i| ids.get(i)) {
        session.set_format(id)?;
    }
    Ok(())
}

/// Prompt for a quality value between 0 and 100.
pub fn choose_quality(session: &Session, theme: &ColorfulTheme) -> anyhow::Result<()> {
    let current = session.controls().quality;
    let quality = super::handle_interrupt(
        Input::<u8>::with_theme(theme)
            .with_prompt("Quality (0-100)")
            .default(current)
            .validate_with(|q: &u8| -> Result<(), String> {
                if *q <= 100 {
                    Ok(())
                } else {
                    Err("Quality must be between 0 and 100".to_string())
                }
            })
            .interact_text(),
    )?;

    if let Some(quality) = quality {
        session.set_quality(quality);
        if !session.controls().convert_format.supports_quality() {
            let dim = Style::new().for_stderr().dim();
            eprintln!(
                "  {}",
                dim.apply_to(format!(
                    "{} output is lossless; quality applies to jpeg only",
                    session.controls().convert_format.id()
                ))
            );
        }
    }
    Ok(())
}

/// Re-run the staged input with the current controls.
pub async fn process(session: &Session) {
    let progress = spinner("Processing");
    let outcome = session.run().await;
    progress.finish_and_clear();

    match outcome {
        Some(outcome) => report(session, &outcome),
        None => eprintln!("  Nothing staged. Select a file first."),
    }
}

/// Save the current result into the download directory.
pub fn download(session: &Session) {
    let ok = Style::new().for_stderr().green();
    let err = Style::new().for_stderr().red();

    match session.download() {
        Ok(Some(path)) => eprintln!("  {} Saved {}", ok.apply_to("✓"), path.display()),
        Ok(None) => eprintln!("  Nothing to download yet."),
        Err(e) => eprintln!("  {} {e}", err.apply_to("✗")),
    }
}

fn report(session: &Session, outcome: &RunOutcome) {
    match outcome {
        RunOutcome::Completed(report) => {
            let ok = Style::new().for_stderr().green();
            eprintln!("  {} {}", ok.apply_to("✓"), report.summary);
        }
        RunOutcome::Failed(e) => {
            let err = Style::new().for_stderr().red();
            let status = session.status().unwrap_or_else(|| e.to_string());
            eprintln!("  {} {status}", err.apply_to("✗"));
        }
        RunOutcome::Superseded => {
            let dim = Style::new().for_stderr().dim();
            eprintln!("  {}", dim.apply_to("Result discarded; a newer file was selected."));
        }
    }
}
