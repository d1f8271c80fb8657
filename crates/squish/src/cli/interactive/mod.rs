//! Interactive CLI mode for bare `squish` invocation.
//!
//! When `squish` is invoked with no subcommand on a TTY, this module keeps a
//! single [`Session`] alive and drives it from a menu.

mod actions;
pub mod theme;

use console::Style;
use dialoguer::Select;
use squish_core::{format_bytes, Config, Mode, Presentation, Session};

/// Convert a dialoguer result into `Ok(Some(value))` on success, `Ok(None)` on
/// interrupt (Ctrl+C / terminal disconnect), and `Err` for other I/O failures.
///
/// Use this to wrap `interact_text()` / `interact()` calls that lack an `_opt`
/// variant, so interrupts exit the current flow cleanly instead of panicking.
fn handle_interrupt<T>(result: dialoguer::Result<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Entries of the main menu. Which ones are offered depends on session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    SelectFile,
    TargetFormat,
    Quality,
    ProcessAgain,
    Download,
    SwitchMode,
    ShowConfig,
    Exit,
}

impl Action {
    fn label(self, session: &Session) -> String {
        match self {
            Action::SelectFile => match session.mode() {
                Mode::Convert => "Select an image".to_string(),
                Mode::Compress => "Select a file".to_string(),
            },
            Action::TargetFormat => {
                let controls = session.controls();
                let current = match session.mode() {
                    Mode::Convert => controls.convert_format.id(),
                    Mode::Compress => controls.compress_format.id(),
                };
                format!("Target format ({current})")
            }
            Action::Quality => format!("Quality ({})", session.controls().quality),
            Action::ProcessAgain => "Process again with current settings".to_string(),
            Action::Download => "Download result".to_string(),
            Action::SwitchMode => format!("Switch to {} mode", session.mode().toggled()),
            Action::ShowConfig => "Show configuration".to_string(),
            Action::Exit => "Exit".to_string(),
        }
    }
}

/// Actions available for the current session state, in menu order.
fn menu(session: &Session) -> Vec<Action> {
    let mut items = vec![Action::SelectFile, Action::TargetFormat];
    if session.mode() == Mode::Convert {
        items.push(Action::Quality);
    }
    if session.pending_name().is_some() {
        items.push(Action::ProcessAgain);
    }
    if session.has_result() {
        items.push(Action::Download);
    }
    items.extend([Action::SwitchMode, Action::ShowConfig, Action::Exit]);
    items
}

/// Entry point for interactive mode. Called when `squish` is invoked with no subcommand on a TTY.
pub async fn run(config: &Config) -> anyhow::Result<()> {
    theme::print_banner();

    let theme = theme::squish_theme();
    let session = Session::new(config).await;

    loop {
        print_status(&session);

        let actions = menu(&session);
        let labels: Vec<String> = actions.iter().map(|a| a.label(&session)).collect();

        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact_opt()?;

        let Some(action) = selection.and_then(|i| actions.get(i).copied()) else {
            break; // Esc / Ctrl+C
        };

        match action {
            Action::SelectFile => actions::select_file(&session, &theme).await?,
            Action::TargetFormat => actions::choose_format(&session, &theme)?,
            Action::Quality => actions::choose_quality(&session, &theme)?,
            Action::ProcessAgain => actions::process(&session).await,
            Action::Download => actions::download(&session),
            Action::SwitchMode => session.set_mode(session.mode().toggled()),
            Action::ShowConfig => show_config(config, &session),
            Action::Exit => break,
        }
    }

    Ok(())
}

/// Print the mode, staged input, and either the result panel or the empty state.
fn print_status(session: &Session) {
    let dim = Style::new().for_stderr().dim();
    let label = Style::new().for_stderr().bold();
    let magenta = Style::new().for_stderr().magenta();

    eprintln!();
    eprintln!(
        "  {} {}",
        magenta.apply_to(format!("[{}]", session.mode())),
        dim.apply_to(format!("accepts {}", session.accept_filter()))
    );

    match session.presentation() {
        Presentation::Empty => {
            let hint = match session.pending_name() {
                Some(name) => format!("Staged: {name}"),
                None => "No file selected".to_string(),
            };
            eprintln!("    {}", dim.apply_to(hint));
        }
        Presentation::Output => {
            if let Some(preview) = session.preview() {
                eprintln!("    {:<12} {}", label.apply_to("Input:"), preview.source_name);
                eprintln!("    {:<12} {}", label.apply_to("Output:"), preview.output_name);
                eprintln!(
                    "    {:<12} {} ({})",
                    label.apply_to("Type:"),
                    preview.media_type,
                    format_bytes(preview.bytes.len() as u64)
                );
                if let Some((w, h)) = preview.dimensions {
                    eprintln!("    {:<12} {w}×{h}", label.apply_to("Size:"));
                }
            }
        }
    }

    if let Some(status) = session.status() {
        eprintln!("    {}", dim.apply_to(status));
    }
    eprintln!();
}

/// Summary of the settings this session was started with.
fn show_config(config: &Config, session: &Session) {
    let dim = Style::new().for_stderr().dim();
    let magenta = Style::new().for_stderr().magenta();
    let label = Style::new().for_stderr().bold();

    let config_path = Config::default_path();
    let path_note = if config_path.exists() {
        "(exists)"
    } else {
        "(using defaults)"
    };

    let compress_formats: Vec<&str> = session
        .available_compress_formats()
        .iter()
        .map(|t| t.id())
        .collect();

    eprintln!();
    eprintln!("  {}", magenta.apply_to("Current configuration:"));
    eprintln!();
    eprintln!(
        "    {:<20} {} {}",
        label.apply_to("Config file:"),
        config_path.display(),
        dim.apply_to(path_note)
    );
    eprintln!(
        "    {:<20} {} (quality {})",
        label.apply_to("Convert default:"),
        config.convert.format.id(),
        config.convert.quality
    );
    eprintln!(
        "    {:<20} {} (gzip level {}, brotli q{} w{})",
        label.apply_to("Compress default:"),
        config.compress.format.id(),
        config.compress.gzip_level,
        config.compress.brotli_quality,
        config.compress.brotli_window
    );
    eprintln!(
        "    {:<20} {}",
        label.apply_to("Codecs available:"),
        compress_formats.join(", ")
    );
    eprintln!(
        "    {:<20} {}{}",
        label.apply_to("Download dir:"),
        session.download_dir().display(),
        if config.output.overwrite {
            " (overwrite)"
        } else {
            ""
        }
    );
    eprintln!(
        "    {:<20} {} MB, {}px, {} ms decode",
        label.apply_to("Limits:"),
        config.limits.max_file_size_mb,
        config.limits.max_image_dimension,
        config.limits.decode_timeout_ms
    );
    eprintln!(
        "    {:<20} {}",
        label.apply_to("Log level:"),
        config.logging.level
    );
}
