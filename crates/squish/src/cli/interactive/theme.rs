//! Dialoguer theme and banner for Squish interactive mode.

use console::{style, Style};
use dialoguer::theme::ColorfulTheme;

/// Returns a `ColorfulTheme` with Squish's prompt symbols.
///
/// - Prompt prefix: magenta `?`
/// - Active item indicator: magenta `▸`
/// - Success prefix: green `✓`
/// - Error prefix: red `✗`
pub fn squish_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("?".to_string()).for_stderr().magenta(),
        prompt_style: Style::new().for_stderr().bold(),
        prompt_suffix: style("›".to_string()).for_stderr().bright().black(),
        active_item_prefix: style("▸".to_string()).for_stderr().magenta(),
        active_item_style: Style::new().for_stderr().magenta(),
        success_prefix: style("✓".to_string()).for_stderr().green(),
        success_suffix: style("·".to_string()).for_stderr().bright().black(),
        error_prefix: style("✗".to_string()).for_stderr().red(),
        error_style: Style::new().for_stderr().red(),
        values_style: Style::new().for_stderr().green(),
        ..ColorfulTheme::default()
    }
}

/// Prints the version banner to stderr so stdout stays clean.
pub fn print_banner() {
    let version_line = format!("Squish v{}", squish_core::VERSION);
    let tagline = "Convert images, compress files";
    let inner_width = tagline.len() + 4;

    let magenta = Style::new().for_stderr().magenta();

    eprintln!();
    eprintln!("{}", magenta.apply_to(format!("  ╭{:─<inner_width$}╮", "")));
    eprintln!("{}", magenta.apply_to(format!("  │{version_line:^inner_width$}│")));
    eprintln!("{}", magenta.apply_to(format!("  │{tagline:^inner_width$}│")));
    eprintln!("{}", magenta.apply_to(format!("  ╰{:─<inner_width$}╯", "")));
    eprintln!();
}
