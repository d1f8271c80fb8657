//! Command-line surface: flag-based subcommands and the interactive menu.

pub mod config;
pub mod interactive;
pub mod process;
pub mod progress;
