//! Library interface for the `promptshelf` CLI.
//!
//! This crate exposes the CLI's argument parser and command structure as a library,
//! primarily for documentation generation and testing. The actual entry point is
//! in `main.rs`.
//!
//! # Structure
//!
//! - [`Cli`] - The root argument parser (clap derive)
//! - [`Commands`] - Available subcommands
//! - [`commands`] - Command implementations

pub mod commands;

#[cfg(feature = "mcp")]
pub mod server;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Color output preference.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect terminal capabilities automatically.
    #[default]
    Auto,
    /// Always emit colors.
    Always,
    /// Never emit colors.
    Never,
}

impl ColorChoice {
    /// Configure global color output based on this choice.
    ///
    /// Call this once at startup to set the color mode.
    pub fn apply(self) {
        match self {
            Self::Auto => {} // owo-colors auto-detects by default
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG                      Log filter (e.g., debug, promptshelf=trace)
    PROMPTSHELF_LOG_PATH          Explicit log file path
    PROMPTSHELF_LOG_DIR           Log directory
    PROMPTSHELF_LOG_LEVEL         Default log level (debug, info, warn, error)
    PROMPTSHELF_STORAGE__BACKEND  Library backend (file, memory)
    PROMPTSHELF_STORAGE__PATH     Library file path
";
/// Command-line interface definition for promptshelf.
#[derive(Parser)]
#[command(name = "promptshelf")]
#[command(about = "Keep a library of prompts and get suggestions to improve them", long_about = None)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print only the version number (for scripting)
    #[arg(long)]
    pub version_only: bool,

    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Only print errors (suppresses warnings/info)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More detail (repeatable; e.g. -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available subcommands for the CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// Score a prompt and suggest improvements
    Analyze(commands::analyze::AnalyzeArgs),

    /// Manage saved prompts
    Prompt(commands::prompt::PromptArgs),

    /// Manage projects
    Project(commands::project::ProjectArgs),

    /// Manage categories within projects
    Category(commands::category::CategoryArgs),

    /// Show package information
    Info(commands::info::InfoArgs),

    /// Start MCP (Model Context Protocol) server on stdio
    #[cfg(feature = "mcp")]
    Serve(commands::serve::ServeArgs),
}

/// Returns the clap command for documentation generation
pub fn command() -> clap::Command {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        command().debug_assert();
    }

    #[test]
    fn analyze_text_conflicts_with_file() {
        let parsed = Cli::try_parse_from(["promptshelf", "analyze", "prompt.txt", "--text", "hi"]);
        assert!(parsed.is_err());
    }
}
