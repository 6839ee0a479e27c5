//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Retrofolio developer tool: preview and check the page behaviors
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: retrofolio.toml)
    #[arg(short = 'C', long, global = true, default_value = "retrofolio.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Play the typewriter animation in the terminal
    #[command(visible_alias = "p")]
    Preview {
        #[command(flatten)]
        args: PreviewArgs,
    },

    /// Print typewriter steps with their timing
    #[command(visible_alias = "t")]
    Trace {
        /// Number of steps to print
        #[arg(short = 'n', long, default_value_t = 40)]
        steps: usize,
    },

    /// Print the stylesheet injected at mount
    Styles,

    /// Show the saved theme, or flip it with --toggle
    Theme {
        /// Switch between dark and light and save the result
        #[arg(long)]
        toggle: bool,

        /// Preferences file standing in for the browser's localStorage
        #[arg(long, default_value = "retrofolio-prefs.json", value_hint = clap::ValueHint::FilePath)]
        store: PathBuf,
    },

    /// Validate the config file
    #[command(visible_alias = "c")]
    Check {
        /// Print the default configuration instead
        #[arg(long)]
        defaults: bool,
    },
}

/// Preview command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct PreviewArgs {
    /// Passes over the text list before stopping (0 = until Ctrl+C)
    #[arg(short, long, default_value_t = 1)]
    pub cycles: u32,

    /// Playback speed multiplier
    #[arg(short, long, default_value_t = 1.0)]
    pub speed: f64,

    /// Text to type instead of the configured ones (repeatable)
    #[arg(short, long = "text", value_name = "TEXT")]
    pub texts: Vec<String>,
}
