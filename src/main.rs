//! Retrofolio developer tool.
//!
//! The page behaviors run in the browser; this binary drives the same code
//! headlessly to preview the typewriter and check configuration.

#[cfg(not(target_arch = "wasm32"))]
mod cli;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::{ColorChoice, Parser};

    let cli = cli::Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    retrofolio::logger::set_verbose(cli.verbose);

    cli::run(&cli)
}

/// The browser entry point is `retrofolio::web::start`.
#[cfg(target_arch = "wasm32")]
fn main() {}
