//! Command-line interface module.

mod args;
pub mod check;
pub mod preview;
pub mod theme;
pub mod trace;

pub use args::{Cli, Commands, PreviewArgs};

use anyhow::{Context, Result};
use retrofolio::PageConfig;
use retrofolio::embed::RETRO_CSS;

/// Run the parsed command.
pub fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Preview { args } => preview::run_preview(args, &load_config(cli)?),
        Commands::Trace { steps } => trace::run_trace(*steps, &load_config(cli)?),
        Commands::Styles => {
            println!("{}", RETRO_CSS.content());
            Ok(())
        }
        Commands::Theme { toggle, store } => {
            theme::run_theme(store, *toggle, &load_config(cli)?.theme)
        }
        Commands::Check { defaults } => check::run_check(&cli.config, *defaults),
    }
}

fn load_config(cli: &Cli) -> Result<PageConfig> {
    PageConfig::load_or_default(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))
}
