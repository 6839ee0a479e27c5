//! `check` command: validate the config file.

use std::path::Path;

use anyhow::{Context, Result, bail};
use owo_colors::OwoColorize;
use retrofolio::PageConfig;
use retrofolio::config::ConfigError;

pub fn run_check(path: &Path, defaults: bool) -> Result<()> {
    if defaults {
        let rendered = PageConfig::default()
            .to_toml()
            .context("failed to render default config")?;
        print!("{rendered}");
        return Ok(());
    }

    if !path.exists() {
        retrofolio::log!("check"; "{} not found, defaults apply", path.display());
        return Ok(());
    }

    match PageConfig::load(path) {
        Ok(config) => {
            retrofolio::log!("check"; "{} is valid", path.display());
            for (name, enabled) in enabled_behaviors(&config) {
                let state = if enabled { "on".green().to_string() } else { "off".dimmed().to_string() };
                println!("  {name:<14} {state}");
            }
            Ok(())
        }
        Err(ConfigError::Diagnostics(diagnostics)) => {
            eprintln!("{diagnostics}");
            bail!("{} has {} problem(s)", path.display(), diagnostics.len())
        }
        Err(e) => Err(e).with_context(|| format!("failed to load {}", path.display())),
    }
}

fn enabled_behaviors(config: &PageConfig) -> [(&'static str, bool); 7] {
    [
        ("typewriter", config.typewriter.enable),
        ("scroll spy", config.scroll_spy.enable),
        ("reveal", config.reveal.enable),
        ("theme", config.theme.enable),
        ("smooth scroll", config.effects.smooth_scroll.enable),
        ("parallax", config.effects.parallax.enable),
        ("glitch", config.effects.glitch.enable),
    ]
}
