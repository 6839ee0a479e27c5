//! `theme` command: show or flip the saved theme.
//!
//! The theme toggle is mounted on an in-memory page whose storage is a JSON
//! preferences file, so the value survives between runs the way
//! `localStorage` does in the browser.

use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result, bail};
use retrofolio::behavior::{Theme, ThemeToggle};
use retrofolio::config::section::ThemeConfig;
use retrofolio::dom::{Dom, MemoryDom};
use retrofolio::storage::{FileStorage, Storage};

pub fn run_theme(store: &Path, toggle: bool, config: &ThemeConfig) -> Result<()> {
    let theme = apply_theme(store, toggle, config)?;
    println!("{theme}");
    Ok(())
}

/// Mount the toggle, click it when asked, and return the resulting theme.
fn apply_theme(store: &Path, toggle: bool, config: &ThemeConfig) -> Result<Theme> {
    let dom = Rc::new(MemoryDom::new());
    let body = dom.body().context("in-memory page has no body")?;
    let button = dom.add(&body, "button", &[("id", config.toggle.as_str())]);

    let storage = Rc::new(FileStorage::new(store));
    retrofolio::debug!("theme"; "preferences at {}", storage.path().display());
    let theme = ThemeToggle::attach(&dom, storage.clone(), config)?;

    if toggle {
        dom.click(&button);
        // The toggle only logs a failed save; here it is an error.
        let saved = storage
            .get(&config.storage_key)
            .with_context(|| format!("failed to read back {}", store.display()))?;
        if saved.as_deref() != Some(theme.current().as_str()) {
            bail!("theme was not saved to {}", store.display());
        }
    }
    Ok(theme.current())
}
