//! `[styles]` section configuration.
//!
//! ```toml
//! [styles]
//! inject = true   # append the embedded stylesheet to <head> at mount
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylesConfig {
    pub inject: bool,
}

impl Default for StylesConfig {
    fn default() -> Self {
        Self { inject: true }
    }
}
