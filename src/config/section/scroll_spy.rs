//! `[scroll_spy]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [scroll_spy]
//! sections = "section[id]"      # sections tracked, in document order
//! links = ".nav-link"           # navigation links (href="#<section id>")
//! offset = 250                  # px added to the scroll offset
//! suppress = 1000               # ms scroll updates are ignored after a click
//! collapse = ".navbar-collapse" # mobile menu container
//! collapse_open_class = "show"
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollSpyConfig {
    pub enable: bool,
    pub sections: String,
    pub links: String,
    pub offset: f64,
    pub suppress: u64,
    pub collapse: String,
    pub collapse_open_class: String,
}

impl Default for ScrollSpyConfig {
    fn default() -> Self {
        Self {
            enable: true,
            sections: "section[id]".to_owned(),
            links: ".nav-link".to_owned(),
            offset: 250.0,
            suppress: 1000,
            collapse: ".navbar-collapse".to_owned(),
            collapse_open_class: "show".to_owned(),
        }
    }
}

impl ScrollSpyConfig {
    pub fn suppress_window(&self) -> Duration {
        Duration::from_millis(self.suppress)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.enable {
            return;
        }
        diag.require_selector(FieldPath::new("scroll_spy.sections"), &self.sections);
        diag.require_selector(FieldPath::new("scroll_spy.links"), &self.links);
        if !self.offset.is_finite() {
            diag.error(FieldPath::new("scroll_spy.offset"), "must be a finite number");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use std::time::Duration;

    #[test]
    fn test_scroll_spy_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.scroll_spy.offset, 250.0);
        assert_eq!(config.scroll_spy.suppress_window(), Duration::from_millis(1000));
        assert_eq!(config.scroll_spy.links, ".nav-link");
    }

    #[test]
    fn test_scroll_spy_integer_offset() {
        let config = test_parse_config("[scroll_spy]\noffset = 120");
        assert_eq!(config.scroll_spy.offset, 120.0);
    }

    #[test]
    fn test_scroll_spy_empty_selector() {
        let config = test_parse_config("[scroll_spy]\nlinks = \"\"");
        assert!(config.validate().is_err());
    }
}
