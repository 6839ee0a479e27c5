//! `[theme]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [theme]
//! toggle = "themeToggle"        # id of the toggle control
//! storage_key = "theme"
//! attribute = "data-theme"      # attribute set on <body>
//! default = "dark"              # used when nothing valid is stored
//! ```

use serde::{Deserialize, Serialize};

use crate::behavior::Theme;
use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub enable: bool,
    pub toggle: String,
    pub storage_key: String,
    pub attribute: String,
    pub default: Theme,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            enable: true,
            toggle: "themeToggle".to_owned(),
            storage_key: "theme".to_owned(),
            attribute: "data-theme".to_owned(),
            default: Theme::Dark,
        }
    }
}

impl ThemeConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.enable {
            return;
        }
        if self.storage_key.is_empty() {
            diag.error(FieldPath::new("theme.storage_key"), "must not be empty");
        }
        if self.attribute.is_empty() {
            diag.error(FieldPath::new("theme.attribute"), "must not be empty");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::behavior::Theme;
    use crate::config::test_parse_config;

    #[test]
    fn test_theme_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.theme.default, Theme::Dark);
        assert_eq!(config.theme.storage_key, "theme");
    }

    #[test]
    fn test_theme_default_light() {
        let config = test_parse_config("[theme]\ndefault = \"light\"");
        assert_eq!(config.theme.default, Theme::Light);
    }

    #[test]
    fn test_theme_unknown_default_rejected() {
        let result = crate::config::PageConfig::parse("[theme]\ndefault = \"sepia\"");
        assert!(result.is_err());
    }
}
