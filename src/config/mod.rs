//! Page configuration management for `retrofolio.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # One section per behavior
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! └── mod.rs         # PageConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section              | Purpose                                        |
//! |----------------------|------------------------------------------------|
//! | `[typewriter]`       | Texts and timing of the hero typewriter        |
//! | `[scroll_spy]`       | Active nav-link highlighting                   |
//! | `[reveal]`           | Scroll-triggered reveal animations             |
//! | `[theme]`            | Persisted dark/light toggle                    |
//! | `[effects.*]`        | Smooth scroll, parallax, hover glitch          |
//! | `[styles]`           | Stylesheet injection                           |
//!
//! Every field has a default matching the portfolio page, so an empty file
//! (or no file at all) is a valid configuration.

pub mod section;
pub mod types;

pub use section::{
    EffectsConfig, GlitchConfig, ParallaxConfig, RevealConfig, ScrollSpyConfig,
    SmoothScrollConfig, StylesConfig, ThemeConfig, TypewriterConfig,
};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing retrofolio.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub typewriter: TypewriterConfig,
    pub scroll_spy: ScrollSpyConfig,
    pub reveal: RevealConfig,
    pub theme: ThemeConfig,
    pub effects: EffectsConfig,
    pub styles: StylesConfig,
}

impl PageConfig {
    /// Parse configuration from a TOML string (no validation).
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Parse TOML content, collecting any unknown fields.
    pub fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Load and validate configuration from a file.
    ///
    /// Unknown fields are reported and ignored.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        config.validate().map_err(ConfigError::Diagnostics)?;
        Ok(config)
    }

    /// Load `path` when it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            crate::debug!("config"; "{} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        crate::log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Validate every section, collecting all problems.
    pub fn validate(&self) -> Result<(), ConfigDiagnostics> {
        let mut diag = ConfigDiagnostics::new();
        self.typewriter.validate(&mut diag);
        self.scroll_spy.validate(&mut diag);
        self.reveal.validate(&mut diag);
        self.theme.validate(&mut diag);
        self.effects.validate(&mut diag);
        diag.into_result()
    }

    /// Render as TOML (used by `check --defaults`).
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Parse a config snippet in tests, panicking on syntax errors.
#[cfg(test)]
pub(crate) fn test_parse_config(content: &str) -> PageConfig {
    PageConfig::parse(content).expect("test config should parse")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_is_valid() {
        let config = test_parse_config("");
        assert_eq!(config, PageConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_fields_collected() {
        let (config, ignored) =
            PageConfig::parse_with_ignored("[typewriter]\nspeed = 3\n\n[extra]\nx = 1").unwrap();
        assert_eq!(config.typewriter, TypewriterConfig::default());
        assert!(ignored.contains(&"typewriter.speed".to_owned()));
        assert!(ignored.contains(&"extra".to_owned()));
    }

    #[test]
    fn test_defaults_roundtrip_through_toml() {
        let rendered = PageConfig::default().to_toml().unwrap();
        assert_eq!(test_parse_config(&rendered), PageConfig::default());
    }

    #[test]
    fn test_load_validates() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("retrofolio.toml");
        fs::write(&path, "[typewriter]\ntexts = []").unwrap();

        let err = PageConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Diagnostics(ref d) if d.len() == 1));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.toml");

        assert!(matches!(PageConfig::load(&path), Err(ConfigError::Io(..))));
        assert_eq!(PageConfig::load_or_default(&path).unwrap(), PageConfig::default());
    }

    #[test]
    fn test_syntax_error() {
        assert!(matches!(
            PageConfig::parse("[typewriter"),
            Err(ConfigError::Toml(_))
        ));
    }
}
