//! `[effects.*]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [effects.smooth_scroll]
//! selector = "a[href^=\"#\"]"
//!
//! [effects.parallax]
//! selector = ".line"
//! base_speed = 0.1              # factor for the first line
//! speed_step = 0.05             # added per following line
//!
//! [effects.glitch]
//! card = ".project-card"
//! placeholder = ".project-placeholder"
//! animation = "glitchText 0.5s ease-in-out"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::embed::keyframes;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub smooth_scroll: SmoothScrollConfig,
    pub parallax: ParallaxConfig,
    pub glitch: GlitchConfig,
}

impl EffectsConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.smooth_scroll.enable {
            diag.require_selector(
                FieldPath::new("effects.smooth_scroll.selector"),
                &self.smooth_scroll.selector,
            );
        }
        if self.parallax.enable {
            diag.require_selector(
                FieldPath::new("effects.parallax.selector"),
                &self.parallax.selector,
            );
            diag.require_non_negative(
                FieldPath::new("effects.parallax.base_speed"),
                self.parallax.base_speed,
            );
            if !self.parallax.speed_step.is_finite() {
                diag.error(
                    FieldPath::new("effects.parallax.speed_step"),
                    "must be a finite number",
                );
            }
        }
        if self.glitch.enable {
            diag.require_selector(FieldPath::new("effects.glitch.card"), &self.glitch.card);
            diag.require_selector(
                FieldPath::new("effects.glitch.placeholder"),
                &self.glitch.placeholder,
            );
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothScrollConfig {
    pub enable: bool,
    pub selector: String,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            enable: true,
            selector: "a[href^=\"#\"]".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub enable: bool,
    pub selector: String,
    pub base_speed: f64,
    pub speed_step: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            enable: true,
            selector: ".line".to_owned(),
            base_speed: 0.1,
            speed_step: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlitchConfig {
    pub enable: bool,
    pub card: String,
    pub placeholder: String,
    pub animation: String,
}

impl Default for GlitchConfig {
    fn default() -> Self {
        Self {
            enable: true,
            card: ".project-card".to_owned(),
            placeholder: ".project-placeholder".to_owned(),
            animation: format!("{} 0.5s ease-in-out", keyframes::GLITCH),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_effects_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.effects.smooth_scroll.selector, "a[href^=\"#\"]");
        assert_eq!(config.effects.parallax.base_speed, 0.1);
        assert_eq!(config.effects.parallax.speed_step, 0.05);
        assert_eq!(config.effects.glitch.animation, "glitchText 0.5s ease-in-out");
    }

    #[test]
    fn test_effects_nested_tables() {
        let config = test_parse_config("[effects.parallax]\nenable = false\n\n[effects.glitch]\ncard = \".tile\"");
        assert!(!config.effects.parallax.enable);
        assert_eq!(config.effects.glitch.card, ".tile");
        assert!(config.effects.smooth_scroll.enable);
    }

    #[test]
    fn test_effects_negative_speed() {
        let config = test_parse_config("[effects.parallax]\nbase_speed = -1.0");
        assert!(config.validate().is_err());
    }
}
