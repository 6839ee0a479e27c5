//! `[reveal]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [reveal]
//! selectors = [".about-card", ".timeline-item", ".skill-card", ".project-card"]
//! threshold = 0.1
//! root_margin = "0px 0px -50px 0px"
//! offset = 50                   # px the hidden element is pushed down
//! animation = "retroSlideIn 0.8s ease-out forwards"
//! once = true                   # stop watching an element after its reveal
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::dom::ObserverOptions;
use crate::embed::keyframes;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub enable: bool,
    pub selectors: Vec<String>,
    pub threshold: f64,
    pub root_margin: String,
    pub offset: f64,
    pub animation: String,
    pub once: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            enable: true,
            selectors: [".about-card", ".timeline-item", ".skill-card", ".project-card"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_owned(),
            offset: 50.0,
            animation: format!("{} 0.8s ease-out forwards", keyframes::SLIDE_IN),
            once: true,
        }
    }
}

impl RevealConfig {
    pub fn observer_options(&self) -> ObserverOptions {
        ObserverOptions {
            threshold: self.threshold,
            root_margin: self.root_margin.clone(),
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.enable {
            return;
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            diag.error(
                FieldPath::new("reveal.threshold"),
                format!("must be within [0, 1], got {}", self.threshold),
            );
        }
        if self.selectors.iter().any(|s| s.trim().is_empty()) {
            diag.error(FieldPath::new("reveal.selectors"), "selectors must not be empty");
        }
        diag.require_non_negative(FieldPath::new("reveal.offset"), self.offset);
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_reveal_defaults() {
        let config = test_parse_config("");
        let options = config.reveal.observer_options();
        assert_eq!(options.threshold, 0.1);
        assert_eq!(options.root_margin, "0px 0px -50px 0px");
        assert_eq!(config.reveal.selectors.len(), 4);
        assert!(config.reveal.once);
    }

    #[test]
    fn test_reveal_threshold_range() {
        let config = test_parse_config("[reveal]\nthreshold = 1.5");
        let diag = config.validate().unwrap_err();
        assert_eq!(diag.errors()[0].field.as_str(), "reveal.threshold");
    }
}
