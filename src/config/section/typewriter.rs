//! `[typewriter]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [typewriter]
//! element = "typewriter-text"   # id of the element receiving the text
//! texts = ["Passionate Java Developer", "4+ years experience"]
//! type_speed = 80               # ms per typed character
//! delete_speed = 40             # ms per deleted character
//! pause = 2000                  # ms to hold a completed text
//! next_word_delay = 500         # ms between texts
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::behavior::typewriter::Timing;
use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    pub enable: bool,
    pub element: String,
    pub texts: Vec<String>,
    pub type_speed: u64,
    pub delete_speed: u64,
    pub pause: u64,
    pub next_word_delay: u64,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            enable: true,
            element: "typewriter-text".to_owned(),
            texts: vec![
                "Passionate Java Developer".to_owned(),
                "4+ years experience".to_owned(),
            ],
            type_speed: 80,
            delete_speed: 40,
            pause: 2000,
            next_word_delay: 500,
        }
    }
}

impl TypewriterConfig {
    pub fn timing(&self) -> Timing {
        Timing {
            type_speed: Duration::from_millis(self.type_speed),
            delete_speed: Duration::from_millis(self.delete_speed),
            pause: Duration::from_millis(self.pause),
            next_word: Duration::from_millis(self.next_word_delay),
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.enable {
            return;
        }
        if self.element.trim().is_empty() {
            diag.error(FieldPath::new("typewriter.element"), "element id must not be empty");
        }
        if self.texts.is_empty() {
            diag.error_with_hint(
                FieldPath::new("typewriter.texts"),
                "at least one text is required",
                "add `texts = [\"...\"]` or set `enable = false`",
            );
        }
        if self.type_speed == 0 {
            diag.error(FieldPath::new("typewriter.type_speed"), "must be greater than 0");
        }
        if self.delete_speed == 0 {
            diag.error(FieldPath::new("typewriter.delete_speed"), "must be greater than 0");
        }
    }
}
