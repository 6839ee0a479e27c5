//! Embedded static resources.
//!
//! # Usage
//!
//! ```ignore
//! use retrofolio::embed::RETRO_CSS;
//!
//! dom.inject_style(RETRO_CSS.content());
//! ```

/// Static asset compiled into the binary.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedAsset {
    name: &'static str,
    content: &'static str,
}

impl EmbeddedAsset {
    pub const fn new(name: &'static str, content: &'static str) -> Self {
        Self { name, content }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn content(&self) -> &'static str {
        self.content
    }
}

/// Keyframes, cursor and active-link styles the page behaviors depend on.
///
/// Minified by `build.rs`.
pub const RETRO_CSS: EmbeddedAsset = EmbeddedAsset::new(
    "retro.css",
    include_str!(concat!(env!("OUT_DIR"), "/retro.min.css")),
);

/// Keyframe names the default `animation` values refer to.
pub mod keyframes {
    pub const SLIDE_IN: &str = "retroSlideIn";
    pub const GLITCH: &str = "glitchText";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stylesheet_defines_referenced_keyframes() {
        let css = RETRO_CSS.content();
        for name in [keyframes::SLIDE_IN, keyframes::GLITCH, "retroBlink"] {
            assert!(css.contains(name), "missing keyframes {name}");
        }
        assert!(css.contains(".retro-cursor"));
    }

    #[test]
    fn test_default_animations_use_embedded_keyframes() {
        let config = crate::PageConfig::default();
        for animation in [&config.reveal.animation, &config.effects.glitch.animation] {
            let name = animation.split_whitespace().next().unwrap();
            assert!(RETRO_CSS.content().contains(&format!("@keyframes {name}")));
        }
    }
}
