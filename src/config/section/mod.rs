//! Configuration section definitions.
//!
//! One file per behavior; every struct uses `#[serde(default)]` so a partial
//! section only overrides what it names.

mod effects;
mod reveal;
mod scroll_spy;
mod styles;
mod theme;
mod typewriter;

pub use effects::{EffectsConfig, GlitchConfig, ParallaxConfig, SmoothScrollConfig};
pub use reveal::RevealConfig;
pub use scroll_spy::ScrollSpyConfig;
pub use styles::StylesConfig;
pub use theme::ThemeConfig;
pub use typewriter::TypewriterConfig;
