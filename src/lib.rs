//! Retrofolio - interactive behaviors for a retro-styled portfolio page.
//!
//! The page gets a typewriter hero line, nav highlighting that follows the
//! scroll position, cards that slide in when they come into view, a
//! persisted dark/light theme, and a few decorative effects.
//!
//! # Module Structure
//!
//! ```text
//! src/
//! ├── behavior/    # Typewriter, ScrollSpy, Reveal, ThemeToggle, effects
//! ├── config/      # retrofolio.toml sections and validation
//! ├── dom/         # Dom trait, MemoryDom
//! ├── embed/       # Embedded stylesheet (minified at build time)
//! ├── schedule/    # Scheduler trait, VirtualClock
//! ├── storage/     # Storage trait, MemoryStorage, FileStorage
//! ├── utils/       # HTML escaping
//! ├── web/         # Browser backend (wasm32 only)
//! ├── logger.rs    # log!/debug! macros, LiveLine
//! └── page.rs      # Portfolio: mounts every behavior
//! ```
//!
//! Behaviors only talk to the page through [`dom::Dom`], to time through
//! [`schedule::Scheduler`] and to persistence through [`storage::Storage`],
//! so the same code runs in the browser and against the in-memory fakes.

pub mod logger;

pub mod behavior;
pub mod config;
pub mod dom;
pub mod embed;
pub mod page;
pub mod schedule;
pub mod storage;
pub mod utils;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::PageConfig;
pub use page::{Component, Portfolio, ReadyState};
