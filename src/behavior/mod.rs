//! Page behaviors.
//!
//! Each behavior attaches itself to a [`Dom`](crate::dom::Dom), keeps its
//! state in its own struct, and removes its listeners on `dispose`. None of
//! them know about each other.
//!
//! | Behavior        | Reacts to                      | State                  |
//! |-----------------|--------------------------------|------------------------|
//! | `typewriter`    | its own timer                  | `TypewriterState`      |
//! | `scroll_spy`    | window scroll, nav-link click  | `NavHighlightState`    |
//! | `reveal`        | intersection reports           | watcher registration   |
//! | `theme`         | toggle click                   | current `Theme`        |
//! | `effects`       | anchor click, scroll, hover    | none                   |

pub mod effects;
pub mod reveal;
pub mod scroll_spy;
pub mod theme;
pub mod typewriter;

pub use effects::{Glitch, Parallax, SmoothScroll};
pub use reveal::Reveal;
pub use scroll_spy::{NavHighlightState, ScrollSpy};
pub use theme::{Theme, ThemeToggle};
pub use typewriter::{Typewriter, TypewriterState};

use std::rc::{Rc, Weak};
use thiserror::Error;

use crate::dom::{Dom, ListenerId};

/// Reasons a behavior cannot attach.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BehaviorError {
    #[error("element `{0}` not found")]
    MissingElement(String),

    #[error("typewriter needs at least one text")]
    NoTexts,
}

/// Listeners registered by one behavior, removed together on drop.
pub(crate) struct Listeners<D: Dom> {
    dom: Weak<D>,
    ids: Vec<ListenerId>,
}

impl<D: Dom> Listeners<D> {
    pub(crate) fn new(dom: &Rc<D>) -> Self {
        Self {
            dom: Rc::downgrade(dom),
            ids: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, id: ListenerId) {
        self.ids.push(id);
    }

    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }

    pub(crate) fn clear(&mut self) {
        if let Some(dom) = self.dom.upgrade() {
            for id in &self.ids {
                dom.unlisten(*id);
            }
        }
        self.ids.clear();
    }
}

impl<D: Dom> Drop for Listeners<D> {
    fn drop(&mut self) {
        self.clear();
    }
}
