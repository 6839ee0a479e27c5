//! DOM capability interface.
//!
//! Every behavior talks to the page through the [`Dom`] trait so the same code
//! drives a real browser (`crate::web`, wasm32 only) and the in-memory
//! [`MemoryDom`] used by tests and the terminal preview.
//!
//! # Module Structure
//!
//! ```text
//! dom/
//! ├── mod.rs       # Dom trait, events, intersection types (this file)
//! └── memory.rs    # MemoryDom: in-memory page, tl-backed selectors
//! ```

mod memory;

pub use memory::{MemoryDom, NodeRef};

use std::cell::Cell;
use std::fmt;

// ============================================================================
// Geometry
// ============================================================================

/// Vertical extent of an element in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    pub top: f64,
    pub height: f64,
}

impl Extent {
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Half-open containment: `[top, top + height)`.
    pub fn contains(&self, pos: f64) -> bool {
        pos >= self.top && pos < self.top + self.height
    }
}

// ============================================================================
// Events
// ============================================================================

/// Event kinds the behaviors subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Load,
    Scroll,
    Click,
    PointerEnter,
    PointerLeave,
}

impl EventKind {
    /// DOM event type name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Scroll => "scroll",
            Self::Click => "click",
            Self::PointerEnter => "mouseenter",
            Self::PointerLeave => "mouseleave",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a listener is attached.
#[derive(Debug, Clone, PartialEq)]
pub enum Target<N> {
    Window,
    Node(N),
}

/// Event handed to listeners.
#[derive(Debug, Default)]
pub struct Event {
    default_prevented: Cell<bool>,
}

impl Event {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress the platform's default action (e.g. anchor navigation).
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

pub type Handler = Box<dyn FnMut(&Event)>;

/// Handle returned by [`Dom::listen`], used to remove the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

// ============================================================================
// Intersection watching
// ============================================================================

/// Options for an intersection watcher.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    /// Visible ratio that counts as intersecting.
    pub threshold: f64,
    /// CSS margin applied to the viewport, e.g. `0px 0px -50px 0px`.
    pub root_margin: String,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin: "0px".to_owned(),
        }
    }
}

/// One change report from an intersection watcher.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry<N> {
    pub target: N,
    pub is_intersecting: bool,
    pub ratio: f64,
}

pub type IntersectionCallback<N> = Box<dyn FnMut(&[IntersectionEntry<N>])>;

/// Handle returned by [`Dom::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatcherId(pub u64);

// ============================================================================
// Dom trait
// ============================================================================

/// Page capabilities used by the behaviors.
///
/// Methods take `&self`: implementations use interior mutability since
/// listeners call back into the page while it dispatches.
pub trait Dom {
    type Node: Clone + PartialEq + fmt::Debug + 'static;

    // --- selection ---

    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    /// First element matching `selector`.
    fn query(&self, selector: &str) -> Option<Self::Node> {
        self.query_all(selector).into_iter().next()
    }

    /// First descendant of `parent` matching `selector`.
    fn query_in(&self, parent: &Self::Node, selector: &str) -> Option<Self::Node>;

    fn by_id(&self, id: &str) -> Option<Self::Node>;

    /// The document body, carrier of document-level attributes.
    fn body(&self) -> Option<Self::Node>;

    // --- attributes / content ---

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    fn set_inner_html(&self, node: &Self::Node, html: &str);

    // --- style / classes ---

    /// Set an inline style property; an empty value removes it.
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);

    /// Append a stylesheet to the document head.
    fn inject_style(&self, css: &str);

    // --- geometry / scrolling ---

    fn extent(&self, node: &Self::Node) -> Extent;

    /// Current vertical scroll offset of the viewport.
    fn scroll_y(&self) -> f64;

    /// Smoothly scroll `node` to the top of the viewport.
    fn scroll_into_view(&self, node: &Self::Node);

    // --- widgets ---

    /// Hide a collapsible menu through the page's collapse widget.
    fn hide_collapsible(&self, container: &Self::Node);

    // --- events ---

    fn listen(&self, target: Target<Self::Node>, kind: EventKind, handler: Handler) -> ListenerId;

    /// Remove a listener. Unknown ids are ignored.
    fn unlisten(&self, id: ListenerId);

    // --- intersection ---

    fn observe(
        &self,
        nodes: &[Self::Node],
        options: &ObserverOptions,
        callback: IntersectionCallback<Self::Node>,
    ) -> WatcherId;

    /// Stop reporting `node` to `watcher`.
    fn unobserve(&self, watcher: WatcherId, node: &Self::Node);

    /// Stop the watcher entirely and drop its callback.
    fn disconnect(&self, watcher: WatcherId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent_half_open() {
        let extent = Extent::new(100.0, 150.0);
        assert!(!extent.contains(99.9));
        assert!(extent.contains(100.0));
        assert!(extent.contains(249.9));
        assert!(!extent.contains(250.0));
    }

    #[test]
    fn test_extent_unbounded() {
        let extent = Extent::new(250.0, f64::INFINITY);
        assert!(extent.contains(1e9));
    }

    #[test]
    fn test_prevent_default() {
        let event = Event::new();
        assert!(!event.is_default_prevented());
        event.prevent_default();
        assert!(event.is_default_prevented());
    }
}
