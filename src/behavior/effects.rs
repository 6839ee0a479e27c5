//! Decorative effects: smooth in-page scrolling, background line parallax,
//! and the hover glitch on project cards. All stateless.

use std::rc::{Rc, Weak};

use super::{BehaviorError, Listeners};
use crate::config::{GlitchConfig, ParallaxConfig, SmoothScrollConfig};
use crate::dom::{Dom, Event, EventKind, Target};

// ============================================================================
// Smooth scroll
// ============================================================================

/// In-page anchors scroll smoothly instead of jumping.
pub struct SmoothScroll<D: Dom + 'static> {
    listeners: Listeners<D>,
}

impl<D: Dom + 'static> SmoothScroll<D> {
    pub fn attach(dom: &Rc<D>, config: &SmoothScrollConfig) -> Result<Self, BehaviorError> {
        let mut listeners = Listeners::new(dom);

        for anchor in dom.query_all(&config.selector) {
            let page = Rc::downgrade(dom);
            let clicked = anchor.clone();
            listeners.push(dom.listen(
                Target::Node(anchor),
                EventKind::Click,
                Box::new(move |event: &Event| {
                    event.prevent_default();
                    if let Some(dom) = page.upgrade() {
                        scroll_to_fragment(&*dom, &clicked);
                    }
                }),
            ));
        }

        crate::debug!("effects"; "smooth scroll on {} anchors", listeners.len());
        Ok(Self { listeners })
    }

    pub fn dispose(&mut self) {
        self.listeners.clear();
    }
}

/// Scroll to the element named by `anchor`'s `#fragment`, if any.
fn scroll_to_fragment<D: Dom>(dom: &D, anchor: &D::Node) {
    let Some(href) = dom.attribute(anchor, "href") else {
        return;
    };
    let id = href.strip_prefix('#').unwrap_or(href.as_str());
    if id.is_empty() {
        return;
    }
    match dom.by_id(id) {
        Some(target) => dom.scroll_into_view(&target),
        None => crate::debug!("effects"; "no element for {}", href),
    }
}

// ============================================================================
// Parallax
// ============================================================================

/// Background lines drift at increasing speeds while scrolling.
pub struct Parallax<D: Dom + 'static> {
    listeners: Listeners<D>,
}

/// Vertical offset in px of the line at `index` for scroll offset `scroll_y`.
pub fn parallax_offset(config: &ParallaxConfig, index: usize, scroll_y: f64) -> f64 {
    scroll_y * (config.base_speed + index as f64 * config.speed_step)
}

impl<D: Dom + 'static> Parallax<D> {
    pub fn attach(dom: &Rc<D>, config: &ParallaxConfig) -> Result<Self, BehaviorError> {
        let mut listeners = Listeners::new(dom);
        let page = Rc::downgrade(dom);
        let config = config.clone();

        listeners.push(dom.listen(
            Target::Window,
            EventKind::Scroll,
            Box::new(move |_: &Event| {
                if let Some(dom) = page.upgrade() {
                    apply_parallax(&*dom, &config);
                }
            }),
        ));

        Ok(Self { listeners })
    }

    pub fn dispose(&mut self) {
        self.listeners.clear();
    }
}

fn apply_parallax<D: Dom>(dom: &D, config: &ParallaxConfig) {
    let scroll_y = dom.scroll_y();
    for (index, line) in dom.query_all(&config.selector).iter().enumerate() {
        let offset = parallax_offset(config, index, scroll_y);
        dom.set_style(line, "transform", &format!("translateY({offset}px)"));
    }
}

// ============================================================================
// Hover glitch
// ============================================================================

/// Project card placeholders glitch while hovered.
pub struct Glitch<D: Dom + 'static> {
    listeners: Listeners<D>,
}

impl<D: Dom + 'static> Glitch<D> {
    pub fn attach(dom: &Rc<D>, config: &GlitchConfig) -> Result<Self, BehaviorError> {
        let mut listeners = Listeners::new(dom);

        for card in dom.query_all(&config.card) {
            for (kind, animation) in [
                (EventKind::PointerEnter, config.animation.clone()),
                (EventKind::PointerLeave, String::new()),
            ] {
                let page = Rc::downgrade(dom);
                let hovered = card.clone();
                let placeholder = config.placeholder.clone();
                listeners.push(dom.listen(
                    Target::Node(card.clone()),
                    kind,
                    Box::new(move |_: &Event| {
                        set_placeholder_animation(&page, &hovered, &placeholder, &animation);
                    }),
                ));
            }
        }

        crate::debug!("effects"; "glitch on {} cards", listeners.len() / 2);
        Ok(Self { listeners })
    }

    pub fn dispose(&mut self) {
        self.listeners.clear();
    }
}

fn set_placeholder_animation<D: Dom>(
    page: &Weak<D>,
    card: &D::Node,
    placeholder: &str,
    animation: &str,
) {
    if let Some(dom) = page.upgrade()
        && let Some(target) = dom.query_in(card, placeholder)
    {
        dom.set_style(&target, "animation", animation);
    }
}
