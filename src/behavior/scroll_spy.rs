//! Active navigation link highlighting.
//!
//! On every window scroll the section under `scroll_y + offset` decides
//! which nav link is `active`. Clicking a link highlights it directly,
//! closes the mobile menu, and mutes scroll updates for a short window so
//! the smooth scroll it triggers does not fight the highlight.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use super::{BehaviorError, Listeners};
use crate::config::ScrollSpyConfig;
use crate::dom::{Dom, Event, EventKind, Target};
use crate::schedule::Scheduler;

const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavHighlightState {
    active_section: Option<String>,
    /// Scroll events before this instant are ignored.
    suppress_until: Option<Duration>,
}

impl NavHighlightState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_section(&self) -> Option<&str> {
        self.active_section.as_deref()
    }

    pub fn suppress_until(&self) -> Option<Duration> {
        self.suppress_until
    }

    pub fn is_suppressed(&self, now: Duration) -> bool {
        self.suppress_until.is_some_and(|until| now < until)
    }

    pub fn suppress(&mut self, now: Duration, window: Duration) {
        self.suppress_until = Some(now.saturating_add(window));
    }

    pub fn set_active(&mut self, section: impl Into<String>) {
        self.active_section = Some(section.into());
    }
}

/// First of `sections` (in document order) whose extent contains `pos`.
pub fn section_at<D: Dom>(dom: &D, sections: &[D::Node], pos: f64) -> Option<D::Node> {
    sections
        .iter()
        .find(|section| dom.extent(section).contains(pos))
        .cloned()
}

/// Section id a nav link points at (`#about` -> `about`).
fn link_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

struct Shared<D: Dom> {
    dom: Weak<D>,
    scheduler: Rc<dyn Scheduler>,
    config: ScrollSpyConfig,
    links: Vec<D::Node>,
    state: RefCell<NavHighlightState>,
}

impl<D: Dom> Shared<D> {
    fn on_scroll(&self) {
        let Some(dom) = self.dom.upgrade() else {
            return;
        };
        if self.state.borrow().is_suppressed(self.scheduler.now()) {
            return;
        }

        let pos = dom.scroll_y() + self.config.offset;
        let sections = dom.query_all(&self.config.sections);
        let Some(id) = section_at(&*dom, &sections, pos)
            .and_then(|s| dom.attribute(&s, "id"))
            .filter(|id| !id.is_empty())
        else {
            return;
        };

        let href = format!("#{id}");
        for link in &self.links {
            if dom.attribute(link, "href").as_deref() == Some(href.as_str()) {
                dom.add_class(link, ACTIVE_CLASS);
            } else {
                dom.remove_class(link, ACTIVE_CLASS);
            }
        }
        crate::debug!("scroll_spy"; "active section: {}", id);
        self.state.borrow_mut().set_active(id);
    }

    fn on_click(&self, clicked: &D::Node) {
        let Some(dom) = self.dom.upgrade() else {
            return;
        };

        for link in &self.links {
            dom.remove_class(link, ACTIVE_CLASS);
        }
        dom.add_class(clicked, ACTIVE_CLASS);

        {
            let mut state = self.state.borrow_mut();
            state.suppress(self.scheduler.now(), self.config.suppress_window());
            if let Some(href) = dom.attribute(clicked, "href")
                && let Some(id) = link_target(&href)
            {
                state.set_active(id);
            }
        }

        if let Some(menu) = dom.query(&self.config.collapse)
            && dom.has_class(&menu, &self.config.collapse_open_class)
        {
            dom.hide_collapsible(&menu);
        }
    }
}

/// Scroll spy attached to a page.
pub struct ScrollSpy<D: Dom + 'static> {
    shared: Rc<Shared<D>>,
    listeners: Listeners<D>,
}

impl<D: Dom + 'static> ScrollSpy<D> {
    pub fn attach(
        dom: &Rc<D>,
        scheduler: Rc<dyn Scheduler>,
        config: &ScrollSpyConfig,
    ) -> Result<Self, BehaviorError> {
        let links = dom.query_all(&config.links);
        if links.is_empty() {
            return Err(BehaviorError::MissingElement(config.links.clone()));
        }

        let shared = Rc::new(Shared {
            dom: Rc::downgrade(dom),
            scheduler,
            config: config.clone(),
            links,
            state: RefCell::new(NavHighlightState::new()),
        });

        let mut listeners = Listeners::new(dom);

        let on_scroll = Rc::downgrade(&shared);
        listeners.push(dom.listen(
            Target::Window,
            EventKind::Scroll,
            Box::new(move |_: &Event| {
                if let Some(shared) = on_scroll.upgrade() {
                    shared.on_scroll();
                }
            }),
        ));

        for link in &shared.links {
            let on_click = Rc::downgrade(&shared);
            let clicked = link.clone();
            listeners.push(dom.listen(
                Target::Node(link.clone()),
                EventKind::Click,
                Box::new(move |_: &Event| {
                    if let Some(shared) = on_click.upgrade() {
                        shared.on_click(&clicked);
                    }
                }),
            ));
        }

        crate::debug!("scroll_spy"; "tracking {} links", shared.links.len());
        Ok(Self { shared, listeners })
    }

    pub fn state(&self) -> NavHighlightState {
        self.shared.state.borrow().clone()
    }

    /// Remove every listener.
    pub fn dispose(&mut self) {
        self.listeners.clear();
    }
}
