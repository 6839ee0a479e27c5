//! Page controller.
//!
//! [`Portfolio::mount`] wires every enabled behavior onto a page. Each one
//! attaches on its own: a missing element disables that behavior, gets
//! logged and recorded, and the rest of the page carries on.
//!
//! Order at mount (DOM ready):
//!
//! 1. inject the embedded stylesheet
//! 2. smooth scroll, scroll spy, reveal, glitch, theme, parallax
//! 3. typewriter, deferred to the window `load` event

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::behavior::{
    BehaviorError, Glitch, Listeners, NavHighlightState, Parallax, Reveal, ScrollSpy,
    SmoothScroll, Theme, ThemeToggle, Typewriter,
};
use crate::config::PageConfig;
use crate::dom::{Dom, Event, EventKind, Target};
use crate::embed::RETRO_CSS;
use crate::schedule::Scheduler;
use crate::storage::Storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Typewriter,
    ScrollSpy,
    Reveal,
    Theme,
    SmoothScroll,
    Parallax,
    Glitch,
}

impl Component {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Typewriter => "typewriter",
            Self::ScrollSpy => "scroll spy",
            Self::Reveal => "reveal",
            Self::Theme => "theme",
            Self::SmoothScroll => "smooth scroll",
            Self::Parallax => "parallax",
            Self::Glitch => "glitch",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `document.readyState`, which decides when a page can be mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

impl ReadyState {
    /// Parse the DOM string. Unrecognized values count as `Interactive`.
    pub fn parse(value: &str) -> Self {
        match value {
            "loading" => Self::Loading,
            "complete" => Self::Complete,
            _ => Self::Interactive,
        }
    }

    /// The document is parsed, behaviors can attach now.
    pub const fn can_mount(self) -> bool {
        !matches!(self, Self::Loading)
    }

    /// `load` has already fired and must be replayed for the typewriter.
    pub const fn load_fired(self) -> bool {
        matches!(self, Self::Complete)
    }
}

type Failures = Rc<RefCell<Vec<(Component, BehaviorError)>>>;

/// Keep a successfully attached behavior, record why one did not attach.
fn record<T>(
    failures: &Failures,
    component: Component,
    result: Result<T, BehaviorError>,
) -> Option<T> {
    match result {
        Ok(behavior) => Some(behavior),
        Err(e) => {
            crate::log!("page"; "{} disabled: {}", component, e);
            failures.borrow_mut().push((component, e));
            None
        }
    }
}

/// Every behavior of one mounted page.
pub struct Portfolio<D: Dom + 'static> {
    typewriter: Rc<RefCell<Option<Typewriter<D>>>>,
    scroll_spy: Option<ScrollSpy<D>>,
    reveal: Option<Reveal<D>>,
    theme: Option<ThemeToggle<D>>,
    smooth_scroll: Option<SmoothScroll<D>>,
    parallax: Option<Parallax<D>>,
    glitch: Option<Glitch<D>>,
    on_load: Listeners<D>,
    failures: Failures,
}

impl<D: Dom + 'static> Portfolio<D> {
    pub fn mount(
        dom: &Rc<D>,
        scheduler: Rc<dyn Scheduler>,
        storage: Rc<dyn Storage>,
        config: &PageConfig,
    ) -> Self {
        if config.styles.inject {
            dom.inject_style(RETRO_CSS.content());
            crate::debug!("page"; "injected {}", RETRO_CSS.name());
        }

        let failures: Failures = Rc::default();
        let effects = &config.effects;

        let smooth_scroll = effects.smooth_scroll.enable.then(|| {
            let result = SmoothScroll::attach(dom, &effects.smooth_scroll);
            record(&failures, Component::SmoothScroll, result)
        });
        let scroll_spy = config.scroll_spy.enable.then(|| {
            let result = ScrollSpy::attach(dom, Rc::clone(&scheduler), &config.scroll_spy);
            record(&failures, Component::ScrollSpy, result)
        });
        let reveal = config.reveal.enable.then(|| {
            let result = Reveal::attach(dom, &config.reveal);
            record(&failures, Component::Reveal, result)
        });
        let glitch = effects.glitch.enable.then(|| {
            let result = Glitch::attach(dom, &effects.glitch);
            record(&failures, Component::Glitch, result)
        });
        let theme = config.theme.enable.then(|| {
            let result = ThemeToggle::attach(dom, storage, &config.theme);
            record(&failures, Component::Theme, result)
        });
        let parallax = effects.parallax.enable.then(|| {
            let result = Parallax::attach(dom, &effects.parallax);
            record(&failures, Component::Parallax, result)
        });

        let typewriter = Rc::new(RefCell::new(None));
        let mut on_load = Listeners::new(dom);
        if config.typewriter.enable {
            let page = Rc::downgrade(dom);
            let slot = Rc::clone(&typewriter);
            let failures = Rc::clone(&failures);
            let config = config.typewriter.clone();

            on_load.push(dom.listen(
                Target::Window,
                EventKind::Load,
                Box::new(move |_: &Event| {
                    let Some(dom) = page.upgrade() else {
                        return;
                    };
                    if slot.borrow().is_some() {
                        return;
                    }
                    let result = Typewriter::attach(&dom, Rc::clone(&scheduler), &config);
                    *slot.borrow_mut() = record(&failures, Component::Typewriter, result);
                }),
            ));
        }

        crate::debug!("page"; "mounted, {} behaviors failed", failures.borrow().len());
        Self {
            typewriter,
            scroll_spy: scroll_spy.flatten(),
            reveal: reveal.flatten(),
            theme: theme.flatten(),
            smooth_scroll: smooth_scroll.flatten(),
            parallax: parallax.flatten(),
            glitch: glitch.flatten(),
            on_load,
            failures,
        }
    }

    /// Behaviors that could not attach, in attach order.
    pub fn failures(&self) -> Vec<(Component, BehaviorError)> {
        self.failures.borrow().clone()
    }

    pub fn is_attached(&self, component: Component) -> bool {
        match component {
            Component::Typewriter => self.typewriter.borrow().is_some(),
            Component::ScrollSpy => self.scroll_spy.is_some(),
            Component::Reveal => self.reveal.is_some(),
            Component::Theme => self.theme.is_some(),
            Component::SmoothScroll => self.smooth_scroll.is_some(),
            Component::Parallax => self.parallax.is_some(),
            Component::Glitch => self.glitch.is_some(),
        }
    }

    pub fn theme(&self) -> Option<Theme> {
        self.theme.as_ref().map(ThemeToggle::current)
    }

    pub fn nav_state(&self) -> Option<NavHighlightState> {
        self.scroll_spy.as_ref().map(ScrollSpy::state)
    }

    pub fn is_typing(&self) -> bool {
        self.typewriter
            .borrow()
            .as_ref()
            .is_some_and(Typewriter::is_running)
    }

    /// Tear everything down: listeners, watcher, typewriter timer.
    pub fn dispose(&mut self) {
        self.on_load.clear();
        if let Some(typewriter) = self.typewriter.borrow_mut().take() {
            typewriter.stop();
        }
        self.scroll_spy = None;
        self.reveal = None;
        self.theme = None;
        self.smooth_scroll = None;
        self.parallax = None;
        self.glitch = None;
    }
}

impl<D: Dom + 'static> Drop for Portfolio<D> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests;
