//! Typewriter effect for the hero subtitle.
//!
//! [`TypewriterState`] is a pure state machine: each [`step`] returns the
//! text to show and how long to wait before the next step. [`Typewriter`]
//! renders those frames into an element and re-schedules itself through a
//! [`Scheduler`] until stopped.
//!
//! One cycle over a text of length `n`:
//!
//! ```text
//! typing   : n steps, char index 1..=n     (last one waits `pause`)
//! flip     : 1 step, no character change   (is_deleting = true)
//! deleting : n steps, char index n-1..=0   (last one advances the text
//!                                           and waits `next_word`)
//! ```
//!
//! [`step`]: TypewriterState::step

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use super::BehaviorError;
use crate::config::TypewriterConfig;
use crate::dom::Dom;
use crate::schedule::{Scheduler, TimerId};
use crate::utils::html::escape;

/// Blinking block cursor appended to every frame.
pub const CURSOR_HTML: &str = r#"<span class="retro-cursor">█</span>"#;

/// Step delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub type_speed: Duration,
    pub delete_speed: Duration,
    /// Hold time once a text is fully typed.
    pub pause: Duration,
    /// Gap between deleting one text and typing the next.
    pub next_word: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            type_speed: Duration::from_millis(100),
            delete_speed: Duration::from_millis(50),
            pause: Duration::from_millis(2000),
            next_word: Duration::from_millis(500),
        }
    }
}

/// Output of one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Visible prefix of the current text, without cursor.
    pub visible: String,
    /// Wait before the next step.
    pub delay: Duration,
}

impl Frame {
    /// Markup for the target element: escaped text plus cursor.
    pub fn to_html(&self) -> String {
        format!("{}{}", escape(&self.visible), CURSOR_HTML)
    }
}

/// First `n` characters of `text`.
fn char_prefix(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypewriterState {
    texts: Vec<String>,
    text_index: usize,
    /// Counted in characters; never exceeds the current text's length.
    char_index: usize,
    is_deleting: bool,
}

impl TypewriterState {
    pub fn new(texts: Vec<String>) -> Result<Self, BehaviorError> {
        if texts.is_empty() {
            return Err(BehaviorError::NoTexts);
        }
        Ok(Self {
            texts,
            text_index: 0,
            char_index: 0,
            is_deleting: false,
        })
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn text_index(&self) -> usize {
        self.text_index
    }

    pub fn char_index(&self) -> usize {
        self.char_index
    }

    pub fn is_deleting(&self) -> bool {
        self.is_deleting
    }

    pub fn current_text(&self) -> &str {
        &self.texts[self.text_index]
    }

    /// Currently visible prefix.
    pub fn visible(&self) -> &str {
        char_prefix(self.current_text(), self.char_index)
    }

    /// Advance by one step.
    pub fn step(&mut self, timing: &Timing) -> Frame {
        let len = self.current_text().chars().count();

        if !self.is_deleting {
            if self.char_index < len {
                self.char_index += 1;
                let delay = if self.char_index == len {
                    timing.pause
                } else {
                    timing.type_speed
                };
                return self.frame(delay);
            }
            self.is_deleting = true;
            return self.frame(timing.delete_speed);
        }

        self.char_index = self.char_index.saturating_sub(1);
        if self.char_index > 0 {
            return self.frame(timing.delete_speed);
        }

        let frame = self.frame(timing.next_word);
        self.is_deleting = false;
        self.text_index = (self.text_index + 1) % self.texts.len();
        frame
    }

    fn frame(&self, delay: Duration) -> Frame {
        Frame {
            visible: self.visible().to_owned(),
            delay,
        }
    }
}

// ============================================================================
// Engine
// ============================================================================

struct Inner<D: Dom> {
    dom: Weak<D>,
    scheduler: Rc<dyn Scheduler>,
    target: D::Node,
    timing: Timing,
    state: RefCell<TypewriterState>,
    last_frame: RefCell<Option<Frame>>,
    pending: Cell<Option<TimerId>>,
    running: Cell<bool>,
}

/// Self-scheduling typewriter bound to one element.
///
/// Dropping the handle stops it.
pub struct Typewriter<D: Dom + 'static> {
    inner: Rc<Inner<D>>,
}

impl<D: Dom + 'static> Typewriter<D> {
    pub fn new(
        dom: &Rc<D>,
        scheduler: Rc<dyn Scheduler>,
        target: D::Node,
        state: TypewriterState,
        timing: Timing,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                dom: Rc::downgrade(dom),
                scheduler,
                target,
                timing,
                state: RefCell::new(state),
                last_frame: RefCell::new(None),
                pending: Cell::new(None),
                running: Cell::new(false),
            }),
        }
    }

    /// Find the configured element and start typing into it.
    pub fn attach(
        dom: &Rc<D>,
        scheduler: Rc<dyn Scheduler>,
        config: &TypewriterConfig,
    ) -> Result<Self, BehaviorError> {
        let target = dom
            .by_id(&config.element)
            .ok_or_else(|| BehaviorError::MissingElement(format!("#{}", config.element)))?;
        let state = TypewriterState::new(config.texts.clone())?;

        let typewriter = Self::new(dom, scheduler, target, state, config.timing());
        typewriter.start();
        Ok(typewriter)
    }

    /// Render the first frame now and keep going. No-op when running.
    pub fn start(&self) {
        if self.inner.running.replace(true) {
            return;
        }
        tick(&self.inner);
    }

    /// Cancel the pending step.
    pub fn stop(&self) {
        self.inner.running.set(false);
        if let Some(id) = self.inner.pending.take() {
            self.inner.scheduler.cancel(id);
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }

    pub fn state(&self) -> TypewriterState {
        self.inner.state.borrow().clone()
    }

    pub fn last_frame(&self) -> Option<Frame> {
        self.inner.last_frame.borrow().clone()
    }
}

impl<D: Dom + 'static> Drop for Typewriter<D> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn tick<D: Dom + 'static>(inner: &Rc<Inner<D>>) {
    inner.pending.set(None);
    if !inner.running.get() {
        return;
    }
    let Some(dom) = inner.dom.upgrade() else {
        inner.running.set(false);
        return;
    };

    let frame = inner.state.borrow_mut().step(&inner.timing);
    dom.set_inner_html(&inner.target, &frame.to_html());

    let next = Rc::clone(inner);
    let id = inner
        .scheduler
        .schedule(frame.delay, Box::new(move || tick(&next)));
    inner.pending.set(Some(id));
    *inner.last_frame.borrow_mut() = Some(frame);
}
