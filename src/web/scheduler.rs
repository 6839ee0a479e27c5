//! `Scheduler` over `setTimeout`.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Performance, Window};

use crate::schedule::{Scheduler, Task, TimerId, elapsed_millis};

pub struct WebScheduler {
    window: Window,
    /// Monotonic clock; `Date.now()` is used only where it is missing.
    performance: Option<Performance>,
    /// Clock reading at construction, in ms.
    origin: f64,
    /// Pending timer ids to `setTimeout` handles.
    handles: Rc<RefCell<HashMap<u64, i32>>>,
    next_id: Cell<u64>,
}

impl WebScheduler {
    pub fn new(window: Window) -> Self {
        let performance = window.performance();
        let origin = read_clock(performance.as_ref());
        Self {
            window,
            performance,
            origin,
            handles: Rc::default(),
            next_id: Cell::new(1),
        }
    }
}

fn read_clock(performance: Option<&Performance>) -> f64 {
    performance.map_or_else(js_sys::Date::now, Performance::now)
}

impl Scheduler for WebScheduler {
    fn now(&self) -> Duration {
        elapsed_millis(self.origin, read_clock(self.performance.as_ref()))
    }

    fn schedule(&self, delay: Duration, task: Task) -> TimerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let handles = Rc::downgrade(&self.handles);
        // Freed by wasm-bindgen once called. A cancelled task's closure is never freed.
        let callback = Closure::once_into_js(move || {
            if let Some(handles) = handles.upgrade() {
                handles.borrow_mut().remove(&id);
            }
            task();
        });

        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
        {
            Ok(handle) => {
                self.handles.borrow_mut().insert(id, handle);
            }
            Err(e) => crate::log!("schedule"; "setTimeout failed: {:?}", e),
        }
        TimerId(id)
    }

    fn cancel(&self, id: TimerId) {
        let handle = self.handles.borrow_mut().remove(&id.0);
        if let Some(handle) = handle {
            self.window.clear_timeout_with_handle(handle);
        }
    }
}
