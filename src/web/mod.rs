//! Browser backend (wasm32 only).
//!
//! # Module Structure
//!
//! ```text
//! web/
//! ├── mod.rs        # start entry point, page lifetime (this file)
//! ├── dom.rs        # WebDom: Dom over web-sys
//! ├── scheduler.rs  # WebScheduler: setTimeout/clearTimeout
//! └── storage.rs    # LocalStorage
//! ```
//!
//! Configuration comes from an optional inline element:
//!
//! ```html
//! <script type="application/toml" id="retrofolio-config">
//! [typewriter]
//! texts = ["Hello", "World"]
//! </script>
//! ```

mod dom;
mod scheduler;
mod storage;

pub use dom::WebDom;
pub use scheduler::WebScheduler;
pub use storage::LocalStorage;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::config::PageConfig;
use crate::page::{Portfolio, ReadyState};

/// Id of the inline config element.
const CONFIG_ELEMENT: &str = "retrofolio-config";

thread_local! {
    static PAGE: RefCell<Option<(Portfolio<WebDom>, Rc<WebDom>)>> = const { RefCell::new(None) };
}

/// Read the inline config, falling back to defaults on any problem.
fn page_config(document: &Document) -> PageConfig {
    let Some(source) = document
        .get_element_by_id(CONFIG_ELEMENT)
        .and_then(|el| el.text_content())
    else {
        return PageConfig::default();
    };

    let config = match PageConfig::parse(&source) {
        Ok(config) => config,
        Err(e) => {
            crate::log!("config"; "{}, using defaults", e);
            return PageConfig::default();
        }
    };
    match config.validate() {
        Ok(()) => config,
        Err(diagnostics) => {
            crate::log!("config"; "{}", diagnostics);
            PageConfig::default()
        }
    }
}

fn mount() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let dom = Rc::new(WebDom::new(window.clone()).ok_or_else(|| JsValue::from_str("no document"))?);
    let config = page_config(dom.document());

    let scheduler = Rc::new(WebScheduler::new(window.clone()));
    let storage = Rc::new(LocalStorage::new(&window));
    let portfolio = Portfolio::mount(&dom, scheduler, storage, &config);

    // Loaded already: replay `load` so the typewriter starts.
    if ReadyState::parse(&dom.document().ready_state()).load_fired() {
        window.dispatch_event(&web_sys::Event::new("load")?)?;
    }

    PAGE.with(|page| *page.borrow_mut() = Some((portfolio, dom)));
    Ok(())
}

/// Module entry point: mount once the document is parsed.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if ReadyState::parse(&document.ready_state()).can_mount() {
        return mount();
    }

    let on_ready = Closure::once_into_js(|| {
        if let Err(e) = mount() {
            crate::log!("page"; "mount failed: {:?}", e);
        }
    });
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
}

/// Remove every listener and timer the page installed.
#[wasm_bindgen]
pub fn dispose() {
    if let Some((mut portfolio, _dom)) = PAGE.with(|page| page.borrow_mut().take()) {
        portfolio.dispose();
    }
}
