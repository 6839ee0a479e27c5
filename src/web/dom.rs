//! `Dom` over the browser document.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, EventTarget, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
    Window,
};

use crate::dom::{
    Dom, Event, EventKind, Extent, Handler, IntersectionCallback, IntersectionEntry, ListenerId,
    ObserverOptions, Target, WatcherId,
};

#[wasm_bindgen]
extern "C" {
    /// Bootstrap's collapse widget.
    #[wasm_bindgen(js_namespace = bootstrap)]
    type Collapse;

    #[wasm_bindgen(constructor, js_namespace = bootstrap, catch)]
    fn new(element: &Element) -> Result<Collapse, JsValue>;

    #[wasm_bindgen(method)]
    fn hide(this: &Collapse);
}

struct Registered {
    target: EventTarget,
    kind: EventKind,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

struct Watching {
    observer: IntersectionObserver,
    // Must outlive the observer.
    _closure: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

pub struct WebDom {
    window: Window,
    document: Document,
    listeners: RefCell<HashMap<ListenerId, Registered>>,
    watchers: RefCell<HashMap<WatcherId, Watching>>,
    next_id: Cell<u64>,
}

impl WebDom {
    pub fn new(window: Window) -> Option<Self> {
        let document = window.document()?;
        Some(Self {
            window,
            document,
            listeners: RefCell::default(),
            watchers: RefCell::default(),
            next_id: Cell::new(1),
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn next_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

fn as_html(node: &Element) -> Option<&HtmlElement> {
    node.dyn_ref::<HtmlElement>()
}

impl Dom for WebDom {
    type Node = Element;

    fn query_all(&self, selector: &str) -> Vec<Element> {
        match self.document.query_selector_all(selector) {
            Ok(list) => (0..list.length())
                .filter_map(|i| list.item(i))
                .filter_map(|node| node.dyn_into::<Element>().ok())
                .collect(),
            Err(_) => {
                crate::debug!("dom"; "invalid selector: {}", selector);
                Vec::new()
            }
        }
    }

    fn query_in(&self, parent: &Element, selector: &str) -> Option<Element> {
        parent.query_selector(selector).ok().flatten()
    }

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        if node.set_attribute(name, value).is_err() {
            crate::debug!("dom"; "cannot set attribute {}", name);
        }
    }

    fn set_inner_html(&self, node: &Element, html: &str) {
        node.set_inner_html(html);
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        let Some(element) = as_html(node) else {
            return;
        };
        let style = element.style();
        let result = if value.is_empty() {
            style.remove_property(property).map(drop)
        } else {
            style.set_property(property, value)
        };
        if result.is_err() {
            crate::debug!("dom"; "cannot set style {}", property);
        }
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        node.class_list().add_1(class).ok();
    }

    fn remove_class(&self, node: &Element, class: &str) {
        node.class_list().remove_1(class).ok();
    }

    fn inject_style(&self, css: &str) {
        let Ok(style) = self.document.create_element("style") else {
            return;
        };
        style.set_text_content(Some(css));
        if let Some(head) = self.document.head() {
            head.append_child(&style).ok();
        }
    }

    fn extent(&self, node: &Element) -> Extent {
        as_html(node)
            .map(|el| Extent::new(f64::from(el.offset_top()), f64::from(el.offset_height())))
            .unwrap_or_default()
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_into_view(&self, node: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        node.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn hide_collapsible(&self, container: &Element) {
        match Collapse::new(container) {
            Ok(collapse) => collapse.hide(),
            // No bootstrap on the page: close it by hand.
            Err(_) => {
                container.class_list().remove_1("show").ok();
            }
        }
    }

    fn listen(&self, target: Target<Element>, kind: EventKind, mut handler: Handler) -> ListenerId {
        let target: EventTarget = match target {
            Target::Window => self.window.clone().into(),
            Target::Node(node) => node.into(),
        };
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |raw: web_sys::Event| {
            let event = Event::new();
            handler(&event);
            if event.is_default_prevented() {
                raw.prevent_default();
            }
        });

        let id = ListenerId(self.next_id());
        if target
            .add_event_listener_with_callback(kind.as_str(), closure.as_ref().unchecked_ref())
            .is_err()
        {
            crate::log!("dom"; "cannot listen for {}", kind);
            return id;
        }
        self.listeners.borrow_mut().insert(
            id,
            Registered {
                target,
                kind,
                closure,
            },
        );
        id
    }

    fn unlisten(&self, id: ListenerId) {
        let Some(registered) = self.listeners.borrow_mut().remove(&id) else {
            return;
        };
        registered
            .target
            .remove_event_listener_with_callback(
                registered.kind.as_str(),
                registered.closure.as_ref().unchecked_ref(),
            )
            .ok();
    }

    fn observe(
        &self,
        nodes: &[Element],
        options: &ObserverOptions,
        mut callback: IntersectionCallback<Element>,
    ) -> WatcherId {
        let closure = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, _: IntersectionObserver| {
                let entries: Vec<_> = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| IntersectionEntry {
                        target: entry.target(),
                        is_intersecting: entry.is_intersecting(),
                        ratio: entry.intersection_ratio(),
                    })
                    .collect();
                callback(&entries);
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);

        let id = WatcherId(self.next_id());
        match IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                for node in nodes {
                    observer.observe(node);
                }
                self.watchers.borrow_mut().insert(
                    id,
                    Watching {
                        observer,
                        _closure: closure,
                    },
                );
            }
            Err(e) => crate::log!("dom"; "IntersectionObserver unavailable: {:?}", e),
        }
        id
    }

    fn unobserve(&self, watcher: WatcherId, node: &Element) {
        if let Some(watching) = self.watchers.borrow().get(&watcher) {
            watching.observer.unobserve(node);
        }
    }

    fn disconnect(&self, watcher: WatcherId) {
        if let Some(watching) = self.watchers.borrow_mut().remove(&watcher) {
            watching.observer.disconnect();
        }
    }
}
