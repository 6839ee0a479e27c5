//! In-memory page used by tests and the terminal preview.
//!
//! `MemoryDom` keeps a small element tree (`html > head, body`), inline
//! styles, listeners and intersection watchers. Nothing is laid out: element
//! extents and the scroll offset are set explicitly, and events are fired by
//! the caller through [`MemoryDom::dispatch`] and friends.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;
use std::rc::Rc;

use super::{
    Dom, Event, EventKind, Extent, Handler, IntersectionCallback, IntersectionEntry, ListenerId,
    ObserverOptions, Target, WatcherId,
};

/// Handle to an element in a [`MemoryDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef(usize);

#[derive(Debug)]
struct NodeData {
    tag: String,
    attrs: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    inner_html: String,
    extent: Extent,
    children: Vec<NodeRef>,
}

impl NodeData {
    fn new(tag: &str, attrs: &[(&str, &str)]) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: attrs
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
            style: BTreeMap::new(),
            inner_html: String::new(),
            extent: Extent::default(),
            children: Vec::new(),
        }
    }

    fn classes(&self) -> impl Iterator<Item = &str> {
        self.attrs
            .get("class")
            .map(String::as_str)
            .unwrap_or("")
            .split_ascii_whitespace()
    }
}

struct Listener {
    id: ListenerId,
    target: Target<NodeRef>,
    kind: EventKind,
    handler: Rc<RefCell<Handler>>,
}

struct Watcher {
    id: WatcherId,
    options: ObserverOptions,
    targets: Vec<NodeRef>,
    callback: Rc<RefCell<IntersectionCallback<NodeRef>>>,
}

pub struct MemoryDom {
    nodes: RefCell<Vec<NodeData>>,
    root: NodeRef,
    head: NodeRef,
    body: NodeRef,
    scroll_y: Cell<f64>,
    styles: RefCell<Vec<String>>,
    scrolled_into_view: RefCell<Vec<NodeRef>>,
    hidden_collapsibles: RefCell<Vec<NodeRef>>,
    listeners: RefCell<Vec<Listener>>,
    watchers: RefCell<Vec<Watcher>>,
    next_id: Cell<u64>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Empty document with `html`, `head` and `body`.
    pub fn new() -> Self {
        let root = NodeRef(0);
        let head = NodeRef(1);
        let body = NodeRef(2);

        let mut html = NodeData::new("html", &[]);
        html.children = vec![head, body];
        let nodes = vec![html, NodeData::new("head", &[]), NodeData::new("body", &[])];

        Self {
            nodes: RefCell::new(nodes),
            root,
            head,
            body,
            scroll_y: Cell::new(0.0),
            styles: RefCell::new(Vec::new()),
            scrolled_into_view: RefCell::new(Vec::new()),
            hidden_collapsibles: RefCell::new(Vec::new()),
            listeners: RefCell::new(Vec::new()),
            watchers: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }

    fn next_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    // ========================================================================
    // Building
    // ========================================================================

    pub fn head(&self) -> NodeRef {
        self.head
    }

    /// Create a detached element.
    pub fn create(&self, tag: &str, attrs: &[(&str, &str)]) -> NodeRef {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(NodeData::new(tag, attrs));
        NodeRef(nodes.len() - 1)
    }

    pub fn append(&self, parent: &NodeRef, child: &NodeRef) {
        self.nodes.borrow_mut()[parent.0].children.push(*child);
    }

    /// Create an element and append it to `parent`.
    pub fn add(&self, parent: &NodeRef, tag: &str, attrs: &[(&str, &str)]) -> NodeRef {
        let node = self.create(tag, attrs);
        self.append(parent, &node);
        node
    }

    pub fn set_extent(&self, node: &NodeRef, extent: Extent) {
        self.nodes.borrow_mut()[node.0].extent = extent;
    }

    pub fn set_scroll_y(&self, y: f64) {
        self.scroll_y.set(y);
    }

    // ========================================================================
    // Firing events
    // ========================================================================

    /// Run every listener registered for `target`/`kind`.
    ///
    /// Handlers may call back into the DOM. A handler that is already running
    /// (re-entrant dispatch) is skipped.
    pub fn dispatch(&self, target: &Target<NodeRef>, kind: EventKind) -> Event {
        let handlers: Vec<_> = self
            .listeners
            .borrow()
            .iter()
            .filter(|l| l.kind == kind && &l.target == target)
            .map(|l| Rc::clone(&l.handler))
            .collect();

        let event = Event::new();
        for handler in handlers {
            if let Ok(mut handler) = handler.try_borrow_mut() {
                (*handler)(&event);
            }
        }
        event
    }

    pub fn load(&self) -> Event {
        self.dispatch(&Target::Window, EventKind::Load)
    }

    /// Set the scroll offset and fire a window scroll event.
    pub fn scroll_to(&self, y: f64) -> Event {
        self.set_scroll_y(y);
        self.dispatch(&Target::Window, EventKind::Scroll)
    }

    pub fn click(&self, node: &NodeRef) -> Event {
        self.dispatch(&Target::Node(*node), EventKind::Click)
    }

    pub fn pointer_enter(&self, node: &NodeRef) -> Event {
        self.dispatch(&Target::Node(*node), EventKind::PointerEnter)
    }

    pub fn pointer_leave(&self, node: &NodeRef) -> Event {
        self.dispatch(&Target::Node(*node), EventKind::PointerLeave)
    }

    /// Report a new visible ratio for `node` to every watcher observing it.
    pub fn report_intersection(&self, node: &NodeRef, ratio: f64) {
        let deliveries: Vec<_> = self
            .watchers
            .borrow()
            .iter()
            .filter(|w| w.targets.contains(node))
            .map(|w| {
                let entry = IntersectionEntry {
                    target: *node,
                    is_intersecting: ratio > 0.0 && ratio >= w.options.threshold,
                    ratio,
                };
                (Rc::clone(&w.callback), entry)
            })
            .collect();

        for (callback, entry) in deliveries {
            if let Ok(mut callback) = callback.try_borrow_mut() {
                (*callback)(std::slice::from_ref(&entry));
            }
        }
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    pub fn style(&self, node: &NodeRef, property: &str) -> Option<String> {
        self.nodes.borrow()[node.0].style.get(property).cloned()
    }

    pub fn inner_html(&self, node: &NodeRef) -> String {
        self.nodes.borrow()[node.0].inner_html.clone()
    }

    pub fn injected_styles(&self) -> Vec<String> {
        self.styles.borrow().clone()
    }

    pub fn scrolled_into_view(&self) -> Vec<NodeRef> {
        self.scrolled_into_view.borrow().clone()
    }

    pub fn hidden_collapsibles(&self) -> Vec<NodeRef> {
        self.hidden_collapsibles.borrow().clone()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn watcher_count(&self) -> usize {
        self.watchers.borrow().len()
    }

    pub fn is_observed(&self, node: &NodeRef) -> bool {
        self.watchers
            .borrow()
            .iter()
            .any(|w| w.targets.contains(node))
    }

    // ========================================================================
    // Tree walking
    // ========================================================================

    /// Descendants of `from` in document order, excluding `from` itself.
    fn descendants(&self, from: NodeRef) -> Vec<NodeRef> {
        let nodes = self.nodes.borrow();
        let mut out = Vec::new();
        let mut stack: Vec<NodeRef> = nodes[from.0].children.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(nodes[node.0].children.iter().rev().copied());
        }
        out
    }

    /// Write the subtrees under `from` as markup, tagging each element with
    /// its index so matches can be mapped back.
    fn write_markup(&self, from: NodeRef, out: &mut String) {
        let nodes = self.nodes.borrow();
        let mut stack: Vec<Step> = nodes[from.0]
            .children
            .iter()
            .rev()
            .map(|&n| Step::Open(n))
            .collect();

        while let Some(step) = stack.pop() {
            match step {
                Step::Open(node) => {
                    let data = &nodes[node.0];
                    out.push('<');
                    out.push_str(&data.tag);
                    write!(out, " {NODE_MARKER}=\"{}\"", node.0).ok();
                    for (name, value) in &data.attrs {
                        // tl compares raw attribute bytes, only quotes need care.
                        write!(out, " {name}=\"{}\"", value.replace('"', "&quot;")).ok();
                    }
                    out.push('>');
                    stack.push(Step::Close(node));
                    stack.extend(data.children.iter().rev().map(|&n| Step::Open(n)));
                }
                Step::Close(node) => {
                    out.push_str("</");
                    out.push_str(&nodes[node.0].tag);
                    out.push('>');
                }
            }
        }
    }

    /// Elements under `from` matching `selector`, in document order.
    ///
    /// Matching is delegated to `tl` over a snapshot of the current tree, so
    /// class and attribute changes made since the page was built are seen.
    fn select(&self, from: NodeRef, selector: &str) -> Vec<NodeRef> {
        let mut markup = String::new();
        self.write_markup(from, &mut markup);

        let Ok(dom) = tl::parse(&markup, tl::ParserOptions::default()) else {
            return Vec::new();
        };
        let Some(matches) = dom.query_selector(selector) else {
            crate::debug!("dom"; "invalid selector: {}", selector);
            return Vec::new();
        };

        let parser = dom.parser();
        let matched: BTreeSet<usize> = matches
            .filter_map(|handle| handle.get(parser)?.as_tag())
            .filter_map(|tag| {
                tag.attributes()
                    .iter()
                    .find(|(key, _)| *key == NODE_MARKER)
                    .and_then(|(_, value)| value?.parse().ok())
            })
            .collect();

        self.descendants(from)
            .into_iter()
            .filter(|n| matched.contains(&n.0))
            .collect()
    }
}

/// Attribute carrying the node index in the markup handed to `tl`.
const NODE_MARKER: &str = "data-memory-node";

enum Step {
    Open(NodeRef),
    Close(NodeRef),
}

impl Dom for MemoryDom {
    type Node = NodeRef;

    fn query_all(&self, selector: &str) -> Vec<NodeRef> {
        self.select(self.root, selector)
    }

    fn query_in(&self, parent: &NodeRef, selector: &str) -> Option<NodeRef> {
        self.select(*parent, selector).into_iter().next()
    }

    fn by_id(&self, id: &str) -> Option<NodeRef> {
        let candidates = self.descendants(self.root);
        let nodes = self.nodes.borrow();
        candidates
            .into_iter()
            .find(|n| nodes[n.0].attrs.get("id").is_some_and(|v| v == id))
    }

    fn body(&self) -> Option<NodeRef> {
        Some(self.body)
    }

    fn attribute(&self, node: &NodeRef, name: &str) -> Option<String> {
        self.nodes.borrow()[node.0].attrs.get(name).cloned()
    }

    fn set_attribute(&self, node: &NodeRef, name: &str, value: &str) {
        self.nodes.borrow_mut()[node.0]
            .attrs
            .insert(name.to_owned(), value.to_owned());
    }

    fn set_inner_html(&self, node: &NodeRef, html: &str) {
        self.nodes.borrow_mut()[node.0].inner_html = html.to_owned();
    }

    fn set_style(&self, node: &NodeRef, property: &str, value: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let style = &mut nodes[node.0].style;
        if value.is_empty() {
            style.remove(property);
        } else {
            style.insert(property.to_owned(), value.to_owned());
        }
    }

    fn has_class(&self, node: &NodeRef, class: &str) -> bool {
        self.nodes.borrow()[node.0].classes().any(|c| c == class)
    }

    fn add_class(&self, node: &NodeRef, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        let mut nodes = self.nodes.borrow_mut();
        let attr = nodes[node.0].attrs.entry("class".to_owned()).or_default();
        if !attr.is_empty() {
            attr.push(' ');
        }
        attr.push_str(class);
    }

    fn remove_class(&self, node: &NodeRef, class: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let data = &mut nodes[node.0];
        let remaining = data
            .classes()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        data.attrs.insert("class".to_owned(), remaining);
    }

    fn inject_style(&self, css: &str) {
        let style = self.add(&self.head, "style", &[]);
        self.set_inner_html(&style, css);
        self.styles.borrow_mut().push(css.to_owned());
    }

    fn extent(&self, node: &NodeRef) -> Extent {
        self.nodes.borrow()[node.0].extent
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn scroll_into_view(&self, node: &NodeRef) {
        let top = self.extent(node).top;
        self.scroll_y.set(top);
        self.scrolled_into_view.borrow_mut().push(*node);
    }

    fn hide_collapsible(&self, container: &NodeRef) {
        self.remove_class(container, "show");
        self.hidden_collapsibles.borrow_mut().push(*container);
    }

    fn listen(&self, target: Target<NodeRef>, kind: EventKind, handler: Handler) -> ListenerId {
        let id = ListenerId(self.next_id());
        self.listeners.borrow_mut().push(Listener {
            id,
            target,
            kind,
            handler: Rc::new(RefCell::new(handler)),
        });
        id
    }

    fn unlisten(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|l| l.id != id);
    }

    fn observe(
        &self,
        nodes: &[NodeRef],
        options: &ObserverOptions,
        callback: IntersectionCallback<NodeRef>,
    ) -> WatcherId {
        let id = WatcherId(self.next_id());
        self.watchers.borrow_mut().push(Watcher {
            id,
            options: options.clone(),
            targets: nodes.to_vec(),
            callback: Rc::new(RefCell::new(callback)),
        });
        id
    }

    fn unobserve(&self, watcher: WatcherId, node: &NodeRef) {
        if let Some(w) = self
            .watchers
            .borrow_mut()
            .iter_mut()
            .find(|w| w.id == watcher)
        {
            w.targets.retain(|t| t != node);
        }
    }

    fn disconnect(&self, watcher: WatcherId) {
        self.watchers.borrow_mut().retain(|w| w.id != watcher);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> (MemoryDom, NodeRef) {
        let dom = MemoryDom::new();
        let body = dom.body().unwrap();
        (dom, body)
    }

    #[test]
    fn test_query_document_order() {
        let (dom, body) = page();
        let first = dom.add(&body, "section", &[("id", "home")]);
        let wrapper = dom.add(&body, "div", &[]);
        let nested = dom.add(&wrapper, "section", &[("id", "about")]);
        let last = dom.add(&body, "section", &[("id", "contact")]);
        dom.add(&body, "section", &[]);

        assert_eq!(dom.query_all("section[id]"), vec![first, nested, last]);
        assert_eq!(dom.by_id("about"), Some(nested));
        assert_eq!(dom.query_in(&wrapper, "section"), Some(nested));
        assert_eq!(dom.query_in(&first, "section"), None);
    }

    #[test]
    fn test_selector_list_matches_each_part() {
        let (dom, body) = page();
        let a = dom.add(&body, "div", &[("class", "a")]);
        dom.add(&body, "div", &[("class", "c")]);
        let b = dom.add(&body, "div", &[("class", "b")]);

        assert_eq!(dom.query_all(".a, .b"), vec![a, b]);
        // Order follows the document, not the list.
        assert_eq!(dom.query_all(".b, .a"), vec![a, b]);
    }

    #[test]
    fn test_compound_and_prefix_selectors() {
        let (dom, body) = page();
        let nav = dom.add(&body, "ul", &[("class", "navbar-nav")]);
        let home = dom.add(&nav, "a", &[("class", "nav-link"), ("href", "#home")]);
        let repo = dom.add(&nav, "a", &[("class", "nav-link"), ("href", "https://x.dev")]);
        let skip = dom.add(&body, "a", &[("href", "#top")]);

        assert_eq!(dom.query_all("a[href^=\"#\"]"), vec![home, skip]);
        assert_eq!(dom.query_all("a.nav-link"), vec![home, repo]);
        assert_eq!(dom.query_all("a[href=\"#home\"]"), vec![home]);
        assert_eq!(dom.query_in(&nav, "[href^=\"#\"]"), Some(home));
    }

    #[test]
    fn test_query_sees_class_changes() {
        let (dom, body) = page();
        let menu = dom.add(&body, "div", &[("class", "navbar-collapse")]);
        assert!(dom.query_all(".navbar-collapse.show").is_empty());

        dom.add_class(&menu, "show");
        assert_eq!(dom.query_all(".navbar-collapse.show"), vec![menu]);

        dom.remove_class(&menu, "show");
        assert!(dom.query_all(".show").is_empty());
    }

    #[test]
    fn test_invalid_selector_matches_nothing() {
        let (dom, body) = page();
        dom.add(&body, "a", &[("href", "#")]);
        assert!(dom.query_all("#").is_empty());
    }

    #[test]
    fn test_class_list() {
        let (dom, body) = page();
        let link = dom.add(&body, "a", &[("class", "nav-link")]);

        dom.add_class(&link, "active");
        dom.add_class(&link, "active");
        assert_eq!(dom.attribute(&link, "class").as_deref(), Some("nav-link active"));
        assert!(dom.has_class(&link, "active"));

        dom.remove_class(&link, "active");
        assert!(!dom.has_class(&link, "active"));
        assert!(dom.has_class(&link, "nav-link"));
    }

    #[test]
    fn test_style_set_and_clear() {
        let (dom, body) = page();
        let card = dom.add(&body, "div", &[]);
        dom.set_style(&card, "opacity", "0");
        assert_eq!(dom.style(&card, "opacity").as_deref(), Some("0"));
        dom.set_style(&card, "opacity", "");
        assert_eq!(dom.style(&card, "opacity"), None);
    }

    #[test]
    fn test_dispatch_and_unlisten() {
        let (dom, body) = page();
        let button = dom.add(&body, "button", &[]);
        let hits = Rc::new(Cell::new(0));

        let counter = Rc::clone(&hits);
        let id = dom.listen(
            Target::Node(button),
            EventKind::Click,
            Box::new(move |event: &Event| {
                counter.set(counter.get() + 1);
                event.prevent_default();
            }),
        );

        assert!(dom.click(&button).is_default_prevented());
        assert!(!dom.pointer_enter(&button).is_default_prevented());
        assert_eq!(hits.get(), 1);

        dom.unlisten(id);
        dom.click(&button);
        assert_eq!(hits.get(), 1);
        assert_eq!(dom.listener_count(), 0);
    }

    #[test]
    fn test_intersection_reports() {
        let (dom, body) = page();
        let card = dom.add(&body, "div", &[]);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let options = ObserverOptions {
            threshold: 0.1,
            root_margin: "0px".to_owned(),
        };
        let watcher = dom.observe(
            &[card],
            &options,
            Box::new(move |entries: &[IntersectionEntry<NodeRef>]| {
                sink.borrow_mut()
                    .extend(entries.iter().map(|e| e.is_intersecting));
            }),
        );

        dom.report_intersection(&card, 0.05);
        dom.report_intersection(&card, 0.5);
        assert_eq!(*seen.borrow(), vec![false, true]);

        dom.unobserve(watcher, &card);
        assert!(!dom.is_observed(&card));
        dom.report_intersection(&card, 1.0);
        assert_eq!(seen.borrow().len(), 2);

        dom.disconnect(watcher);
        assert_eq!(dom.watcher_count(), 0);
    }

    #[test]
    fn test_inject_style_appends_to_head() {
        let dom = MemoryDom::new();
        dom.inject_style(".retro-cursor{}");
        assert_eq!(dom.injected_styles(), vec![".retro-cursor{}".to_owned()]);
        assert!(dom.query_in(&dom.head(), "style").is_some());
    }

    #[test]
    fn test_scroll_into_view_moves_viewport() {
        let (dom, body) = page();
        let about = dom.add(&body, "section", &[("id", "about")]);
        dom.set_extent(&about, Extent::new(640.0, 400.0));
        dom.scroll_into_view(&about);
        assert_eq!(dom.scroll_y(), 640.0);
        assert_eq!(dom.scrolled_into_view(), vec![about]);
    }
}
