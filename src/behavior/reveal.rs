//! Scroll-triggered reveal animations.
//!
//! Cards start hidden and pushed down. The first time one intersects the
//! viewport it slides in, and the inline end state keeps it there once the
//! animation finishes.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use super::BehaviorError;
use crate::config::RevealConfig;
use crate::dom::{Dom, IntersectionEntry, WatcherId};

pub struct Reveal<D: Dom + 'static> {
    dom: Weak<D>,
    watcher: Rc<Cell<Option<WatcherId>>>,
    targets: usize,
    revealed: Rc<Cell<usize>>,
}

impl<D: Dom + 'static> Reveal<D> {
    /// Hide every matching element and start watching them.
    pub fn attach(dom: &Rc<D>, config: &RevealConfig) -> Result<Self, BehaviorError> {
        let hidden_transform = format!("translateY({}px)", config.offset);
        let targets: Vec<D::Node> = config
            .selectors
            .iter()
            .flat_map(|selector| dom.query_all(selector))
            .collect();

        for target in &targets {
            dom.set_style(target, "opacity", "0");
            dom.set_style(target, "transform", &hidden_transform);
        }

        let watcher = Rc::new(Cell::new(None));
        let revealed = Rc::new(Cell::new(0));

        let page = Rc::downgrade(dom);
        let own_id = Rc::clone(&watcher);
        let count = Rc::clone(&revealed);
        let animation = config.animation.clone();
        let once = config.once;

        let id = dom.observe(
            &targets,
            &config.observer_options(),
            Box::new(move |entries: &[IntersectionEntry<D::Node>]| {
                let Some(dom) = page.upgrade() else {
                    return;
                };
                for entry in entries.iter().filter(|e| e.is_intersecting) {
                    dom.set_style(&entry.target, "animation", &animation);
                    dom.set_style(&entry.target, "opacity", "1");
                    dom.set_style(&entry.target, "transform", "translateY(0)");
                    count.set(count.get() + 1);

                    if once && let Some(id) = own_id.get() {
                        dom.unobserve(id, &entry.target);
                    }
                }
            }),
        );
        watcher.set(Some(id));

        crate::debug!("reveal"; "watching {} elements", targets.len());
        Ok(Self {
            dom: Rc::downgrade(dom),
            watcher,
            targets: targets.len(),
            revealed,
        })
    }

    /// Number of elements hidden at attach time.
    pub fn targets(&self) -> usize {
        self.targets
    }

    /// Number of reveals applied so far.
    pub fn revealed(&self) -> usize {
        self.revealed.get()
    }

    /// Disconnect the watcher.
    pub fn dispose(&mut self) {
        if let Some(id) = self.watcher.take()
            && let Some(dom) = self.dom.upgrade()
        {
            dom.disconnect(id);
        }
    }
}

impl<D: Dom + 'static> Drop for Reveal<D> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryDom, NodeRef};

    fn page() -> (Rc<MemoryDom>, Vec<NodeRef>) {
        let dom = Rc::new(MemoryDom::new());
        let body = dom.body().unwrap();
        let cards = vec![
            dom.add(&body, "div", &[("class", "about-card")]),
            dom.add(&body, "div", &[("class", "timeline-item")]),
            dom.add(&body, "div", &[("class", "project-card")]),
        ];
        dom.add(&body, "div", &[("class", "footer")]);
        (dom, cards)
    }

    #[test]
    fn test_attach_hides_targets() {
        let (dom, cards) = page();
        let reveal = Reveal::attach(&dom, &RevealConfig::default()).unwrap();

        assert_eq!(reveal.targets(), 3);
        for card in &cards {
            assert_eq!(dom.style(card, "opacity").as_deref(), Some("0"));
            assert_eq!(dom.style(card, "transform").as_deref(), Some("translateY(50px)"));
            assert!(dom.is_observed(card));
        }
    }

    #[test]
    fn test_intersection_reveals_once() {
        let (dom, cards) = page();
        let reveal = Reveal::attach(&dom, &RevealConfig::default()).unwrap();

        // Below the 0.1 threshold: still hidden.
        dom.report_intersection(&cards[0], 0.05);
        assert_eq!(dom.style(&cards[0], "opacity").as_deref(), Some("0"));
        assert_eq!(dom.style(&cards[0], "animation"), None);

        dom.report_intersection(&cards[0], 0.5);
        assert_eq!(dom.style(&cards[0], "opacity").as_deref(), Some("1"));
        assert_eq!(dom.style(&cards[0], "transform").as_deref(), Some("translateY(0)"));
        assert_eq!(
            dom.style(&cards[0], "animation").as_deref(),
            Some("retroSlideIn 0.8s ease-out forwards")
        );
        assert!(!dom.is_observed(&cards[0]));
        assert!(dom.is_observed(&cards[1]));

        dom.report_intersection(&cards[0], 1.0);
        assert_eq!(reveal.revealed(), 1);
    }

    #[test]
    fn test_keep_watching_when_not_once() {
        let (dom, cards) = page();
        let config = RevealConfig {
            once: false,
            ..RevealConfig::default()
        };
        let reveal = Reveal::attach(&dom, &config).unwrap();

        dom.report_intersection(&cards[2], 0.5);
        dom.report_intersection(&cards[2], 0.8);
        assert!(dom.is_observed(&cards[2]));
        assert_eq!(reveal.revealed(), 2);
    }

    #[test]
    fn test_dispose_disconnects() {
        let (dom, cards) = page();
        let mut reveal = Reveal::attach(&dom, &RevealConfig::default()).unwrap();
        assert_eq!(dom.watcher_count(), 1);

        reveal.dispose();
        assert_eq!(dom.watcher_count(), 0);
        dom.report_intersection(&cards[1], 1.0);
        assert_eq!(dom.style(&cards[1], "opacity").as_deref(), Some("0"));
    }

    #[test]
    fn test_custom_offset() {
        let (dom, cards) = page();
        let config = RevealConfig {
            offset: 12.5,
            ..RevealConfig::default()
        };
        let _reveal = Reveal::attach(&dom, &config).unwrap();
        assert_eq!(dom.style(&cards[0], "transform").as_deref(), Some("translateY(12.5px)"));
    }
}
