use std::rc::Rc;
use std::time::Duration;

use super::{Component, Portfolio, ReadyState};
use crate::behavior::typewriter::CURSOR_HTML;
use crate::behavior::{BehaviorError, Theme};
use crate::config::PageConfig;
use crate::dom::{Dom, Extent, MemoryDom, NodeRef};
use crate::embed::RETRO_CSS;
use crate::schedule::VirtualClock;
use crate::storage::{MemoryStorage, Storage};

struct Fixture {
    dom: Rc<MemoryDom>,
    clock: Rc<VirtualClock>,
    storage: Rc<MemoryStorage>,
    hero: NodeRef,
    toggle: Option<NodeRef>,
    links: Vec<NodeRef>,
    card: NodeRef,
    placeholder: NodeRef,
}

/// A cut-down portfolio page: navbar, hero, two sections, one project card.
fn fixture(with_toggle: bool) -> Fixture {
    let dom = Rc::new(MemoryDom::new());
    let body = dom.body().unwrap();

    let nav = dom.add(&body, "nav", &[]);
    let menu = dom.add(&nav, "div", &[("class", "navbar-collapse")]);
    let links = vec![
        dom.add(&menu, "a", &[("class", "nav-link"), ("href", "#home")]),
        dom.add(&menu, "a", &[("class", "nav-link"), ("href", "#projects")]),
    ];
    let toggle = with_toggle.then(|| dom.add(&nav, "button", &[("id", "themeToggle")]));

    let home = dom.add(&body, "section", &[("id", "home")]);
    dom.set_extent(&home, Extent::new(0.0, 800.0));
    let hero = dom.add(&home, "span", &[("id", "typewriter-text")]);
    dom.add(&home, "div", &[("class", "line")]);

    let projects = dom.add(&body, "section", &[("id", "projects")]);
    dom.set_extent(&projects, Extent::new(800.0, 1200.0));
    let card = dom.add(&projects, "div", &[("class", "project-card")]);
    let placeholder = dom.add(&card, "div", &[("class", "project-placeholder")]);

    Fixture {
        dom,
        clock: Rc::new(VirtualClock::new()),
        storage: Rc::new(MemoryStorage::new()),
        hero,
        toggle,
        links,
        card,
        placeholder,
    }
}

fn mount(fx: &Fixture, config: &PageConfig) -> Portfolio<MemoryDom> {
    Portfolio::mount(&fx.dom, fx.clock.clone(), fx.storage.clone(), config)
}

#[test]
fn test_mount_attaches_everything() {
    let fx = fixture(true);
    let page = mount(&fx, &PageConfig::default());

    assert!(page.failures().is_empty());
    assert_eq!(fx.dom.injected_styles(), vec![RETRO_CSS.content().to_owned()]);
    assert_eq!(page.theme(), Some(Theme::Dark));
    assert_eq!(
        fx.dom.attribute(&fx.dom.body().unwrap(), "data-theme").as_deref(),
        Some("dark")
    );
    assert_eq!(fx.dom.style(&fx.card, "opacity").as_deref(), Some("0"));
    for component in [
        Component::ScrollSpy,
        Component::Reveal,
        Component::Theme,
        Component::SmoothScroll,
        Component::Parallax,
        Component::Glitch,
    ] {
        assert!(page.is_attached(component), "{component} not attached");
    }
}

#[test]
fn test_typewriter_waits_for_load() {
    let fx = fixture(true);
    let page = mount(&fx, &PageConfig::default());

    assert!(!page.is_attached(Component::Typewriter));
    assert_eq!(fx.dom.inner_html(&fx.hero), "");

    fx.dom.load();
    assert!(page.is_typing());
    assert_eq!(fx.dom.inner_html(&fx.hero), format!("P{CURSOR_HTML}"));

    // A second load does not start a second typewriter.
    fx.dom.load();
    assert_eq!(fx.clock.pending(), 1);

    fx.clock.advance(Duration::from_millis(80));
    assert_eq!(fx.dom.inner_html(&fx.hero), format!("Pa{CURSOR_HTML}"));
}

#[test]
fn test_ready_state_strings() {
    assert_eq!(ReadyState::parse("loading"), ReadyState::Loading);
    assert_eq!(ReadyState::parse("interactive"), ReadyState::Interactive);
    assert_eq!(ReadyState::parse("complete"), ReadyState::Complete);
    assert_eq!(ReadyState::parse(""), ReadyState::Interactive);

    assert!(!ReadyState::Loading.can_mount());
    assert!(ReadyState::Interactive.can_mount());
    assert!(!ReadyState::Interactive.load_fired());
    assert!(ReadyState::Complete.load_fired());
}

#[test]
fn test_missing_toggle_does_not_block_others() {
    let fx = fixture(false);
    let page = mount(&fx, &PageConfig::default());

    assert_eq!(
        page.failures(),
        vec![(
            Component::Theme,
            BehaviorError::MissingElement("#themeToggle".to_owned())
        )]
    );
    assert_eq!(page.theme(), None);
    assert!(page.is_attached(Component::ScrollSpy));
    assert!(page.is_attached(Component::Glitch));

    fx.dom.load();
    assert!(page.is_typing());
}

#[test]
fn test_missing_typewriter_target_recorded_on_load() {
    let dom = Rc::new(MemoryDom::new());
    let clock = Rc::new(VirtualClock::new());
    let config = PageConfig::default();
    let page = Portfolio::mount(&dom, clock.clone(), Rc::new(MemoryStorage::new()), &config);

    dom.load();
    assert!(!page.is_typing());
    assert!(
        page.failures()
            .iter()
            .any(|(component, _)| *component == Component::Typewriter)
    );
    assert_eq!(clock.pending(), 0);
}

#[test]
fn test_disabled_behaviors_are_skipped() {
    let fx = fixture(true);
    let mut config = PageConfig::default();
    config.styles.inject = false;
    config.typewriter.enable = false;
    config.theme.enable = false;
    config.effects.glitch.enable = false;

    let page = mount(&fx, &config);
    assert!(fx.dom.injected_styles().is_empty());
    assert!(!page.is_attached(Component::Theme));
    assert!(!page.is_attached(Component::Glitch));
    assert!(page.failures().is_empty());

    fx.dom.load();
    assert!(!page.is_typing());
    fx.dom.pointer_enter(&fx.card);
    assert_eq!(fx.dom.style(&fx.placeholder, "animation"), None);
}

#[test]
fn test_behaviors_react_after_mount() {
    let fx = fixture(true);
    let _page = mount(&fx, &PageConfig::default());

    // 600 + 250 lands in the projects section.
    fx.dom.scroll_to(600.0);
    assert!(fx.dom.has_class(&fx.links[1], "active"));
    assert!(!fx.dom.has_class(&fx.links[0], "active"));

    fx.dom.pointer_enter(&fx.card);
    assert!(fx.dom.style(&fx.placeholder, "animation").is_some());

    let toggle = fx.toggle.unwrap();
    fx.dom.click(&toggle);
    assert_eq!(fx.storage.get("theme").unwrap().as_deref(), Some("light"));
}

#[test]
fn test_dispose_tears_everything_down() {
    let fx = fixture(true);
    let mut page = mount(&fx, &PageConfig::default());
    fx.dom.load();
    assert!(fx.dom.listener_count() > 0);
    assert_eq!(fx.dom.watcher_count(), 1);
    assert_eq!(fx.clock.pending(), 1);

    page.dispose();
    assert_eq!(fx.dom.listener_count(), 0);
    assert_eq!(fx.dom.watcher_count(), 0);
    assert_eq!(fx.clock.pending(), 0);
    assert!(page.failures().is_empty());
}

#[test]
fn test_drop_tears_everything_down() {
    let fx = fixture(true);
    let page = mount(&fx, &PageConfig::default());
    fx.dom.load();

    drop(page);
    assert_eq!(fx.dom.listener_count(), 0);
    assert_eq!(fx.clock.pending(), 0);
}
