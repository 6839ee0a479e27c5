//! Persisted dark/light theme toggle.

use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{BehaviorError, Listeners};
use crate::config::ThemeConfig;
use crate::dom::{Dom, Event, EventKind, Target};
use crate::storage::Storage;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme `{0}`")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(UnknownTheme(other.to_owned())),
        }
    }
}

/// Read the persisted theme, falling back to `default` on any problem.
pub fn load_theme(storage: &dyn Storage, key: &str, default: Theme) -> Theme {
    match storage.get(key) {
        Ok(Some(value)) => value.parse().unwrap_or_else(|e: UnknownTheme| {
            crate::log!("theme"; "{}, using {}", e, default);
            default
        }),
        Ok(None) => default,
        Err(e) => {
            crate::log!("theme"; "{}, using {}", e, default);
            default
        }
    }
}

struct Shared<D: Dom> {
    dom: Weak<D>,
    storage: Rc<dyn Storage>,
    body: D::Node,
    attribute: String,
    storage_key: String,
    current: Cell<Theme>,
}

impl<D: Dom> Shared<D> {
    fn apply(&self, dom: &D, theme: Theme) {
        dom.set_attribute(&self.body, &self.attribute, theme.as_str());
        self.current.set(theme);
    }

    fn toggle(&self) {
        let Some(dom) = self.dom.upgrade() else {
            return;
        };
        let next = self.current.get().toggled();
        self.apply(&dom, next);
        // The page keeps the new theme even if it cannot be saved.
        if let Err(e) = self.storage.set(&self.storage_key, next.as_str()) {
            crate::log!("theme"; "not persisted: {}", e);
        }
    }
}

/// Theme toggle attached to a page.
pub struct ThemeToggle<D: Dom + 'static> {
    shared: Rc<Shared<D>>,
    listeners: Listeners<D>,
}

impl<D: Dom + 'static> ThemeToggle<D> {
    /// Apply the persisted theme and wire the toggle control.
    ///
    /// Without the toggle control nothing is touched.
    pub fn attach(
        dom: &Rc<D>,
        storage: Rc<dyn Storage>,
        config: &ThemeConfig,
    ) -> Result<Self, BehaviorError> {
        let toggle = dom
            .by_id(&config.toggle)
            .ok_or_else(|| BehaviorError::MissingElement(format!("#{}", config.toggle)))?;
        let body = dom
            .body()
            .ok_or_else(|| BehaviorError::MissingElement("body".to_owned()))?;

        let initial = load_theme(storage.as_ref(), &config.storage_key, config.default);
        let shared = Rc::new(Shared {
            dom: Rc::downgrade(dom),
            storage,
            body,
            attribute: config.attribute.clone(),
            storage_key: config.storage_key.clone(),
            current: Cell::new(initial),
        });
        shared.apply(dom, initial);

        let mut listeners = Listeners::new(dom);
        let on_click = Rc::downgrade(&shared);
        listeners.push(dom.listen(
            Target::Node(toggle),
            EventKind::Click,
            Box::new(move |_: &Event| {
                if let Some(shared) = on_click.upgrade() {
                    shared.toggle();
                }
            }),
        ));

        crate::debug!("theme"; "initial theme: {}", initial);
        Ok(Self { shared, listeners })
    }

    pub fn current(&self) -> Theme {
        self.shared.current.get()
    }

    pub fn dispose(&mut self) {
        self.listeners.clear();
    }
}
