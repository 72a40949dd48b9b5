use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

use super::host::{listen, log_failure, swap_classes, Listener};
use crate::error::Result;
use crate::host::SubscriptionGuard;
use crate::theme::{Theme, ThemeStore, ThemeToggle, STORAGE_KEY};

const ICON_STATES: &str = "rotate-0 rotate-90 -rotate-90 scale-0 scale-100 opacity-0 opacity-100 hidden";

/// Theme persisted in `localStorage` and applied as a class on `<html>`.
pub struct WebThemeStore {
    window: Window,
    root: Element,
}

impl WebThemeStore {
    pub fn new(window: Window, root: Element) -> Self {
        Self { window, root }
    }

    pub fn apply(&self) {
        let resolved = self.resolved();
        swap_classes(&self.root, "light dark", resolved.as_str());
    }
}

impl ThemeStore for WebThemeStore {
    fn current(&self) -> Theme {
        let stored = self
            .window
            .local_storage()
            .ok()
            .flatten()
            .and_then(|storage| storage.get_item(STORAGE_KEY).ok().flatten());
        match stored.map(|value| value.parse::<Theme>()) {
            Some(Ok(theme)) => theme,
            Some(Err(err)) => {
                log::warn!("{err}; falling back to default theme");
                Theme::default()
            }
            None => Theme::default(),
        }
    }

    fn set(&self, theme: Theme) {
        match self.window.local_storage() {
            Ok(Some(storage)) => {
                if let Err(err) = storage.set_item(STORAGE_KEY, theme.as_str()) {
                    log::warn!("could not persist theme: {err:?}");
                }
            }
            _ => log::warn!("localStorage unavailable; theme will not persist"),
        }
        self.apply();
    }

    fn system_prefers_dark(&self) -> bool {
        self.window
            .match_media("(prefers-color-scheme: dark)")
            .ok()
            .flatten()
            .is_some_and(|query| query.matches())
    }
}

/// Every `[data-theme-toggle]` button on the page, wired to one store.
pub struct ThemeBinding {
    _listeners: Vec<SubscriptionGuard<Listener>>,
}

pub fn bind(window: &Window, document: &Document) -> Result<Option<ThemeBinding>> {
    let Some(root) = document.document_element() else {
        log::warn!("document has no root element; theme toggle disabled");
        return Ok(None);
    };
    let store = Rc::new(WebThemeStore::new(window.clone(), root));
    store.apply();

    let nodes = document.query_selector_all("[data-theme-toggle]")?;
    let buttons: Rc<Vec<Element>> = Rc::new(
        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect(),
    );

    let mut toggle = ThemeToggle::new();
    render(&buttons, &toggle, &*store);
    // The stored theme is known from here on.
    toggle.mount();
    let toggle = Rc::new(toggle);
    render(&buttons, &toggle, &*store);

    let listeners = buttons
        .iter()
        .filter_map(|button| {
            let store = Rc::clone(&store);
            let toggle = Rc::clone(&toggle);
            let buttons = Rc::clone(&buttons);
            listen(button, "click", move || {
                if toggle.click(&*store).is_some() {
                    render(&buttons, &toggle, &*store);
                }
            })
        })
        .collect();

    Ok(Some(ThemeBinding {
        _listeners: listeners,
    }))
}

fn render(buttons: &[Element], toggle: &ThemeToggle, store: &dyn ThemeStore) {
    let view = toggle.view(store);
    for button in buttons {
        let disabled = if view.disabled {
            button.set_attribute("disabled", "")
        } else {
            button.remove_attribute("disabled")
        };
        log_failure("disabled attribute", disabled);
        for (selector, classes) in [
            ("[data-icon=sun]", view.sun_classes),
            ("[data-icon=moon]", view.moon_classes),
        ] {
            if let Ok(Some(icon)) = button.query_selector(selector) {
                swap_classes(&icon, ICON_STATES, classes.unwrap_or("hidden"));
            }
        }
    }
}
