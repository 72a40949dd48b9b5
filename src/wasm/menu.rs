use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlElement, Window};

use super::host::{listen, log_failure, swap_classes, BodyScrollLock, Listener, WindowViewport};
use crate::error::{Error, Result};
use crate::host::SubscriptionGuard;
use crate::menu::{LinkStyle, MobileMenu};

type Menu = MobileMenu<BodyScrollLock>;

struct MenuElements {
    toggle: Element,
    overlay: Option<Element>,
    panel: Option<Element>,
    items: Vec<Element>,
}

impl MenuElements {
    fn render(&self, menu: &Menu) {
        let view = menu.view();
        log_failure(
            "setAttribute",
            self.toggle
                .set_attribute("aria-expanded", if view.aria_expanded { "true" } else { "false" }),
        );
        for (selector, shown) in [
            ("[data-icon=menu]", !view.aria_expanded),
            ("[data-icon=close]", view.aria_expanded),
        ] {
            if let Ok(Some(icon)) = self.toggle.query_selector(selector) {
                log_failure("classList.toggle", icon.class_list().toggle_with_force("hidden", !shown));
            }
        }
        if let Some(overlay) = &self.overlay {
            swap_classes(overlay, "opacity-100 opacity-0 pointer-events-none", view.overlay_classes);
            log_failure(
                "setAttribute",
                overlay.set_attribute(
                    "aria-hidden",
                    if view.overlay_aria_hidden { "true" } else { "false" },
                ),
            );
        }
        if let Some(panel) = &self.panel {
            swap_classes(panel, "translate-x-0 translate-x-full", view.panel_classes);
        }
        for (index, item) in self.items.iter().enumerate() {
            let Some(item) = item.dyn_ref::<HtmlElement>() else {
                continue;
            };
            let link = LinkStyle::new(index, menu.is_open());
            let style = item.style();
            for (property, value) in [
                ("opacity", link.opacity.to_string()),
                ("transform", link.transform.to_owned()),
                ("transition", link.transition),
            ] {
                log_failure("style.setProperty", style.set_property(property, &value));
            }
        }
    }
}

/// The mobile menu wired to its buttons, links and the window size.
pub struct MenuBinding {
    menu: Rc<RefCell<Menu>>,
    _listeners: Vec<SubscriptionGuard<Listener>>,
}

impl MenuBinding {
    pub fn is_open(&self) -> bool {
        self.menu.borrow().is_open()
    }
}

type Action = fn(&mut Menu, &WindowViewport);

fn on_event(
    target: &EventTarget,
    event: &'static str,
    window: &Window,
    menu: &Rc<RefCell<Menu>>,
    elements: &Rc<MenuElements>,
    action: Action,
) -> Option<SubscriptionGuard<Listener>> {
    let menu = Rc::clone(menu);
    let elements = Rc::clone(elements);
    let viewport = WindowViewport::new(window.clone());
    listen(target, event, move || {
        action(&mut *menu.borrow_mut(), &viewport);
        elements.render(&menu.borrow());
    })
}

pub fn bind(window: &Window, document: &Document) -> Result<Option<MenuBinding>> {
    let Some(toggle) = document.get_element_by_id("menu-toggle") else {
        log::debug!("no #menu-toggle; mobile menu not mounted");
        return Ok(None);
    };
    let body = document
        .body()
        .ok_or_else(|| Error::MissingElement("body".to_owned()))?;

    let nodes = document.query_selector_all("#menu-links > li")?;
    let items: Vec<Element> = (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect();
    let elements = Rc::new(MenuElements {
        toggle: toggle.clone(),
        overlay: document.get_element_by_id("menu-overlay"),
        panel: document.get_element_by_id("menu-panel"),
        items,
    });
    let menu = Rc::new(RefCell::new(MobileMenu::new(BodyScrollLock::new(body))));
    elements.render(&menu.borrow());

    let mut listeners = Vec::new();
    listeners.extend(on_event(&toggle, "click", window, &menu, &elements, |menu, _| menu.toggle()));
    if let Some(overlay) = &elements.overlay {
        listeners.extend(on_event(overlay, "click", window, &menu, &elements, |menu, _| menu.close()));
    }
    if let Some(close) = document.get_element_by_id("menu-close") {
        listeners.extend(on_event(&close, "click", window, &menu, &elements, |menu, _| menu.close()));
    }
    for item in &elements.items {
        if let Ok(Some(link)) = item.query_selector("a") {
            listeners.extend(on_event(&link, "click", window, &menu, &elements, |menu, _| menu.close()));
        }
    }
    listeners.extend(on_event(window, "resize", window, &menu, &elements, |menu, viewport| {
        if let Some(width) = viewport.width() {
            menu.on_viewport_resize(width);
        }
    }));

    Ok(Some(MenuBinding {
        menu,
        _listeners: listeners,
    }))
}
