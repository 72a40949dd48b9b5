use std::cell::RefCell;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use super::host::{log_failure, ElementIntersection};
use crate::error::Result;
use crate::reveal::{RevealConfig, RevealController};

pub type ElementReveal = RevealController<ElementIntersection>;

/// A reveal controller together with the element it animates.
pub struct MountedReveal {
    element: Element,
    controller: ElementReveal,
}

impl MountedReveal {
    pub fn mount(element: Element) -> Self {
        let config = read_config(&element);
        let target = element.clone();
        let applied = RefCell::new(Vec::<String>::new());
        let controller = RevealController::mount(
            &ElementIntersection::new(element.clone()),
            config,
            move |config: &RevealConfig, visible: bool| {
                let next = config.class_list(visible);
                let list = target.class_list();
                for class in applied.borrow().iter().filter(|c| !next.contains(*c)) {
                    log_failure("classList.remove", list.remove_1(class));
                }
                for class in &next {
                    log_failure("classList.add", list.add_1(class));
                }
                *applied.borrow_mut() = next;
            },
        );
        Self { element, controller }
    }

    /// Re-reads the `data-*` attributes and applies them.
    pub fn refresh(&mut self) {
        let config = read_config(&self.element);
        if config != self.controller.config() {
            self.controller
                .reconfigure(&ElementIntersection::new(self.element.clone()), config);
        }
    }

    pub fn is_visible(&self) -> bool {
        self.controller.is_visible()
    }
}

fn read_config(element: &Element) -> RevealConfig {
    RevealConfig::from_attributes(|name| element.get_attribute(name)).unwrap_or_else(|err| {
        log::warn!("{err}; using default reveal settings");
        RevealConfig::default()
    })
}

/// Mounts a controller on every `[data-reveal]` element.
pub fn mount_all(document: &Document) -> Result<Vec<MountedReveal>> {
    let nodes = document.query_selector_all("[data-reveal]")?;
    let mounted = (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .map(MountedReveal::mount)
        .collect();
    Ok(mounted)
}
