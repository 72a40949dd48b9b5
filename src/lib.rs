#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Portfolio page front-end: scroll reveals, a floating-dot background,
//! theme toggle and mobile navigation.
//!
//! The component logic is plain Rust written against the capability traits
//! in [`host`], so it builds and tests on the host. The browser bindings are
//! only compiled for wasm32.

pub mod content;
pub mod error;
pub mod host;
pub mod menu;
pub mod particles;
pub mod reveal;
pub mod theme;

pub use error::{Error, Result};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use std::cell::RefCell;

    use log::LevelFilter;
    use wasm_bindgen::prelude::*;

    pub mod host;
    pub mod logger;
    pub mod menu;
    pub mod page;
    pub mod render;
    pub mod reveal;
    pub mod theme;

    thread_local! {
        static PAGE: RefCell<Option<page::Page>> = const { RefCell::new(None) };
    }

    /// `<html data-log-level="debug">` raises console verbosity.
    fn log_level() -> LevelFilter {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
            .and_then(|root| root.get_attribute("data-log-level"))
            .and_then(|level| level.parse().ok())
            .unwrap_or(LevelFilter::Warn)
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        logger::init(log_level());
        let page = page::Page::boot()?;
        PAGE.with(|slot| *slot.borrow_mut() = Some(page));
        Ok(())
    }

    /// Tears down every mounted component: frame loop, listeners, observers.
    #[wasm_bindgen]
    pub fn unmount() {
        let page = PAGE.with(|slot| slot.borrow_mut().take());
        drop(page);
    }

    /// Re-reads reveal settings from the `data-*` attributes.
    #[wasm_bindgen(js_name = refreshReveals)]
    pub fn refresh_reveals() {
        PAGE.with(|slot| {
            if let Some(page) = slot.borrow_mut().as_mut() {
                page.refresh_reveals();
            }
        });
    }

    /// Number of sections revealed so far.
    #[wasm_bindgen(js_name = revealedCount)]
    pub fn revealed_count() -> usize {
        PAGE.with(|slot| slot.borrow().as_ref().map_or(0, page::Page::revealed))
    }

    #[wasm_bindgen(js_name = menuOpen)]
    pub fn menu_open() -> bool {
        PAGE.with(|slot| slot.borrow().as_ref().is_some_and(page::Page::menu_open))
    }

    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted() -> bool {
        PAGE.with(|slot| slot.borrow().is_some())
    }
}

// When compiling for non-wasm targets (e.g., `cargo test` on host),
// provide an empty stub so the crate still builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn main() {}
