//! Slide-out navigation for narrow viewports.

/// Viewports at least this wide show the desktop nav; the overlay closes.
pub const DESKTOP_BREAKPOINT: f64 = 768.0;

/// Stagger between consecutive link entrances, in seconds.
const LINK_STAGGER_SECS: f64 = 0.1;

/// Locks page scrolling behind the open menu (`overflow: hidden` on body).
pub trait ScrollLock {
    fn set_locked(&self, locked: bool);
}

/// Open/closed state of the mobile menu.
///
/// Every state change is pushed to the [`ScrollLock`] so the page behind
/// the overlay cannot scroll while the menu is open.
pub struct MobileMenu<L: ScrollLock> {
    open: bool,
    lock: L,
}

impl<L: ScrollLock> MobileMenu<L> {
    pub fn new(lock: L) -> Self {
        lock.set_locked(false);
        Self { open: false, lock }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.set_open(!self.open);
    }

    pub fn close(&mut self) {
        self.set_open(false);
    }

    pub fn on_viewport_resize(&mut self, width: f64) {
        if width >= DESKTOP_BREAKPOINT {
            self.close();
        }
    }

    pub fn view(&self) -> MenuView {
        MenuView::for_state(self.open)
    }

    fn set_open(&mut self, open: bool) {
        if self.open == open {
            return;
        }
        self.open = open;
        self.lock.set_locked(open);
    }
}

impl<L: ScrollLock> Drop for MobileMenu<L> {
    fn drop(&mut self) {
        self.lock.set_locked(false);
    }
}

/// Attribute and class values for the overlay, panel and toggle button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuView {
    pub aria_expanded: bool,
    pub overlay_aria_hidden: bool,
    pub overlay_classes: &'static str,
    pub panel_classes: &'static str,
}

impl MenuView {
    pub fn for_state(open: bool) -> Self {
        Self {
            aria_expanded: open,
            overlay_aria_hidden: !open,
            overlay_classes: if open {
                "opacity-100"
            } else {
                "opacity-0 pointer-events-none"
            },
            panel_classes: if open { "translate-x-0" } else { "translate-x-full" },
        }
    }
}

/// Inline style of the `index`-th link in the panel.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkStyle {
    pub opacity: f64,
    pub transform: &'static str,
    pub transition: String,
}

impl LinkStyle {
    pub fn new(index: usize, open: bool) -> Self {
        let delay = index as f64 * LINK_STAGGER_SECS;
        Self {
            opacity: if open { 1.0 } else { 0.0 },
            transform: if open { "translateX(0)" } else { "translateX(20px)" },
            transition: format!("opacity 0.3s ease, transform 0.3s ease {}s", round_secs(delay)),
        }
    }
}

// 3 * 0.1 prints as 0.30000000000000004 otherwise.
fn round_secs(secs: f64) -> f64 {
    (secs * 1000.0).round() / 1000.0
}
