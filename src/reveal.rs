//! Scroll-triggered reveal of page sections.
//!
//! A [`RevealController`] subscribes to an [`IntersectionSource`] for one
//! element and flips a `visible` flag when the element's intersection ratio
//! reaches the configured threshold. The flag is rendered through a fixed
//! mapping from `(Variant, visible)` to utility classes.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::host::{IntersectionEntry, IntersectionSource, ObserveOptions, SubscriptionGuard};

/// Shrinks the viewport bottom so reveals fire slightly before the element
/// reaches the literal bottom edge.
pub const ROOT_MARGIN: &str = "0px 0px -100px 0px";

/// Browsers report ratios a hair below the threshold they fired for.
const RATIO_TOLERANCE: f64 = 1e-3;

const BASE_CLASSES: [&str; 2] = ["transition-all", "will-change-transform"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    FadeIn,
    SlideUp,
    SlideInRight,
    ScaleIn,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::FadeIn,
        Variant::SlideUp,
        Variant::SlideInRight,
        Variant::ScaleIn,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Variant::FadeIn => "fade-in",
            Variant::SlideUp => "slide-up",
            Variant::SlideInRight => "slide-in-right",
            Variant::ScaleIn => "scale-in",
        }
    }

    /// Opacity/transform classes for one side of the transition.
    pub fn classes(self, visible: bool) -> &'static [&'static str] {
        match (self, visible) {
            (Variant::FadeIn, false) => &["opacity-0"],
            (Variant::FadeIn, true) => &["opacity-100"],
            (Variant::SlideUp, false) => &["opacity-0", "translate-y-10"],
            (Variant::SlideUp, true) => &["opacity-100", "translate-y-0"],
            (Variant::SlideInRight, false) => &["opacity-0", "translate-x-10"],
            (Variant::SlideInRight, true) => &["opacity-100", "translate-x-0"],
            (Variant::ScaleIn, false) => &["opacity-0", "scale-95"],
            (Variant::ScaleIn, true) => &["opacity-100", "scale-100"],
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Variant::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| Error::UnknownVariant(s.to_owned()))
    }
}

/// Per-element reveal settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealConfig {
    pub variant: Variant,
    /// Transition delay in milliseconds.
    pub delay_ms: u32,
    /// Transition duration in milliseconds.
    pub duration_ms: u32,
    /// Minimum intersection ratio in [0, 1].
    pub threshold: f64,
    /// Latch on first reveal and stop observing.
    pub once: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            variant: Variant::FadeIn,
            delay_ms: 0,
            duration_ms: 500,
            threshold: 0.1,
            once: true,
        }
    }
}

impl RevealConfig {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::ThresholdOutOfRange(self.threshold));
        }
        if self.duration_ms == 0 {
            return Err(Error::ZeroDuration);
        }
        Ok(())
    }

    /// Reads `data-variant`, `data-delay`, `data-duration`, `data-threshold`
    /// and `data-once`. Missing attributes keep their defaults.
    pub fn from_attributes(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(v) = lookup("data-variant") {
            config.variant = v.trim().parse()?;
        }
        if let Some(v) = lookup("data-delay") {
            config.delay_ms = parse_number("data-delay", &v)?;
        }
        if let Some(v) = lookup("data-duration") {
            config.duration_ms = parse_number("data-duration", &v)?;
        }
        if let Some(v) = lookup("data-threshold") {
            config.threshold = parse_number("data-threshold", &v)?;
        }
        if let Some(v) = lookup("data-once") {
            config.once = match v.trim() {
                "" | "true" => true,
                "false" => false,
                _ => {
                    return Err(Error::InvalidNumber {
                        attribute: "data-once",
                        value: v,
                    })
                }
            };
        }
        config.validate()?;
        Ok(config)
    }

    pub fn observe_options(&self) -> ObserveOptions {
        ObserveOptions {
            threshold: self.threshold,
            root_margin: ROOT_MARGIN,
        }
    }

    pub fn class_list(&self, visible: bool) -> Vec<String> {
        let mut classes: Vec<String> = BASE_CLASSES.iter().map(|c| (*c).to_owned()).collect();
        classes.push(format!("duration-{}", self.duration_ms));
        if self.delay_ms > 0 {
            classes.push(format!("delay-{}", self.delay_ms));
        }
        classes.extend(self.variant.classes(visible).iter().map(|c| (*c).to_owned()));
        classes
    }

    pub fn class_name(&self, visible: bool) -> String {
        self.class_list(visible).join(" ")
    }
}

fn parse_number<T: FromStr>(attribute: &'static str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| Error::InvalidNumber {
        attribute,
        value: value.to_owned(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    None,
    Show,
    Hide,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RevealState {
    visible: bool,
    latched: bool,
}

impl RevealState {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_latched(&self) -> bool {
        self.latched
    }

    pub fn on_entry(&mut self, entry: IntersectionEntry, threshold: f64, once: bool) -> Transition {
        if self.latched {
            return Transition::None;
        }
        let satisfied = entry.is_intersecting && entry.ratio + RATIO_TOLERANCE >= threshold;
        if satisfied {
            self.latched = once;
            if self.visible {
                return Transition::None;
            }
            self.visible = true;
            Transition::Show
        } else if !once && self.visible {
            self.visible = false;
            Transition::Hide
        } else {
            Transition::None
        }
    }
}

type Render = Rc<dyn Fn(&RevealConfig, bool)>;

/// Reveal behaviour for one mounted element.
///
/// `render` is called with the current config and visibility on mount and on
/// every transition. Dropping the controller releases the observation.
pub struct RevealController<I: IntersectionSource> {
    config: Rc<RefCell<RevealConfig>>,
    state: Rc<RefCell<RevealState>>,
    guard: Rc<RefCell<SubscriptionGuard<I::Subscription>>>,
    render: Render,
}

impl<I: IntersectionSource> RevealController<I>
where
    I::Subscription: 'static,
{
    pub fn mount(source: &I, config: RevealConfig, render: impl Fn(&RevealConfig, bool) + 'static) -> Self {
        let render: Render = Rc::new(render);
        render(&config, false);
        let controller = Self {
            config: Rc::new(RefCell::new(config)),
            state: Rc::new(RefCell::new(RevealState::default())),
            guard: Rc::new(RefCell::new(SubscriptionGuard::empty())),
            render,
        };
        controller.subscribe(source);
        controller
    }

    pub fn is_visible(&self) -> bool {
        self.state.borrow().is_visible()
    }

    pub fn is_observing(&self) -> bool {
        self.guard.borrow().is_active()
    }

    pub fn config(&self) -> RevealConfig {
        self.config.borrow().clone()
    }

    /// Applies a new config. A changed threshold or `once` re-creates the
    /// observation; other fields only re-render.
    pub fn reconfigure(&mut self, source: &I, config: RevealConfig) {
        let previous = self.config.replace(config.clone());
        let resubscribe = previous.threshold != config.threshold || previous.once != config.once;
        {
            let mut state = self.state.borrow_mut();
            // Already shown: switching to `once` has nothing left to wait for.
            state.latched = config.once && (state.latched || state.visible);
        }
        (self.render)(&config, self.is_visible());
        if resubscribe {
            self.guard.borrow_mut().release();
            self.subscribe(source);
        }
    }

    fn subscribe(&self, source: &I) {
        if self.state.borrow().is_latched() {
            return;
        }
        let options = self.config.borrow().observe_options();
        let once = self.config.borrow().once;

        let state = Rc::clone(&self.state);
        let config = Rc::clone(&self.config);
        let render = Rc::clone(&self.render);
        let guard = Rc::downgrade(&self.guard);
        let threshold = options.threshold;
        let callback = Box::new(move |entry: IntersectionEntry| {
            let transition = state.borrow_mut().on_entry(entry, threshold, once);
            if transition != Transition::None {
                render(&config.borrow(), transition == Transition::Show);
            }
            if state.borrow().is_latched() {
                if let Some(guard) = guard.upgrade() {
                    if let Ok(mut guard) = guard.try_borrow_mut() {
                        guard.release();
                    }
                }
            }
        });

        let handle = source.observe(&options, callback);
        if handle.is_none() {
            log::warn!("intersection observation unavailable; element stays hidden");
        }
        let mut guard = self.guard.borrow_mut();
        *guard = SubscriptionGuard::from_option(handle);
        // The host may deliver an entry synchronously from `observe`.
        if self.state.borrow().is_latched() {
            guard.release();
        }
    }
}
