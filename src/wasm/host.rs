//! web-sys implementations of the host capabilities.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Element, EventTarget, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};

use crate::host::{
    FrameCallback, FrameScheduler, IntersectionEntry, IntersectionSource, ObserveOptions,
    Subscription, SubscriptionGuard, ViewportSize,
};
use crate::menu::ScrollLock;

/// A DOM event listener; removed on unsubscribe.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut()>,
}

impl Subscription for Listener {
    fn unsubscribe(&mut self) {
        let removed = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
        log_failure("removeEventListener", removed);
    }
}

/// Adds `callback` as a listener for `event` on `target`.
pub fn listen(
    target: &EventTarget,
    event: &'static str,
    callback: impl FnMut() + 'static,
) -> Option<SubscriptionGuard<Listener>> {
    let callback = Closure::<dyn FnMut()>::new(callback);
    match target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
        Ok(()) => Some(SubscriptionGuard::new(Listener {
            target: target.clone(),
            event,
            callback,
        })),
        Err(err) => {
            log::warn!("could not listen for {event}: {err:?}");
            None
        }
    }
}

/// `IntersectionObserver` bound to one element.
pub struct ElementIntersection {
    element: Element,
}

impl ElementIntersection {
    pub fn new(element: Element) -> Self {
        Self { element }
    }
}

pub struct Observation {
    observer: IntersectionObserver,
    element: Element,
    // Kept alive until the guard drops; the observer calls into it.
    _callback: Closure<dyn FnMut(Array, JsValue)>,
}

impl Subscription for Observation {
    fn unsubscribe(&mut self) {
        self.observer.unobserve(&self.element);
        self.observer.disconnect();
    }
}

impl IntersectionSource for ElementIntersection {
    type Subscription = Observation;

    fn observe(
        &self,
        options: &ObserveOptions,
        mut callback: Box<dyn FnMut(IntersectionEntry)>,
    ) -> Option<Observation> {
        let closure = Closure::<dyn FnMut(Array, JsValue)>::new(move |entries: Array, _observer: JsValue| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                callback(IntersectionEntry {
                    is_intersecting: entry.is_intersecting(),
                    ratio: entry.intersection_ratio(),
                });
            }
        });

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(options.root_margin);

        let observer =
            IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init).ok()?;
        observer.observe(&self.element);
        Some(Observation {
            observer,
            element: self.element.clone(),
            _callback: closure,
        })
    }
}

/// Window inner size and its `resize` event.
pub struct WindowViewport {
    window: Window,
}

impl WindowViewport {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    pub fn width(&self) -> Option<f64> {
        self.window.inner_width().ok()?.as_f64()
    }
}

impl ViewportSize for WindowViewport {
    type Subscription = Listener;

    fn size(&self) -> Option<(f64, f64)> {
        let w = self.width()?;
        let h = self.window.inner_height().ok()?.as_f64()?;
        Some((w, h))
    }

    fn on_resize(&self, callback: Rc<dyn Fn()>) -> Option<Listener> {
        let callback = Closure::<dyn FnMut()>::new(move || callback());
        self.window
            .add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
            .ok()?;
        Some(Listener {
            target: self.window.clone().into(),
            event: "resize",
            callback,
        })
    }
}

/// `requestAnimationFrame` / `cancelAnimationFrame`.
///
/// The JS function for a callback is created on the first request and
/// reused by every later request of the same callback, so a frame that
/// re-requests itself never drops the closure it is running in. It is
/// freed with the scheduler, whether or not its last frame ever ran.
pub struct AnimationFrames {
    window: Window,
    closure: RefCell<Option<(FrameCallback, Closure<dyn FnMut()>)>>,
}

impl AnimationFrames {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            closure: RefCell::new(None),
        }
    }

    /// Number of JS closures currently held; at most one.
    pub fn closures(&self) -> usize {
        usize::from(self.closure.borrow().is_some())
    }
}

impl FrameScheduler for AnimationFrames {
    type FrameId = i32;

    fn request_frame(&self, callback: FrameCallback) -> Option<i32> {
        let mut slot = self.closure.borrow_mut();
        let cached = matches!(
            &*slot,
            Some((current, _)) if std::ptr::addr_eq(Rc::as_ptr(current), Rc::as_ptr(&callback))
        );
        if !cached {
            let run = Rc::clone(&callback);
            *slot = Some((callback, Closure::<dyn FnMut()>::new(move || run())));
        }
        let (_, closure) = slot.as_ref()?;
        self.window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .ok()
    }

    fn cancel_frame(&self, id: i32) {
        log_failure("cancelAnimationFrame", self.window.cancel_animation_frame(id));
    }
}

/// Toggles `overflow: hidden` on `<body>`.
pub struct BodyScrollLock {
    body: HtmlElement,
}

impl BodyScrollLock {
    pub fn new(body: HtmlElement) -> Self {
        Self { body }
    }
}

impl ScrollLock for BodyScrollLock {
    fn set_locked(&self, locked: bool) {
        let value = if locked { "hidden" } else { "" };
        if let Err(err) = self.body.style().set_property("overflow", value) {
            log::warn!("could not set body overflow: {err:?}");
        }
    }
}

/// Replaces one space-separated class set with another.
pub fn swap_classes(element: &Element, remove: &str, add: &str) {
    let list = element.class_list();
    for class in remove.split_whitespace() {
        log_failure("classList.remove", list.remove_1(class));
    }
    for class in add.split_whitespace() {
        log_failure("classList.add", list.add_1(class));
    }
}

/// Logs a failed DOM call at debug level. Used where the only effect of
/// the failure is a missing class, attribute or style.
pub fn log_failure<T>(call: &str, result: Result<T, JsValue>) {
    if let Err(err) = result {
        log::debug!("{call} failed: {err:?}");
    }
}
