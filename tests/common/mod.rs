//! Counting host doubles shared by the integration tests.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::{Rc, Weak};

use portfolio_wasm::host::{
    FrameCallback, FrameScheduler, IntersectionEntry, IntersectionSource, ObserveOptions,
    Subscription, ViewportSize,
};
use portfolio_wasm::particles::{DrawSurface, Rgba};

/// `requestAnimationFrame` stand-in; frames run only when the test says so.
#[derive(Default)]
pub struct ManualFrames {
    next_id: Cell<u32>,
    queued: RefCell<BTreeMap<u32, FrameCallback>>,
    cancelled: Cell<u32>,
}

impl ManualFrames {
    pub fn outstanding(&self) -> usize {
        self.queued.borrow().len()
    }

    pub fn cancelled(&self) -> u32 {
        self.cancelled.get()
    }

    /// Runs the oldest queued frame. Returns false if none was queued.
    pub fn run_next(&self) -> bool {
        let next = {
            let mut queued = self.queued.borrow_mut();
            let id = queued.keys().next().copied();
            id.and_then(|id| queued.remove(&id))
        };
        match next {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }
}

impl FrameScheduler for ManualFrames {
    type FrameId = u32;

    fn request_frame(&self, callback: FrameCallback) -> Option<u32> {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.queued.borrow_mut().insert(id, callback);
        Some(id)
    }

    fn cancel_frame(&self, id: u32) {
        if self.queued.borrow_mut().remove(&id).is_some() {
            self.cancelled.set(self.cancelled.get() + 1);
        }
    }
}

type Listeners = Rc<RefCell<BTreeMap<u32, Rc<dyn Fn()>>>>;

/// Window size double with resize listeners.
pub struct FakeViewport {
    size: Cell<Option<(f64, f64)>>,
    next_id: Cell<u32>,
    listeners: Listeners,
}

pub struct ResizeListener {
    id: u32,
    listeners: Weak<RefCell<BTreeMap<u32, Rc<dyn Fn()>>>>,
}

impl Subscription for ResizeListener {
    fn unsubscribe(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().remove(&self.id);
        }
    }
}

impl FakeViewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Cell::new(Some((width, height))),
            next_id: Cell::new(0),
            listeners: Rc::default(),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            size: Cell::new(None),
            next_id: Cell::new(0),
            listeners: Rc::default(),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn resize(&self, width: f64, height: f64) {
        self.size.set(Some((width, height)));
        let listeners: Vec<_> = self.listeners.borrow().values().cloned().collect();
        for listener in listeners {
            listener();
        }
    }
}

impl ViewportSize for FakeViewport {
    type Subscription = ResizeListener;

    fn size(&self) -> Option<(f64, f64)> {
        self.size.get()
    }

    fn on_resize(&self, callback: Rc<dyn Fn()>) -> Option<ResizeListener> {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.listeners.borrow_mut().insert(id, callback);
        Some(ResizeListener {
            id,
            listeners: Rc::downgrade(&self.listeners),
        })
    }
}

/// A fresh handle onto a shared window, like a `web_sys::Window` clone:
/// dropping the handle leaves the window and its listeners in place.
pub struct WindowHandle(pub Rc<FakeViewport>);

impl ViewportSize for WindowHandle {
    type Subscription = ResizeListener;

    fn size(&self) -> Option<(f64, f64)> {
        self.0.size()
    }

    fn on_resize(&self, callback: Rc<dyn Fn()>) -> Option<ResizeListener> {
        self.0.on_resize(callback)
    }
}

/// Records what the renderer drew in its latest frame.
#[derive(Default)]
pub struct RecordingSurface {
    pub size: (u32, u32),
    pub resizes: usize,
    pub clears: usize,
    pub circles: Vec<(f64, f64, f64, Rgba)>,
}

impl DrawSurface for RecordingSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.resizes += 1;
    }

    fn clear(&mut self, _width: f64, _height: f64) {
        self.clears += 1;
        self.circles.clear();
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba) {
        self.circles.push((x, y, radius, color));
    }
}

type Observers = Rc<RefCell<BTreeMap<u32, Box<dyn FnMut(IntersectionEntry)>>>>;

/// Intersection double for many elements; each `observe` is one element.
#[derive(Default)]
pub struct FakeIntersections {
    next_id: Cell<u32>,
    observers: Observers,
    released: Rc<RefCell<BTreeSet<u32>>>,
    pub refuse: Cell<bool>,
}

pub struct Observed {
    id: u32,
    observers: Weak<RefCell<BTreeMap<u32, Box<dyn FnMut(IntersectionEntry)>>>>,
    released: Weak<RefCell<BTreeSet<u32>>>,
}

impl Subscription for Observed {
    fn unsubscribe(&mut self) {
        if let Some(released) = self.released.upgrade() {
            released.borrow_mut().insert(self.id);
        }
        if let Some(observers) = self.observers.upgrade() {
            observers.borrow_mut().remove(&self.id);
        }
    }
}

impl FakeIntersections {
    pub fn outstanding(&self) -> usize {
        self.observers.borrow().len()
    }

    pub fn released(&self) -> usize {
        self.released.borrow().len()
    }

    pub fn ids(&self) -> Vec<u32> {
        self.observers.borrow().keys().copied().collect()
    }

    /// Delivers `ratio` to observer `id`, as the browser would.
    pub fn deliver(&self, id: u32, ratio: f64) {
        let taken = self.observers.borrow_mut().remove(&id);
        let Some(mut callback) = taken else {
            return;
        };
        callback(IntersectionEntry {
            is_intersecting: ratio > 0.0,
            ratio,
        });
        if !self.released.borrow().contains(&id) {
            self.observers.borrow_mut().insert(id, callback);
        }
    }

    pub fn deliver_all(&self, ratio: f64) {
        for id in self.ids() {
            self.deliver(id, ratio);
        }
    }
}

impl IntersectionSource for FakeIntersections {
    type Subscription = Observed;

    fn observe(
        &self,
        _options: &ObserveOptions,
        callback: Box<dyn FnMut(IntersectionEntry)>,
    ) -> Option<Observed> {
        if self.refuse.get() {
            return None;
        }
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.observers.borrow_mut().insert(id, callback);
        Some(Observed {
            id,
            observers: Rc::downgrade(&self.observers),
            released: Rc::downgrade(&self.released),
        })
    }
}
