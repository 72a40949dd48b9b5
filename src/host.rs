//! Host capabilities the components are written against.
//!
//! The browser implementations live in `wasm::host`; tests drive the same
//! traits with counting doubles.

use std::cell::Cell;
use std::rc::Rc;

/// A live registration with the host (observer, listener, ...).
pub trait Subscription {
    /// Detach from the host. Called at most once by [`SubscriptionGuard`].
    fn unsubscribe(&mut self);
}

/// Owns a subscription and releases it exactly once.
///
/// Release happens on the first of: an explicit [`release`](Self::release),
/// or drop. The handle is kept until drop even after release, since a
/// callback owned by the handle may still be on the stack.
pub struct SubscriptionGuard<S: Subscription> {
    handle: Option<S>,
    released: bool,
}

impl<S: Subscription> SubscriptionGuard<S> {
    pub fn new(handle: S) -> Self {
        Self {
            handle: Some(handle),
            released: false,
        }
    }

    /// A guard with nothing to release; used when the host refused the subscription.
    pub fn empty() -> Self {
        Self {
            handle: None,
            released: true,
        }
    }

    pub fn from_option(handle: Option<S>) -> Self {
        handle.map_or_else(Self::empty, Self::new)
    }

    pub fn is_active(&self) -> bool {
        !self.released
    }

    /// Returns true if this call performed the release.
    pub fn release(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.released = true;
        if let Some(handle) = self.handle.as_mut() {
            handle.unsubscribe();
        }
        true
    }
}

impl<S: Subscription> Drop for SubscriptionGuard<S> {
    fn drop(&mut self) {
        self.release();
    }
}

/// One intersection notification for an observed element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub is_intersecting: bool,
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObserveOptions {
    pub threshold: f64,
    /// CSS margin string applied to the root (viewport) box.
    pub root_margin: &'static str,
}

/// Reports intersection of one element with the viewport.
pub trait IntersectionSource {
    type Subscription: Subscription;

    /// Returns `None` when the host has no intersection capability.
    fn observe(
        &self,
        options: &ObserveOptions,
        callback: Box<dyn FnMut(IntersectionEntry)>,
    ) -> Option<Self::Subscription>;
}

/// Current drawable size of the window plus size-change notifications.
pub trait ViewportSize {
    type Subscription: Subscription;

    fn size(&self) -> Option<(f64, f64)>;

    fn on_resize(&self, callback: Rc<dyn Fn()>) -> Option<Self::Subscription>;
}

pub type FrameCallback = Rc<dyn Fn()>;

/// Per-frame callback scheduling (`requestAnimationFrame` in the browser).
pub trait FrameScheduler {
    type FrameId: Copy;

    fn request_frame(&self, callback: FrameCallback) -> Option<Self::FrameId>;

    fn cancel_frame(&self, id: Self::FrameId);
}

/// Shared flag checked before every reschedule.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Rc<Cell<bool>>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}
