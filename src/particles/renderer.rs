use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use rand::rngs::SmallRng;

use super::{DrawSurface, ParticleField};
use crate::host::{CancellationToken, FrameCallback, FrameScheduler, SubscriptionGuard, ViewportSize};

struct Scene<S> {
    surface: S,
    field: ParticleField,
    rng: SmallRng,
}

impl<S: DrawSurface> Scene<S> {
    /// Resizes the surface and replaces the whole population.
    fn fit(&mut self, size: Option<(f64, f64)>) {
        let (width, height) = size.unwrap_or_default();
        let (width, height) = (width.max(0.0) as u32, height.max(0.0) as u32);
        self.surface.resize(width, height);
        self.field = ParticleField::generate(&mut self.rng, f64::from(width), f64::from(height));
        log::debug!("particle field {width}x{height}: {} dots", self.field.len());
    }
}

/// Owns a drawing surface and animates a [`ParticleField`] on it until dropped.
///
/// The first frame is drawn synchronously on mount; each later frame is
/// requested at the end of the previous one, so frames never overlap.
pub struct ParticleRenderer<S, V, F>
where
    V: ViewportSize,
    F: FrameScheduler,
{
    scene: Rc<RefCell<Scene<S>>>,
    // The resize listener only holds a weak reference.
    _viewport: Rc<V>,
    scheduler: Rc<F>,
    token: CancellationToken,
    pending: Rc<Cell<Option<F::FrameId>>>,
    frame: Rc<RefCell<Option<FrameCallback>>>,
    resize: SubscriptionGuard<V::Subscription>,
}

impl<S, V, F> ParticleRenderer<S, V, F>
where
    S: DrawSurface + 'static,
    V: ViewportSize + 'static,
    F: FrameScheduler + 'static,
{
    pub fn mount(surface: S, viewport: Rc<V>, scheduler: Rc<F>, rng: SmallRng) -> Self {
        let scene = Rc::new(RefCell::new(Scene {
            surface,
            field: ParticleField::default(),
            rng,
        }));
        scene.borrow_mut().fit(viewport.size());

        let resize = {
            let scene = Rc::downgrade(&scene);
            let weak_viewport = Rc::downgrade(&viewport);
            let on_resize: Rc<dyn Fn()> = Rc::new(move || {
                let (Some(scene), Some(viewport)) = (scene.upgrade(), weak_viewport.upgrade()) else {
                    return;
                };
                let size = viewport.size();
                scene.borrow_mut().fit(size);
            });
            let handle = viewport.on_resize(on_resize);
            if handle.is_none() {
                log::warn!("resize notifications unavailable; particle field keeps its initial size");
            }
            SubscriptionGuard::from_option(handle)
        };

        let token = CancellationToken::new();
        let pending: Rc<Cell<Option<F::FrameId>>> = Rc::new(Cell::new(None));

        // `frame` holds the per-frame callback so that it can hand itself
        // back to the scheduler. The callback only keeps a weak reference to
        // the slot; the renderer owns it.
        let frame: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        let callback: FrameCallback = {
            let next = Rc::downgrade(&frame);
            let scene = Rc::downgrade(&scene);
            let scheduler: Weak<F> = Rc::downgrade(&scheduler);
            let token = token.clone();
            let pending = Rc::clone(&pending);
            Rc::new(move || {
                pending.set(None);
                if token.is_cancelled() {
                    return;
                }
                let Some(scene) = scene.upgrade() else {
                    return;
                };
                {
                    let mut scene = scene.borrow_mut();
                    let Scene { surface, field, .. } = &mut *scene;
                    field.render_frame(surface);
                }

                // schedule next
                if token.is_cancelled() {
                    return;
                }
                let Some(callback) = next.upgrade().and_then(|slot| slot.borrow().clone()) else {
                    return;
                };
                if let Some(scheduler) = scheduler.upgrade() {
                    pending.set(scheduler.request_frame(callback));
                }
            })
        };
        *frame.borrow_mut() = Some(Rc::clone(&callback));

        let renderer = Self {
            scene,
            _viewport: viewport,
            scheduler,
            token,
            pending,
            frame,
            resize,
        };
        callback();
        renderer
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.get().is_some()
    }

    pub fn dot_count(&self) -> usize {
        self.scene.borrow().field.len()
    }

    pub fn with_field<T>(&self, f: impl FnOnce(&ParticleField) -> T) -> T {
        f(&self.scene.borrow().field)
    }

    pub fn with_surface<T>(&self, f: impl FnOnce(&S) -> T) -> T {
        f(&self.scene.borrow().surface)
    }

    /// Stops the loop and detaches from the host. Same as dropping.
    pub fn unmount(self) {}
}

impl<S, V, F> Drop for ParticleRenderer<S, V, F>
where
    V: ViewportSize,
    F: FrameScheduler,
{
    fn drop(&mut self) {
        self.token.cancel();
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel_frame(id);
        }
        self.frame.borrow_mut().take();
        self.resize.release();
    }
}
