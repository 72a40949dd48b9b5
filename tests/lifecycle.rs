mod common;

use std::rc::Rc;

use common::{FakeIntersections, FakeViewport, ManualFrames, RecordingSurface, WindowHandle};
use portfolio_wasm::particles::{population, ParticleRenderer};
use portfolio_wasm::reveal::{RevealConfig, RevealController, Variant};
use rand::rngs::SmallRng;
use rand::SeedableRng;

type TestRenderer = ParticleRenderer<RecordingSurface, FakeViewport, ManualFrames>;

fn mount(width: f64, height: f64) -> (TestRenderer, Rc<FakeViewport>, Rc<ManualFrames>) {
    let viewport = Rc::new(FakeViewport::new(width, height));
    let frames = Rc::new(ManualFrames::default());
    let renderer = ParticleRenderer::mount(
        RecordingSurface::default(),
        Rc::clone(&viewport),
        Rc::clone(&frames),
        SmallRng::seed_from_u64(42),
    );
    (renderer, viewport, frames)
}

#[test]
fn standard_screen_gets_52_dots() {
    let (renderer, _viewport, _frames) = mount(1024.0, 768.0);
    assert_eq!(renderer.dot_count(), 52);
    renderer.with_surface(|surface| {
        assert_eq!(surface.size, (1024, 768));
        assert_eq!(surface.clears, 1, "first frame is drawn on mount");
        assert_eq!(surface.circles.len(), 52);
    });
}

#[test]
fn each_frame_schedules_exactly_one_successor() {
    let (renderer, _viewport, frames) = mount(640.0, 480.0);
    assert_eq!(frames.outstanding(), 1);
    for _ in 0..10 {
        assert!(frames.run_next());
        assert_eq!(frames.outstanding(), 1);
    }
    assert!(renderer.has_pending_frame());
    renderer.with_surface(|surface| assert_eq!(surface.clears, 11));
}

#[test]
fn frames_observe_previous_mutations() {
    let (renderer, _viewport, frames) = mount(640.0, 480.0);
    let before: Vec<_> = renderer.with_field(|f| f.dots().to_vec());
    frames.run_next();

    // The second frame draws where the first frame's step left each dot...
    renderer.with_surface(|surface| {
        let drawn: Vec<_> = surface.circles.iter().map(|(x, y, _, _)| (*x, *y)).collect();
        let expected: Vec<_> = before.iter().map(|d| (d.x, d.y)).collect();
        assert_eq!(drawn, expected);
    });
    // ...and then steps them once more.
    renderer.with_field(|field| {
        for (dot, old) in field.dots().iter().zip(&before) {
            let mut stepped = *old;
            stepped.advance(640.0, 480.0);
            assert_eq!(*dot, stepped);
        }
    });
}

#[test]
fn resize_regenerates_population() {
    let (renderer, viewport, _frames) = mount(1024.0, 768.0);
    for (w, h) in [(1920.0, 1080.0), (375.0, 812.0), (1.0, 1.0), (800.0, 600.0)] {
        viewport.resize(w, h);
        assert_eq!(renderer.dot_count(), population(w, h));
        renderer.with_field(|field| {
            assert_eq!((field.width(), field.height()), (w, h));
            assert!(field.dots().iter().all(|d| d.x < w && d.y < h));
        });
    }
    renderer.with_surface(|surface| assert_eq!(surface.size, (800, 600)));
}

#[test]
fn resize_works_when_only_the_renderer_holds_the_viewport() {
    let window = Rc::new(FakeViewport::new(1024.0, 768.0));
    let renderer = ParticleRenderer::mount(
        RecordingSurface::default(),
        Rc::new(WindowHandle(Rc::clone(&window))),
        Rc::new(ManualFrames::default()),
        SmallRng::seed_from_u64(3),
    );
    assert_eq!(renderer.dot_count(), 52);

    window.resize(1920.0, 1080.0);
    assert_eq!(renderer.dot_count(), 138);
    renderer.with_surface(|surface| assert_eq!(surface.size, (1920, 1080)));

    renderer.unmount();
    assert_eq!(window.listener_count(), 0);
}

#[test]
fn fractional_window_size_is_truncated() {
    let (renderer, _viewport, _frames) = mount(1024.7, 768.9);
    renderer.with_surface(|surface| assert_eq!(surface.size, (1024, 768)));
    assert_eq!(renderer.dot_count(), 52);
}

#[test]
fn unmount_leaves_nothing_outstanding() {
    let (renderer, viewport, frames) = mount(1024.0, 768.0);
    frames.run_next();
    assert_eq!(frames.outstanding(), 1);
    assert_eq!(viewport.listener_count(), 1);

    renderer.unmount();

    assert_eq!(frames.outstanding(), 0);
    assert_eq!(frames.cancelled(), 1);
    assert_eq!(viewport.listener_count(), 0);
    assert!(!frames.run_next());
}

#[test]
fn missing_viewport_size_draws_nothing() {
    let viewport = Rc::new(FakeViewport::unavailable());
    let frames = Rc::new(ManualFrames::default());
    let renderer = ParticleRenderer::mount(
        RecordingSurface::default(),
        Rc::clone(&viewport),
        Rc::clone(&frames),
        SmallRng::seed_from_u64(1),
    );
    assert_eq!(renderer.dot_count(), 0);
    assert!(renderer.is_running());
}

#[test]
fn reveals_release_every_observer_on_unmount() {
    let source = FakeIntersections::default();
    let controllers: Vec<_> = Variant::ALL
        .into_iter()
        .map(|variant| RevealController::mount(&source, RevealConfig::new(variant), |_, _| {}))
        .collect();
    assert_eq!(source.outstanding(), 4);

    // Two latch and release early; the rest are released on drop.
    let ids = source.ids();
    source.deliver(ids[0], 0.5);
    source.deliver(ids[1], 0.5);
    assert_eq!(source.outstanding(), 2);

    drop(controllers);
    assert_eq!(source.outstanding(), 0);
    assert_eq!(source.released(), 4);
}

#[test]
fn reveals_trigger_independently() {
    let source = FakeIntersections::default();
    let first = RevealController::mount(&source, RevealConfig::default(), |_, _| {});
    let second = RevealController::mount(&source, RevealConfig::default().with_once(false), |_, _| {});
    let ids = source.ids();

    source.deliver(ids[1], 0.3);
    assert!(!first.is_visible());
    assert!(second.is_visible());

    source.deliver(ids[0], 0.3);
    source.deliver(ids[1], 0.0);
    assert!(first.is_visible());
    assert!(!second.is_visible());
}

#[test]
fn reveal_without_observer_stays_hidden() {
    let source = FakeIntersections::default();
    source.refuse.set(true);
    let controller = RevealController::mount(&source, RevealConfig::default(), |_, _| {});
    assert!(!controller.is_observing());
    source.deliver_all(1.0);
    assert!(!controller.is_visible());
}
