use std::f64::consts::TAU;
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::host::{AnimationFrames, WindowViewport};
use crate::error::Result;
use crate::particles::{DrawSurface, ParticleRenderer, Rgba};

pub type CanvasRenderer = ParticleRenderer<CanvasSurface, WindowViewport, AnimationFrames>;

/// Canvas element plus its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl DrawSurface for CanvasSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba) {
        self.ctx.begin_path();
        if self.ctx.arc(x, y, radius, 0.0, TAU).is_err() {
            return;
        }
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.fill();
    }
}

/// Start the dot field on `canvas`. Without a 2D context nothing is drawn.
pub fn start(window: &Window, canvas: HtmlCanvasElement) -> Result<Option<CanvasRenderer>> {
    let Some(ctx) = canvas.get_context("2d")? else {
        log::warn!("2d canvas context unavailable; skipping particle background");
        return Ok(None);
    };
    let Ok(ctx) = ctx.dyn_into::<CanvasRenderingContext2d>() else {
        log::warn!("unexpected canvas context type; skipping particle background");
        return Ok(None);
    };

    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
    let renderer = ParticleRenderer::mount(
        CanvasSurface { canvas, ctx },
        Rc::new(WindowViewport::new(window.clone())),
        Rc::new(AnimationFrames::new(window.clone())),
        SmallRng::seed_from_u64(seed),
    );
    log::info!("particle background running with {} dots", renderer.dot_count());
    Ok(Some(renderer))
}
