//! Decorative floating dots behind the hero section.
//!
//! [`ParticleField`] is the simulation: a population sized from the surface
//! area, linear motion, and velocity reflection at the edges. The frame loop
//! that drives it lives in [`renderer`].

use std::fmt;

use rand::Rng;

pub mod renderer;

pub use renderer::ParticleRenderer;

/// Surface area (in square pixels) that accounts for one dot.
pub const AREA_PER_DOT: f64 = 15_000.0;

const MIN_RADIUS: f64 = 1.0;
const RADIUS_SPREAD: f64 = 2.0;
const SPEED_SPREAD: f64 = 0.3;
const MIN_OPACITY: f64 = 0.1;
const OPACITY_SPREAD: f64 = 0.5;

/// Number of dots for a surface of the given size.
pub fn population(width: f64, height: f64) -> usize {
    if !(width > 0.0 && height > 0.0) {
        return 0;
    }
    (width * height / AREA_PER_DOT).floor() as usize
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    /// Dark grey used for every dot; alpha comes from the dot.
    pub const fn dot(alpha: f64) -> Self {
        Self {
            r: 50,
            g: 50,
            b: 50,
            a: alpha,
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// What the renderer needs from a 2D drawing context.
pub trait DrawSurface {
    fn resize(&mut self, width: u32, height: u32);
    fn clear(&mut self, width: f64, height: f64);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub vx: f64,
    pub vy: f64,
    pub opacity: f64,
}

impl Dot {
    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64) -> Self {
        Self {
            x: rng.gen::<f64>() * width,
            y: rng.gen::<f64>() * height,
            radius: rng.gen::<f64>() * RADIUS_SPREAD + MIN_RADIUS,
            vx: (rng.gen::<f64>() - 0.5) * SPEED_SPREAD,
            vy: (rng.gen::<f64>() - 0.5) * SPEED_SPREAD,
            opacity: rng.gen::<f64>() * OPACITY_SPREAD + MIN_OPACITY,
        }
    }

    /// Moves by one frame of velocity, then flips the velocity on any axis
    /// that ended up outside `[0, dimension]`. The position is left where it
    /// landed, so a dot can sit past the edge for a single frame.
    pub fn advance(&mut self, width: f64, height: f64) {
        self.x += self.vx;
        self.y += self.vy;
        if self.x < 0.0 || self.x > width {
            self.vx = -self.vx;
        }
        if self.y < 0.0 || self.y > height {
            self.vy = -self.vy;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    width: f64,
    height: f64,
    dots: Vec<Dot>,
}

impl ParticleField {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64) -> Self {
        let dots = (0..population(width, height))
            .map(|_| Dot::random(rng, width, height))
            .collect();
        Self { width, height, dots }
    }

    /// Builds a field from explicit dots; the population rule is not applied.
    pub fn from_dots(width: f64, height: f64, dots: Vec<Dot>) -> Self {
        Self { width, height, dots }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn len(&self) -> usize {
        self.dots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }

    pub fn step(&mut self) {
        let (width, height) = (self.width, self.height);
        for dot in &mut self.dots {
            dot.advance(width, height);
        }
    }

    /// Clears the surface, draws every dot at its current position, then steps.
    pub fn render_frame<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) {
        surface.clear(self.width, self.height);
        for dot in &self.dots {
            surface.fill_circle(dot.x, dot.y, dot.radius, Rgba::dot(dot.opacity));
        }
        self.step();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[derive(Default)]
    struct Recording {
        clears: usize,
        circles: Vec<(f64, f64, f64, Rgba)>,
    }

    impl DrawSurface for Recording {
        fn resize(&mut self, _width: u32, _height: u32) {}

        fn clear(&mut self, _width: f64, _height: f64) {
            self.clears += 1;
            self.circles.clear();
        }

        fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba) {
            self.circles.push((x, y, radius, color));
        }
    }

    fn dot(x: f64, y: f64, vx: f64, vy: f64) -> Dot {
        Dot {
            x,
            y,
            radius: 2.0,
            vx,
            vy,
            opacity: 0.3,
        }
    }

    #[test]
    fn population_follows_area() {
        assert_eq!(population(1024.0, 768.0), 52);
        assert_eq!(population(1920.0, 1080.0), 138);
        assert_eq!(population(100.0, 100.0), 0);
        assert_eq!(population(0.0, 900.0), 0);
        assert_eq!(population(f64::NAN, 900.0), 0);
    }

    #[test]
    fn generated_dots_respect_ranges() {
        let mut rng = SmallRng::seed_from_u64(7);
        let field = ParticleField::generate(&mut rng, 800.0, 600.0);
        assert_eq!(field.len(), 32);
        for d in field.dots() {
            assert!((0.0..800.0).contains(&d.x));
            assert!((0.0..600.0).contains(&d.y));
            assert!((1.0..3.0).contains(&d.radius));
            assert!((-0.15..0.15).contains(&d.vx));
            assert!((-0.15..0.15).contains(&d.vy));
            assert!((0.1..0.6).contains(&d.opacity));
        }
    }

    #[test]
    fn reflection_inverts_without_clamping() {
        let mut d = dot(0.05, 10.0, -0.1, 0.0);
        d.advance(100.0, 100.0);
        assert!(d.x < 0.0, "position is not clamped");
        assert_eq!(d.vx, 0.1);
        d.advance(100.0, 100.0);
        assert!(d.x >= 0.0);
        assert_eq!(d.vx, 0.1);
    }

    #[test]
    fn reflection_is_per_axis() {
        let mut d = dot(99.95, 50.0, 0.1, 0.1);
        d.advance(100.0, 100.0);
        assert_eq!(d.vx, -0.1);
        assert_eq!(d.vy, 0.1);
    }

    #[test]
    fn inside_keeps_velocity() {
        let mut d = dot(99.0, 99.0, 0.1, 0.1);
        d.advance(100.0, 100.0);
        assert!(d.vx > 0.0);
        assert!(d.vy > 0.0);
    }

    #[test]
    fn frame_draws_before_stepping() {
        let field_dot = dot(10.0, 20.0, 0.1, -0.1);
        let mut field = ParticleField::from_dots(50.0, 50.0, vec![field_dot]);
        let mut surface = Recording::default();
        field.render_frame(&mut surface);

        assert_eq!(surface.clears, 1);
        assert_eq!(surface.circles, vec![(10.0, 20.0, 2.0, Rgba::dot(0.3))]);
        assert!((field.dots()[0].x - 10.1).abs() < 1e-12);
    }

    #[test]
    fn rgba_formats_as_css() {
        assert_eq!(Rgba::dot(0.25).to_string(), "rgba(50, 50, 50, 0.25)");
    }
}
