//! Corona particle population.
//!
//! Particles are created once and then evolve; resizing only appends to or
//! truncates the tail so existing orbits never jump.

use rand::Rng;
use std::f32::consts::TAU;
use std::ops::Range;

/// Orbital radius band in logical units
pub const RADIUS_RANGE: Range<f32> = 40.0..300.0;
/// Angular speed multiplier band
pub const SPEED_RANGE: Range<f32> = 0.2..1.4;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Radians in [0, TAU)
    pub angle: f32,
    /// Distance from the viewport center
    pub radius: f32,
    /// Scales the global rotation speed
    pub speed: f32,
}

impl Particle {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            angle: rng.random_range(0.0..TAU),
            radius: rng.random_range(RADIUS_RANGE),
            speed: rng.random_range(SPEED_RANGE),
        }
    }

    /// Move along the orbit by `rotation_speed * speed`
    pub fn advance(&mut self, rotation_speed: f32) {
        let delta = rotation_speed * self.speed;
        if !delta.is_finite() {
            return;
        }
        self.angle = (self.angle + delta).rem_euclid(TAU);
    }

    /// Cartesian position relative to `center`
    pub fn position(&self, center: (f32, f32)) -> (f32, f32) {
        (
            center.0 + self.radius * self.angle.cos(),
            center.1 + self.radius * self.angle.sin(),
        )
    }
}

#[derive(Clone, Debug, Default)]
pub struct Population {
    particles: Vec<Particle>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grow or shrink to `target`.
    ///
    /// New particles are appended with random orbits; surplus ones are removed
    /// from the end. Existing particles keep their state.
    pub fn reconcile<R: Rng>(&mut self, target: usize, rng: &mut R) {
        let current = self.particles.len();
        if current < target {
            self.particles.reserve(target - current);
            self.particles
                .extend((current..target).map(|_| Particle::random(rng)));
        } else if current > target {
            self.particles.truncate(target);
        }
    }

    pub fn advance(&mut self, rotation_speed: f32) {
        for particle in &mut self.particles {
            particle.advance(rotation_speed);
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}
