//! The corona scene: background glow, core, orbiting particles, flare streaks
//! and grain.
//!
//! Holds the latest signal and knobs, the mapped parameters derived from them
//! and the particle population. Inputs are replaced whole; the population is
//! only reconciled when the mapped target count changes.

use corona_api::{Bounds, Canvas, Color, Hsl, ParameterSet, PixelBuffer, Shape, Signal};
use rand::rngs::StdRng;
use rand::Rng;

use super::grain::fill_grain;
use super::mapper::{MappedVisualParams, Mapper};
use super::particles::Population;

/// Core radius as a fraction of the shorter viewport side
pub const CORE_RADIUS_RATIO: f32 = 0.16;
/// Extra core radius at full sunspot area
pub const CORE_RADIUS_SUNSPOT: f32 = 40.0;
pub const PARTICLE_SIZE_BASE: f32 = 1.2;
pub const PARTICLE_SIZE_SUNSPOT: f32 = 2.4;
/// Streaks reach this fraction beyond the particle's orbit
pub const STREAK_EXTENSION: f32 = 0.18;
const STREAK_WEIGHT: f32 = 1.0;
/// Edge lightness of the background glow relative to its center
const EDGE_DARKEN: f32 = 0.35;
const PARTICLE_SATURATION: f32 = 90.0;
const PARTICLE_LIGHTNESS: f32 = 62.0;
const TWINKLE_LIGHTNESS: f32 = 14.0;
const TWINKLE_ALPHA_MIN: f32 = 0.35;
const TWINKLE_ALPHA_MAX: f32 = 0.9;

pub struct CoronaScene {
    mapper: Mapper,
    signal: Signal,
    knobs: ParameterSet,
    params: MappedVisualParams,
    population: Population,
    grain: PixelBuffer,
    rng: StdRng,
}

impl CoronaScene {
    pub fn new(mapper: Mapper, knobs: ParameterSet, mut rng: StdRng) -> Self {
        let signal = Signal::quiet();
        let params = mapper.map(&signal, &knobs);
        let mut population = Population::new();
        population.reconcile(params.particle_target, &mut rng);

        Self {
            mapper,
            signal,
            knobs,
            params,
            population,
            grain: PixelBuffer::default(),
            rng,
        }
    }

    pub fn signal(&self) -> &Signal {
        &self.signal
    }

    pub fn knobs(&self) -> &ParameterSet {
        &self.knobs
    }

    pub fn params(&self) -> &MappedVisualParams {
        &self.params
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn grain(&self) -> &PixelBuffer {
        &self.grain
    }

    pub fn set_signal(&mut self, signal: Signal) {
        if signal != self.signal {
            self.signal = signal;
            self.remap();
        }
    }

    pub fn set_knobs(&mut self, knobs: ParameterSet) {
        if knobs != self.knobs {
            self.knobs = knobs;
            self.remap();
        }
    }

    pub fn set_mapper(&mut self, mapper: Mapper) {
        if mapper != self.mapper {
            self.mapper = mapper;
            self.remap();
        }
    }

    /// Size the grain buffer to the backing resolution
    pub fn resize_grain(&mut self, size: [u32; 2]) -> bool {
        self.grain.resize(size[0], size[1])
    }

    fn remap(&mut self) {
        let params = self.mapper.map(&self.signal, &self.knobs);
        if params.particle_target != self.params.particle_target {
            self.population.reconcile(params.particle_target, &mut self.rng);
        }
        self.params = params;
    }

    /// Advance the particles one frame and paint everything into `canvas`
    pub fn paint<C: Canvas + ?Sized>(&mut self, canvas: &mut C, bounds: Bounds) {
        let params = &self.params;
        let center = (bounds.x, bounds.y);
        let sunspot = self.signal.sunspot_area();

        canvas.clear(Color::BLACK);

        // Background glow
        let inner = params.background.to_color(1.0);
        let edge = Hsl::new(params.hue, params.background.s, params.background.l * EDGE_DARKEN)
            .to_color(1.0);
        canvas.fill_radial_gradient(center.0, center.1, bounds.half_diagonal(), inner, edge);

        // Core
        let core_radius = finite_or(
            bounds.min_side() * CORE_RADIUS_RATIO + sunspot * CORE_RADIUS_SUNSPOT,
            0.0,
        )
        .max(0.0);
        let core = params.core.to_color(1.0);
        canvas.fill_radial_gradient(center.0, center.1, core_radius, core, core.with_alpha(0.0));

        // Particles and streaks
        self.population.advance(params.rotation_speed);

        let size = finite_or(
            PARTICLE_SIZE_BASE + sunspot * PARTICLE_SIZE_SUNSPOT,
            PARTICLE_SIZE_BASE,
        );
        let streak_probability =
            finite_or(params.flare_burst * params.streak_chance, 0.0).clamp(0.0, 1.0);
        let streak_color = Hsl::new(params.hue, 95.0, 75.0).to_color(0.35);
        let rng = &mut self.rng;

        for particle in self.population.particles() {
            let (x, y) = particle.position(center);
            if !(x.is_finite() && y.is_finite()) {
                continue;
            }

            let lightness =
                PARTICLE_LIGHTNESS + rng.random_range(-TWINKLE_LIGHTNESS..TWINKLE_LIGHTNESS);
            let alpha = rng.random_range(TWINKLE_ALPHA_MIN..TWINKLE_ALPHA_MAX);
            let color = Hsl::new(params.hue, PARTICLE_SATURATION, lightness).to_color(alpha);

            match self.knobs.shape {
                Shape::Square => canvas.fill_rect(x, y, size, size, color),
                Shape::Circle => canvas.fill_circle(x, y, size * 0.5, color),
            }

            if streak_probability > 0.0 && rng.random::<f32>() < streak_probability {
                let reach = 1.0 + STREAK_EXTENSION;
                let end = (
                    center.0 + (x - center.0) * reach,
                    center.1 + (y - center.1) * reach,
                );
                canvas.stroke_line((x, y), end, STREAK_WEIGHT, streak_color);
            }
        }

        if self.knobs.grain && !self.grain.is_empty() {
            fill_grain(&mut self.grain, rng);
            canvas.put_pixels(&self.grain);
        }
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}
