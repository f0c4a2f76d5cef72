//! Signal + knobs to concrete render parameters.
//!
//! Everything here is pure: the same inputs always produce the same output.

use corona_api::{Hsl, ParameterSet, Signal};

use super::palette::{Palette, StreakChances};

/// Idle rotation in radians per frame
pub const BASE_ROTATION: f32 = 0.002;
/// Rotation added at full solar wind and a multiplier of 1
pub const WIND_ROTATION: f32 = 0.01;
pub const CORE_LIGHTNESS_BASE: f32 = 42.0;
pub const CORE_LIGHTNESS_SUNSPOT: f32 = 14.0;
/// Background saturation relative to the core
const BACKGROUND_SATURATION_RATIO: f32 = 0.6;
/// Upper bound on the particle population
pub const MAX_PARTICLES: usize = 10_000;

/// Render parameters for one combination of signal and knobs
#[derive(Clone, Debug, PartialEq)]
pub struct MappedVisualParams {
    /// Degrees in [0, 360)
    pub hue: f32,
    pub background: Hsl,
    pub core: Hsl,
    pub particle_target: usize,
    /// Radians per frame before the per-particle multiplier
    pub rotation_speed: f32,
    pub flare_burst: f32,
    pub streak_chance: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Mapper {
    pub streaks: StreakChances,
}

impl Mapper {
    pub fn new(streaks: StreakChances) -> Self {
        Self { streaks }
    }

    pub fn map(&self, signal: &Signal, knobs: &ParameterSet) -> MappedVisualParams {
        let palette = Palette::for_style(knobs.style);
        let levels = knobs.posterize_levels();

        let hue = wrap_hue(palette.base_hue + signal.kp_index() * palette.hue_swing);
        let saturation = palette.base_saturation + signal.flare_prob() * palette.saturation_swing;
        let lightness = CORE_LIGHTNESS_BASE + signal.sunspot_area() * CORE_LIGHTNESS_SUNSPOT;
        let background_lightness =
            palette.background_lightness + finite_or_zero(knobs.background_lightness);

        let background = Hsl::new(
            hue,
            posterize(saturation * BACKGROUND_SATURATION_RATIO, levels),
            posterize(background_lightness, levels),
        );
        let core = Hsl::new(hue, posterize(saturation, levels), posterize(lightness, levels));

        let target = finite_or_zero(knobs.base_particles)
            + signal.sunspot_area() * finite_or_zero(knobs.particle_amp);
        let particle_target = (target.round().max(0.0) as usize).min(MAX_PARTICLES);

        let rotation_speed = BASE_ROTATION
            + signal.solar_wind_speed() * WIND_ROTATION * finite_or_zero(knobs.wind_multiplier);

        let flare_burst = signal.flare_prob() * finite_or_zero(knobs.flare_amp);

        MappedVisualParams {
            hue,
            background,
            core,
            particle_target,
            rotation_speed,
            flare_burst,
            streak_chance: self.streaks.for_style(knobs.style),
        }
    }
}

/// Map with the default streak chances
#[allow(dead_code)]
pub fn map(signal: &Signal, knobs: &ParameterSet) -> MappedVisualParams {
    Mapper::default().map(signal, knobs)
}

/// Quantize a percentage to `levels` steps of `100 / levels`.
///
/// A single level collapses every input to 0.
pub fn posterize(value: f32, levels: u32) -> f32 {
    if levels <= 1 {
        return 0.0;
    }
    let step = 100.0 / levels as f32;
    let value = if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    };
    (value / step).round() * step
}

fn wrap_hue(hue: f32) -> f32 {
    if !hue.is_finite() {
        return 0.0;
    }
    let wrapped = hue.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
