//! User-editable aesthetic parameters

use std::fmt;

/// Named palette presets
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Style {
    /// Muted amber, narrow hue swing, few streaks
    #[default]
    Minimal,
    /// Saturated gold-orange
    Solar,
    /// Greens drifting toward violet
    Aurora,
    /// Hot magenta
    Plasma,
}

impl Style {
    pub const ALL: [Style; 4] = [Style::Minimal, Style::Solar, Style::Aurora, Style::Plasma];

    pub fn name(self) -> &'static str {
        match self {
            Style::Minimal => "minimal",
            Style::Solar => "solar",
            Style::Aurora => "aurora",
            Style::Plasma => "plasma",
        }
    }

    /// Case-insensitive lookup by name
    pub fn from_name(name: &str) -> Option<Style> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|style| style.name().eq_ignore_ascii_case(name))
    }

    /// Lookup that never fails: unknown names map to the default preset
    pub fn from_name_or_default(name: &str) -> Style {
        Self::from_name(name).unwrap_or_default()
    }

    /// Next preset in `ALL`, wrapping around
    pub fn next(self) -> Style {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How each corona particle is drawn
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Shape {
    #[default]
    Circle,
    Square,
}

impl Shape {
    pub const ALL: [Shape; 2] = [Shape::Circle, Shape::Square];

    pub fn name(self) -> &'static str {
        match self {
            Shape::Circle => "circle",
            Shape::Square => "square",
        }
    }

    pub fn from_name(name: &str) -> Option<Shape> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|shape| shape.name().eq_ignore_ascii_case(name))
    }

    pub fn toggled(self) -> Shape {
        match self {
            Shape::Circle => Shape::Square,
            Shape::Square => Shape::Circle,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Knob values read by the renderer each frame.
///
/// Owned by the host; the renderer only ever receives whole replacement values.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterSet {
    /// Offset in lightness percentage points added to the preset's background
    pub background_lightness: f32,
    /// Particle count with a zero sunspot area
    pub base_particles: f32,
    /// Extra particles at full sunspot area
    pub particle_amp: f32,
    /// Scales the solar wind contribution to rotation
    pub wind_multiplier: f32,
    /// Scales flare probability into burst intensity
    pub flare_amp: f32,
    pub style: Style,
    pub shape: Shape,
    /// Number of quantization steps for saturation/lightness (>= 1)
    pub posterize: u32,
    /// Per-frame luminance noise overlay
    pub grain: bool,
}

impl ParameterSet {
    pub const BACKGROUND_LIGHTNESS_RANGE: (f32, f32) = (-20.0, 40.0);
    pub const BASE_PARTICLES_RANGE: (f32, f32) = (0.0, 3000.0);
    pub const PARTICLE_AMP_RANGE: (f32, f32) = (0.0, 3000.0);
    pub const WIND_MULTIPLIER_RANGE: (f32, f32) = (0.0, 5.0);
    pub const FLARE_AMP_RANGE: (f32, f32) = (0.0, 5.0);
    pub const POSTERIZE_RANGE: (u32, u32) = (1, 32);

    /// Posterize level guaranteed to be at least 1
    pub fn posterize_levels(&self) -> u32 {
        self.posterize.max(1)
    }

    /// Copy with out-of-range values replaced by defaults or pulled into range
    pub fn sanitized(&self) -> ParameterSet {
        let defaults = ParameterSet::default();
        ParameterSet {
            background_lightness: clamp_or(
                self.background_lightness,
                Self::BACKGROUND_LIGHTNESS_RANGE,
                defaults.background_lightness,
            ),
            base_particles: clamp_or(
                self.base_particles,
                Self::BASE_PARTICLES_RANGE,
                defaults.base_particles,
            ),
            particle_amp: clamp_or(
                self.particle_amp,
                Self::PARTICLE_AMP_RANGE,
                defaults.particle_amp,
            ),
            wind_multiplier: clamp_or(
                self.wind_multiplier,
                Self::WIND_MULTIPLIER_RANGE,
                defaults.wind_multiplier,
            ),
            flare_amp: clamp_or(self.flare_amp, Self::FLARE_AMP_RANGE, defaults.flare_amp),
            style: self.style,
            shape: self.shape,
            posterize: self
                .posterize
                .clamp(Self::POSTERIZE_RANGE.0, Self::POSTERIZE_RANGE.1),
            grain: self.grain,
        }
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            background_lightness: 0.0,
            base_particles: 350.0,
            particle_amp: 1200.0,
            wind_multiplier: 1.0,
            flare_amp: 1.0,
            style: Style::Minimal,
            shape: Shape::Circle,
            posterize: 12,
            grain: true,
        }
    }
}

fn clamp_or(value: f32, range: (f32, f32), fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(range.0, range.1)
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_lookup_ignores_case() {
        assert_eq!(Style::from_name("Aurora"), Some(Style::Aurora));
        assert_eq!(Style::from_name(" PLASMA "), Some(Style::Plasma));
        assert_eq!(Style::from_name("neon"), None);
    }

    #[test]
    fn test_unknown_style_falls_back_to_default() {
        assert_eq!(Style::from_name_or_default("glitter"), Style::Minimal);
        assert_eq!(Style::from_name_or_default(""), Style::default());
    }

    #[test]
    fn test_style_cycle_visits_all_presets() {
        let mut style = Style::Minimal;
        for expected in Style::ALL.iter().skip(1) {
            style = style.next();
            assert_eq!(style, *expected);
        }
        assert_eq!(style.next(), Style::Minimal);
    }

    #[test]
    fn test_posterize_levels_never_zero() {
        let knobs = ParameterSet {
            posterize: 0,
            ..ParameterSet::default()
        };
        assert_eq!(knobs.posterize_levels(), 1);
    }

    #[test]
    fn test_sanitized_replaces_non_finite() {
        let knobs = ParameterSet {
            wind_multiplier: f32::NAN,
            base_particles: -40.0,
            posterize: 0,
            ..ParameterSet::default()
        };
        let clean = knobs.sanitized();
        assert_eq!(clean.wind_multiplier, 1.0);
        assert_eq!(clean.base_particles, 0.0);
        assert_eq!(clean.posterize, 1);
    }
}
