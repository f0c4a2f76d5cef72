//! Palette presets per style.

use corona_api::Style;

/// Per-frame chance that a fully bursting particle throws a streak
pub const STREAK_CHANCE_MINIMAL: f32 = 0.015;
pub const STREAK_CHANCE_VIVID: f32 = 0.06;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Degrees
    pub base_hue: f32,
    /// Percent
    pub base_saturation: f32,
    /// Percent, before the background knob offset
    pub background_lightness: f32,
    /// Hue shift in degrees at full Kp index
    pub hue_swing: f32,
    /// Saturation gain in percent at full flare probability
    pub saturation_swing: f32,
}

impl Palette {
    pub const fn for_style(style: Style) -> Palette {
        match style {
            Style::Minimal => Palette {
                base_hue: 28.0,
                base_saturation: 55.0,
                background_lightness: 6.0,
                hue_swing: 18.0,
                saturation_swing: 12.0,
            },
            Style::Solar => Palette {
                base_hue: 36.0,
                base_saturation: 85.0,
                background_lightness: 8.0,
                hue_swing: 48.0,
                saturation_swing: 15.0,
            },
            Style::Aurora => Palette {
                base_hue: 150.0,
                base_saturation: 70.0,
                background_lightness: 7.0,
                hue_swing: 90.0,
                saturation_swing: 20.0,
            },
            Style::Plasma => Palette {
                base_hue: 310.0,
                base_saturation: 80.0,
                background_lightness: 9.0,
                hue_swing: 60.0,
                saturation_swing: 18.0,
            },
        }
    }
}

/// Streak probabilities, tunable from the config file
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StreakChances {
    /// Used by `Style::Minimal`
    pub minimal: f32,
    /// Used by every other style
    pub vivid: f32,
}

impl StreakChances {
    pub fn for_style(&self, style: Style) -> f32 {
        let chance = match style {
            Style::Minimal => self.minimal,
            _ => self.vivid,
        };
        if chance.is_finite() {
            chance.max(0.0)
        } else {
            0.0
        }
    }
}

impl Default for StreakChances {
    fn default() -> Self {
        Self {
            minimal: STREAK_CHANCE_MINIMAL,
            vivid: STREAK_CHANCE_VIVID,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_has_narrowest_swing() {
        let minimal = Palette::for_style(Style::Minimal);
        for style in Style::ALL.iter().skip(1) {
            assert!(Palette::for_style(*style).hue_swing > minimal.hue_swing);
        }
    }

    #[test]
    fn test_streak_chance_by_style() {
        let chances = StreakChances::default();
        assert_eq!(chances.for_style(Style::Minimal), STREAK_CHANCE_MINIMAL);
        assert_eq!(chances.for_style(Style::Aurora), STREAK_CHANCE_VIVID);
        assert!(chances.for_style(Style::Minimal) < chances.for_style(Style::Solar));
    }

    #[test]
    fn test_bad_streak_chance_is_zero() {
        let chances = StreakChances {
            minimal: f32::NAN,
            vivid: -1.0,
        };
        assert_eq!(chances.for_style(Style::Minimal), 0.0);
        assert_eq!(chances.for_style(Style::Plasma), 0.0);
    }
}
