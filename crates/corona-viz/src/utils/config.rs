//! Configuration file management.
//!
//! Handles loading user preferences from `~/.corona-viz.toml`. The file doubles
//! as the control panel: it is watched and its knobs replace the running ones
//! whenever it changes.

use corona_api::{ParameterSet, Shape, Style};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::renderer::palette::{STREAK_CHANCE_MINIMAL, STREAK_CHANCE_VIVID};
use crate::renderer::StreakChances;
use crate::signal::{DEFAULT_INTERVAL, DEFAULT_MAX_STEP};

const CONFIG_FILE: &str = ".corona-viz.toml";

const CONFIG_TEMPLATE: &str = r#"# corona-viz configuration file
# Look and particle settings are picked up while the visualization is running.

# =============================================================================
# Look
# =============================================================================

# style = "minimal"              # minimal | solar | aurora | plasma
# shape = "circle"               # circle | square
# posterize = 12                 # Hue/lightness steps, 1 = flat
# grain = true                   # Film grain overlay
# background_lightness = 0.0     # Offset on the palette background (-20..40)

# =============================================================================
# Particles
# =============================================================================

# base_particles = 350           # Particles with a quiet sun
# particle_amp = 1200            # Extra particles at full sunspot area
# wind_multiplier = 1.0          # Solar wind influence on rotation
# flare_amp = 1.0                # Flare influence on streaks

# Chance per particle per frame of drawing a streak at full flare burst
# streak_chance_minimal = 0.015
# streak_chance_vivid = 0.06

# =============================================================================
# Signal (read at startup only)
# =============================================================================

# signal_interval_ms = 1200      # Time between signal updates
# signal_max_step = 0.08         # Largest change of a channel per update
# seed = 42                      # Fixed seed for a repeatable run
"#;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no home directory")]
    NoHome,
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config watcher: {0}")]
    Watch(#[from] notify::Error),
}

#[derive(Deserialize, Default, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    // Knobs
    pub background_lightness: Option<f32>,
    pub base_particles: Option<f32>,
    pub particle_amp: Option<f32>,
    pub wind_multiplier: Option<f32>,
    pub flare_amp: Option<f32>,
    pub style: Option<String>,
    pub shape: Option<String>,
    pub posterize: Option<u32>,
    pub grain: Option<bool>,

    // Streaks
    pub streak_chance_minimal: Option<f32>,
    pub streak_chance_vivid: Option<f32>,

    // Signal
    pub signal_interval_ms: Option<u64>,
    pub signal_max_step: Option<f32>,
    pub seed: Option<u64>,
}

impl Config {
    pub fn path() -> Result<PathBuf, ConfigError> {
        dirs::home_dir()
            .map(|h| h.join(CONFIG_FILE))
            .ok_or(ConfigError::NoHome)
    }

    /// Load from the home directory, writing the template on first run.
    /// Any failure falls back to defaults.
    pub fn load() -> Self {
        let path = match Self::path() {
            Ok(p) => p,
            Err(e) => {
                log::warn!("{}, using default config", e);
                return Self::default();
            }
        };

        if !path.exists() {
            match fs::write(&path, CONFIG_TEMPLATE) {
                Ok(()) => log::info!("Created config template at {:?}", path),
                Err(e) => log::warn!("Could not write config template {:?}: {}", path, e),
            }
        }

        match Self::read(&path) {
            Ok(config) => {
                log::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                log::warn!("{}, using default config", e);
                Self::default()
            }
        }
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Knob values with defaults filled in and out-of-range values fixed
    pub fn knobs(&self) -> ParameterSet {
        let defaults = ParameterSet::default();

        let style = match self.style.as_deref() {
            None => defaults.style,
            Some(name) => Style::from_name(name).unwrap_or_else(|| {
                log::warn!("Unknown style {:?}, using {}", name, defaults.style);
                defaults.style
            }),
        };
        let shape = match self.shape.as_deref() {
            None => defaults.shape,
            Some(name) => Shape::from_name(name).unwrap_or_else(|| {
                log::warn!("Unknown shape {:?}, using {}", name, defaults.shape);
                defaults.shape
            }),
        };
        let posterize = match self.posterize {
            Some(0) => {
                log::warn!("posterize must be at least 1, using {}", defaults.posterize);
                defaults.posterize
            }
            Some(levels) => levels,
            None => defaults.posterize,
        };

        ParameterSet {
            background_lightness: self
                .background_lightness
                .unwrap_or(defaults.background_lightness),
            base_particles: self.base_particles.unwrap_or(defaults.base_particles),
            particle_amp: self.particle_amp.unwrap_or(defaults.particle_amp),
            wind_multiplier: self.wind_multiplier.unwrap_or(defaults.wind_multiplier),
            flare_amp: self.flare_amp.unwrap_or(defaults.flare_amp),
            style,
            shape,
            posterize,
            grain: self.grain.unwrap_or(defaults.grain),
        }
        .sanitized()
    }

    pub fn streak_chances(&self) -> StreakChances {
        StreakChances {
            minimal: self.streak_chance_minimal.unwrap_or(STREAK_CHANCE_MINIMAL),
            vivid: self.streak_chance_vivid.unwrap_or(STREAK_CHANCE_VIVID),
        }
    }

    pub fn signal_interval(&self) -> Duration {
        match self.signal_interval_ms {
            Some(0) | None => DEFAULT_INTERVAL,
            Some(ms) => Duration::from_millis(ms),
        }
    }

    pub fn signal_max_step(&self) -> f32 {
        self.signal_max_step
            .filter(|s| s.is_finite() && *s >= 0.0)
            .unwrap_or(DEFAULT_MAX_STEP)
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses_to_defaults() {
        let config = Config::parse(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.knobs(), ParameterSet::default());
        assert_eq!(config.streak_chances(), StreakChances::default());
        assert_eq!(config.signal_interval(), DEFAULT_INTERVAL);
        assert_eq!(config.signal_max_step(), DEFAULT_MAX_STEP);
        assert_eq!(config.seed(), None);
    }

    #[test]
    fn test_knob_values_are_read() {
        let config = Config::parse(
            r#"
            style = "Aurora"
            shape = "square"
            posterize = 4
            grain = false
            base_particles = 100
            particle_amp = 50.5
            wind_multiplier = 2.0
            seed = 7
            signal_interval_ms = 250
            "#,
        )
        .unwrap();

        let knobs = config.knobs();
        assert_eq!(knobs.style, Style::Aurora);
        assert_eq!(knobs.shape, Shape::Square);
        assert_eq!(knobs.posterize, 4);
        assert!(!knobs.grain);
        assert_eq!(knobs.base_particles, 100.0);
        assert_eq!(knobs.particle_amp, 50.5);
        assert_eq!(knobs.wind_multiplier, 2.0);
        assert_eq!(config.seed(), Some(7));
        assert_eq!(config.signal_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = Config::parse(
            r#"
            style = "neon"
            shape = "hexagon"
            posterize = 0
            base_particles = -40
            signal_interval_ms = 0
            signal_max_step = -1.0
            "#,
        )
        .unwrap();

        let knobs = config.knobs();
        let defaults = ParameterSet::default();
        assert_eq!(knobs.style, defaults.style);
        assert_eq!(knobs.shape, defaults.shape);
        assert_eq!(knobs.posterize, defaults.posterize);
        assert_eq!(knobs.base_particles, 0.0);
        assert_eq!(config.signal_interval(), DEFAULT_INTERVAL);
        assert_eq!(config.signal_max_step(), DEFAULT_MAX_STEP);
    }

    #[test]
    fn test_streak_overrides() {
        let config = Config::parse("streak_chance_vivid = 0.2").unwrap();
        let streaks = config.streak_chances();
        assert_eq!(streaks.minimal, STREAK_CHANCE_MINIMAL);
        assert_eq!(streaks.vivid, 0.2);
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(matches!(
            Config::parse("posterize = \"lots\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("corona-viz-does-not-exist.toml");
        assert!(matches!(Config::read(&path), Err(ConfigError::Io { .. })));
    }
}
