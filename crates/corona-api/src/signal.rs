//! Normalized driving signal

use std::time::Duration;

/// One snapshot of the external driving data.
///
/// Every channel lives in [0, 1]. Values are clamped on construction and
/// non-finite input becomes 0, so a bad reading never reaches the mapper.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Signal {
    /// Time since the producing source started
    timestamp: Duration,
    /// Probability of a flare (0-1)
    flare_prob: f32,
    /// Solar wind speed (0-1)
    solar_wind_speed: f32,
    /// Geomagnetic Kp index (0-1)
    kp_index: f32,
    /// Sunspot area (0-1)
    sunspot_area: f32,
}

impl Signal {
    pub fn new(
        timestamp: Duration,
        flare_prob: f32,
        solar_wind_speed: f32,
        kp_index: f32,
        sunspot_area: f32,
    ) -> Self {
        Self {
            timestamp,
            flare_prob: clamp_channel(flare_prob),
            solar_wind_speed: clamp_channel(solar_wind_speed),
            kp_index: clamp_channel(kp_index),
            sunspot_area: clamp_channel(sunspot_area),
        }
    }

    /// All channels at zero
    pub fn quiet() -> Self {
        Self::new(Duration::ZERO, 0.0, 0.0, 0.0, 0.0)
    }

    pub fn timestamp(&self) -> Duration {
        self.timestamp
    }

    pub fn flare_prob(&self) -> f32 {
        self.flare_prob
    }

    pub fn solar_wind_speed(&self) -> f32 {
        self.solar_wind_speed
    }

    pub fn kp_index(&self) -> f32 {
        self.kp_index
    }

    pub fn sunspot_area(&self) -> f32 {
        self.sunspot_area
    }

    /// Channels in fixed order: flare, wind, kp, sunspot
    pub fn channels(&self) -> [f32; 4] {
        [
            self.flare_prob,
            self.solar_wind_speed,
            self.kp_index,
            self.sunspot_area,
        ]
    }

    /// Builds a snapshot from channels in `channels()` order
    pub fn from_channels(timestamp: Duration, channels: [f32; 4]) -> Self {
        Self::new(timestamp, channels[0], channels[1], channels[2], channels[3])
    }
}

impl Default for Signal {
    fn default() -> Self {
        Self::quiet()
    }
}

fn clamp_channel(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
