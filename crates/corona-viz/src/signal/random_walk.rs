//! Mock signal feed.
//!
//! Perturbs the previous snapshot with small bounded random deltas every
//! interval, standing in for a real space-weather adapter.

use corona_api::Signal;
use rand::rngs::StdRng;
use rand::Rng;
use std::time::{Duration, Instant};

use super::SignalSource;

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1200);
pub const DEFAULT_MAX_STEP: f32 = 0.08;

pub struct RandomWalk {
    current: Signal,
    started: Instant,
    last_step: Instant,
    interval: Duration,
    /// Largest change a single channel can make per step
    max_step: f32,
    rng: StdRng,
}

impl RandomWalk {
    pub fn new(interval: Duration, max_step: f32, mut rng: StdRng, now: Instant) -> Self {
        // Start somewhere calm but not silent
        let channels = [
            rng.random_range(0.05..0.35),
            rng.random_range(0.2..0.5),
            rng.random_range(0.1..0.4),
            rng.random_range(0.1..0.4),
        ];

        Self {
            current: Signal::from_channels(Duration::ZERO, channels),
            started: now,
            last_step: now,
            interval,
            max_step: if max_step.is_finite() {
                max_step.abs()
            } else {
                DEFAULT_MAX_STEP
            },
            rng,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Take one walk step right away
    pub fn step(&mut self, now: Instant) -> Signal {
        let mut channels = self.current.channels();
        if self.max_step > 0.0 {
            for channel in &mut channels {
                *channel += self.rng.random_range(-self.max_step..=self.max_step);
            }
        }

        self.current = Signal::from_channels(now.saturating_duration_since(self.started), channels);
        self.last_step = now;
        self.current
    }
}

impl SignalSource for RandomWalk {
    fn snapshot(&mut self, now: Instant) -> Signal {
        // At most one step per call, a stalled host does not replay missed steps
        if now.saturating_duration_since(self.last_step) >= self.interval {
            self.step(now);
        }
        self.current
    }
}
