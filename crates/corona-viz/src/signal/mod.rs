//! Signal sources feeding the renderer.

mod random_walk;

pub use random_walk::{RandomWalk, DEFAULT_INTERVAL, DEFAULT_MAX_STEP};

use corona_api::Signal;
use std::time::Instant;

/// Anything that can hand out the latest signal snapshot on demand.
///
/// Implementations advance at their own cadence; `now` lets them decide whether
/// a new snapshot is due. Returned values must already be clamped to [0, 1],
/// which `Signal::new` guarantees.
pub trait SignalSource {
    fn snapshot(&mut self, now: Instant) -> Signal;
}
