//! Corona rendering pipeline: mapping, particles, painting and the frame loop.

mod animation;
mod corona;
mod grain;
pub mod mapper;
pub mod palette;
mod particles;
#[cfg(test)]
mod recording;

pub use animation::{AnimationLoop, LoopHandle, LoopState, Schedule};
pub use corona::CoronaScene;
pub use mapper::Mapper;
pub use palette::StreakChances;
