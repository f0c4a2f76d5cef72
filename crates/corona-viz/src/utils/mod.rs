mod config;
mod config_watch;
mod viewport;

pub use config::Config;
pub use config_watch::ConfigWatcher;
pub use viewport::{Viewport, ViewportManager};
