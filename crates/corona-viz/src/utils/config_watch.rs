//! Hot-reload of the config file.
//!
//! The file's directory is watched rather than the file itself so editors that
//! save by renaming a temp file over it still trigger a reload.

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};

use super::config::{Config, ConfigError};

pub struct ConfigWatcher {
    path: PathBuf,
    events: Receiver<()>,
    // Dropping the watcher stops the notifications
    _watcher: RecommendedWatcher,
}

impl ConfigWatcher {
    pub fn new(path: PathBuf) -> Result<Self, ConfigError> {
        let (tx, events) = channel();
        let file_name = path.file_name().map(|n| n.to_os_string());

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let Ok(event) = res else {
                return;
            };
            let relevant = matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
                && event
                    .paths
                    .iter()
                    .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
            if relevant {
                let _ = tx.send(());
            }
        })?;

        let dir = path.parent().unwrap_or(Path::new("."));
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        log::info!("Watching {:?} for changes", path);

        Ok(Self {
            path,
            events,
            _watcher: watcher,
        })
    }

    /// Watch the default config location, or `None` when that is impossible
    pub fn for_home() -> Option<Self> {
        let watcher = Config::path().and_then(Self::new);
        match watcher {
            Ok(w) => Some(w),
            Err(e) => {
                log::warn!("Config reload disabled: {}", e);
                None
            }
        }
    }

    /// Returns the reloaded config if the file changed since the last poll.
    ///
    /// A burst of events collapses into one reload. A file that fails to parse
    /// is reported and skipped, keeping the current settings.
    pub fn poll(&self) -> Option<Config> {
        let mut changed = false;
        while self.events.try_recv().is_ok() {
            changed = true;
        }
        if !changed {
            return None;
        }

        match Config::read(&self.path) {
            Ok(config) => {
                log::info!("Reloaded config from {:?}", self.path);
                Some(config)
            }
            Err(e) => {
                log::warn!("Ignoring config change: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{Duration, Instant};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("corona-viz-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Poll until a reload satisfies `want`; partial writes can show up first
    fn poll_until(
        watcher: &ConfigWatcher,
        timeout: Duration,
        want: impl Fn(&Config) -> bool,
    ) -> Option<Config> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Some(config) = watcher.poll().filter(|c| want(c)) {
                return Some(config);
            }
            std::thread::sleep(Duration::from_millis(20));
        }
        None
    }

    #[test]
    fn test_no_change_means_no_reload() {
        let dir = scratch_dir("idle");
        let path = dir.join("corona.toml");
        fs::write(&path, "posterize = 3").unwrap();
        let watcher = ConfigWatcher::new(path).unwrap();
        assert!(watcher.poll().is_none());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_edit_is_picked_up() {
        let dir = scratch_dir("edit");
        let path = dir.join("corona.toml");
        fs::write(&path, "posterize = 3").unwrap();
        let watcher = ConfigWatcher::new(path.clone()).unwrap();

        fs::write(&path, "posterize = 5").unwrap();
        let config = poll_until(&watcher, Duration::from_secs(5), |c| c.posterize.is_some());
        assert_eq!(config.and_then(|c| c.posterize), Some(5));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let path = std::env::temp_dir()
            .join("corona-viz-no-such-dir")
            .join("corona.toml");
        assert!(matches!(ConfigWatcher::new(path), Err(ConfigError::Watch(_))));
    }
}
