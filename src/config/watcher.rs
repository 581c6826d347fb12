//! Configuration file watcher for hot-reload support

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::JoystickConfig;

/// Delay before re-reading a modified file, lets editors finish writing
const DEBOUNCE: Duration = Duration::from_millis(100);

/// Config watcher that monitors file changes and queues reloaded configs
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<JoystickConfig>,
}

impl ConfigWatcher {
    /// Create a new config watcher for the specified file
    ///
    /// Returns the watcher together with the initially loaded configuration.
    pub fn new(config_path: impl Into<PathBuf>) -> Result<(Self, JoystickConfig)> {
        let config_path = config_path.into();
        let (tx, rx) = mpsc::channel();

        let initial_config =
            JoystickConfig::load(&config_path).context("Failed to load initial config")?;

        let reload_path = config_path.clone();

        // notify callbacks run on their own thread
        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            match res {
                Ok(event) => {
                    if !matches!(event.kind, EventKind::Modify(_)) {
                        return;
                    }
                    debug!("Config file modified: {:?}", event.paths);

                    thread::sleep(DEBOUNCE);

                    match JoystickConfig::load(&reload_path) {
                        Ok(new_config) => {
                            info!("Configuration reloaded successfully");
                            if let Err(e) = tx.send(new_config) {
                                error!("Failed to send config update: {}", e);
                            }
                        },
                        Err(e) => {
                            warn!("Failed to reload config (keeping old config): {:#}", e);
                        },
                    }
                },
                Err(e) => {
                    error!("Watch error: {}", e);
                },
            }
        })?;

        watcher
            .watch(Path::new(&config_path), RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch config file: {}", config_path.display()))?;

        info!("Config file watcher started for: {}", config_path.display());

        Ok((Self { _watcher: watcher, rx }, initial_config))
    }

    /// Most recent reloaded configuration, if any arrived since the last call
    ///
    /// Intermediate reloads are skipped; only the newest one is returned.
    pub fn try_next(&self) -> Option<JoystickConfig> {
        self.rx.try_iter().last()
    }

    /// Block until the next reload or the timeout elapses
    pub fn next_timeout(&self, timeout: Duration) -> Option<JoystickConfig> {
        self.rx.recv_timeout(timeout).ok()
    }
}
