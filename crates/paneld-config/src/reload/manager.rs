//! Core reload manager implementation.

use crate::schema::PaneldConfig;
use crate::watcher::ConfigWatcher;
use paneld_common::ConfigError;
use std::path::PathBuf;
use tokio::sync::{broadcast, watch};
use tracing::{error, info, warn};

/// Manages live config reloading.
///
/// Watches the config file for changes and publishes new configs
/// via a [`tokio::sync::watch`] channel. Consumers read the latest
/// value with `borrow()`, which works from plain threads too.
pub struct ReloadManager {
    config_path: PathBuf,
}

impl ReloadManager {
    /// Publish `initial` and start watching `config_path` for changes.
    ///
    /// `initial` is what the caller already loaded from `config_path`, so
    /// the first value every receiver sees matches it exactly. Must be
    /// called from within a tokio runtime; the watcher runs as a
    /// background task.
    pub async fn start(config_path: PathBuf, initial: PaneldConfig) -> watch::Receiver<PaneldConfig> {
        let (config_tx, config_rx) = watch::channel(initial);

        let manager = ReloadManager { config_path };
        tokio::spawn(async move {
            manager.run_watch_loop(config_tx).await;
        });

        config_rx
    }

    async fn run_watch_loop(&self, config_tx: watch::Sender<PaneldConfig>) {
        let watcher = match ConfigWatcher::new(self.config_path.clone()) {
            Ok(w) => w,
            Err(e) => {
                error!("failed to create config watcher: {e}");
                return;
            }
        };

        let (change_tx, mut change_rx) = broadcast::channel::<()>(16);

        tokio::spawn(async move {
            if let Err(e) = watcher.watch(change_tx).await {
                error!("config watcher error: {e}");
            }
        });

        loop {
            match change_rx.recv().await {
                Ok(()) => {
                    info!("reloading config from {}", self.config_path.display());
                    match self.reload_config() {
                        Ok(config) => {
                            if config_tx.send(config).is_err() {
                                info!("all config receivers dropped, stopping reload manager");
                                break;
                            }
                        }
                        Err(e) => {
                            warn!("config reload failed, keeping previous config: {e}");
                        }
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!("config watcher lagged by {n} events");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    info!("config watcher channel closed");
                    break;
                }
            }
        }
    }

    /// Reload config from disk with the same repairs as the startup load.
    fn reload_config(&self) -> Result<PaneldConfig, ConfigError> {
        let loaded = crate::load_config(&self.config_path)?;
        loaded.log(&self.config_path);
        Ok(loaded.config)
    }
}
