//! Core config file watcher implementation.

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use paneld_common::ConfigError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, warn};

/// Quiet window that must pass after the last file event before a reload
/// signal is sent.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Watches a config file for changes and sends notifications.
pub struct ConfigWatcher {
    path: PathBuf,
    debounce: Duration,
}

impl ConfigWatcher {
    /// Create a new watcher for the given config file path.
    ///
    /// The file does not have to exist yet; its creation counts as a change.
    pub fn new(path: PathBuf) -> Result<Self, ConfigError> {
        if path.file_name().is_none() {
            return Err(ConfigError::WatchError(format!(
                "{} does not name a file",
                path.display()
            )));
        }
        if !path.exists() {
            warn!(
                "config file {} does not exist yet, will watch for creation",
                path.display()
            );
        }

        Ok(Self {
            path,
            debounce: DEFAULT_DEBOUNCE,
        })
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Watch the config file, sending `()` on `tx` after each debounced change.
    ///
    /// Runs until the underlying notify watcher goes away or every receiver
    /// of `tx` has been dropped.
    pub async fn watch(&self, tx: broadcast::Sender<()>) -> Result<(), ConfigError> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();
        let file_name = self.path.file_name().map(OsString::from).unwrap_or_default();

        let (event_tx, mut event_rx) = mpsc::channel::<()>(16);

        // Dropping the watcher stops the notify backend, so it lives on this stack frame.
        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| match result {
                Ok(event) if touches_file(&event, &file_name) => {
                    debug!("config file change detected: {:?}", event.kind);
                    let _ = event_tx.try_send(());
                }
                Ok(_) => {}
                Err(e) => error!("file watcher error: {e}"),
            },
            notify::Config::default(),
        )
        .map_err(|e| ConfigError::WatchError(format!("failed to create watcher: {e}")))?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|e| ConfigError::WatchError(format!("failed to watch {}: {e}", dir.display())))?;

        info!("watching {} for changes", self.path.display());

        while event_rx.recv().await.is_some() {
            if !self.settle(&mut event_rx).await {
                break;
            }

            info!("config file changed, sending reload signal");
            if tx.send(()).is_err() {
                debug!("no receivers for config reload signal, stopping watcher");
                break;
            }
        }

        Ok(())
    }

    /// Swallow follow-up events until the debounce window passes quietly.
    /// Returns `false` if the event channel closed meanwhile.
    async fn settle(&self, event_rx: &mut mpsc::Receiver<()>) -> bool {
        loop {
            match tokio::time::timeout(self.debounce, event_rx.recv()).await {
                Err(_elapsed) => return true,
                Ok(Some(())) => continue,
                Ok(None) => return false,
            }
        }
    }
}

/// Whether a notify event is a create or modify of `file_name`.
pub(crate) fn touches_file(event: &Event, file_name: &OsString) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
        && event
            .paths
            .iter()
            .any(|p| p.file_name().is_some_and(|n| n == file_name.as_os_str()))
}
