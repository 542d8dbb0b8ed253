//! The panel supervisor: a fixed set of panels and the loop that checks them.

mod settings;


pub use settings::SupervisorSettings;

use crate::panel::PanelProcess;
use crate::source::PanelConfigSource;
use crate::spawner::{ProcessSpawner, SystemSpawner};
use paneld_common::{PaneldError, PanelRole};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

/// Point-in-time view of one panel, for status output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSnapshot {
    pub role: PanelRole,
    pub pid: Option<u32>,
    pub starts: u64,
}

/// State shared between the supervisor and its loop thread.
struct Shared {
    panels: Vec<PanelProcess>,
    running: AtomicBool,
    /// Held for a whole sweep, and by `stop()`, so no sweep can start a
    /// panel after `stop()` has returned.
    sweep: Mutex<()>,
    settings: SupervisorSettings,
}

impl Shared {
    fn run(&self) {
        let period = u64::from(self.settings.check_period.max(1));
        let mut tick: u64 = 0;

        while self.running.load(Ordering::Acquire) {
            if tick % period == 0 {
                self.check_all();
            }
            tick = tick.wrapping_add(1);
            thread::sleep(self.settings.tick_interval);
        }

        debug!("panel supervisor loop exited after {tick} ticks");
    }

    fn check_all(&self) {
        let _sweep = self.sweep.lock().unwrap_or_else(PoisonError::into_inner);
        for panel in &self.panels {
            if !self.running.load(Ordering::Acquire) {
                return;
            }
            panel.check();
        }
    }

    fn stop(&self) {
        self.running.store(false, Ordering::Release);
        let _sweep = self.sweep.lock().unwrap_or_else(PoisonError::into_inner);
        for panel in &self.panels {
            panel.stop();
        }
    }
}

/// Owns one [`PanelProcess`] per [`PanelRole`] and keeps them running.
///
/// Nothing is started at construction: panels come up on the first sweep
/// of the loop, which runs either on a thread created by [`spawn`](Self::spawn)
/// or on the caller's thread via [`run`](Self::run).
pub struct PanelSupervisor {
    shared: Arc<Shared>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl PanelSupervisor {
    pub fn new(
        config: Arc<dyn PanelConfigSource>,
        spawner: Arc<dyn ProcessSpawner>,
        settings: SupervisorSettings,
    ) -> Self {
        let panels = PanelRole::ALL
            .into_iter()
            .map(|role| PanelProcess::new(role, Arc::clone(&config), Arc::clone(&spawner)))
            .collect();

        Self {
            shared: Arc::new(Shared {
                panels,
                running: AtomicBool::new(true),
                sweep: Mutex::new(()),
                settings,
            }),
            worker: Mutex::new(None),
        }
    }

    /// Supervisor that spawns real OS processes.
    pub fn with_system_spawner(
        config: Arc<dyn PanelConfigSource>,
        settings: SupervisorSettings,
    ) -> Self {
        Self::new(config, Arc::new(SystemSpawner), settings)
    }

    /// Start the poll loop on a background thread.
    pub fn spawn(&self) -> Result<(), PaneldError> {
        let mut worker = self.worker.lock().unwrap_or_else(PoisonError::into_inner);
        if worker.is_some() {
            return Err(PaneldError::Supervisor("loop thread already spawned".into()));
        }

        let shared = Arc::clone(&self.shared);
        let handle = thread::Builder::new()
            .name("panel-supervisor".into())
            .spawn(move || shared.run())?;

        info!(
            tick_ms = self.shared.settings.tick_interval.as_millis() as u64,
            check_period = self.shared.settings.check_period,
            "panel supervisor started"
        );
        *worker = Some(handle);
        Ok(())
    }

    /// Run the poll loop on the current thread until [`stop`](Self::stop)
    /// is called from elsewhere.
    pub fn run(&self) {
        self.shared.run();
    }

    /// Check every panel once, in role order.
    pub fn check_all(&self) {
        self.shared.check_all();
    }

    /// Which panel owns `pid`, if any.
    pub fn panel_for_process_id(&self, pid: Option<u32>) -> Option<PanelRole> {
        let pid = pid?;
        self.shared
            .panels
            .iter()
            .find(|panel| panel.process_id() == Some(pid))
            .map(PanelProcess::role)
    }

    /// Ask the loop to exit and kill every panel process.
    ///
    /// Returns without waiting for the loop thread; use [`join`](Self::join)
    /// for that.
    pub fn stop(&self) {
        self.shared.stop();
    }

    /// Wait for the loop thread to finish. Does nothing if it was never
    /// spawned or has already been joined.
    pub fn join(&self) {
        let handle = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                warn!("panel supervisor thread panicked");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Acquire)
    }

    pub fn settings(&self) -> &SupervisorSettings {
        &self.shared.settings
    }

    pub fn panels(&self) -> &[PanelProcess] {
        &self.shared.panels
    }

    pub fn snapshot(&self) -> Vec<PanelSnapshot> {
        self.shared
            .panels
            .iter()
            .map(|panel| PanelSnapshot {
                role: panel.role(),
                pid: panel.process_id(),
                starts: panel.starts(),
            })
            .collect()
    }
}

impl Drop for PanelSupervisor {
    fn drop(&mut self) {
        self.shared.stop();
    }
}
