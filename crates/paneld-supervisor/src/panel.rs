//! Lifecycle of a single panel process.

use crate::source::PanelConfigSource;
use crate::spawner::{CommandLine, ProcessHandle, ProcessSpawner};
use paneld_common::{PanelRole, ProcessError};
use std::path::Path;
use std::process::ExitStatus;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

type Slot = Option<Box<dyn ProcessHandle>>;

/// One supervised panel.
///
/// The struct lives as long as its supervisor; the OS process behind it
/// comes and goes. The handle is only `Some` while the process is believed
/// alive, and every read-modify-write of it happens under one lock so a
/// `stop()` from another thread cannot interleave with a restart.
pub struct PanelProcess {
    role: PanelRole,
    config: Arc<dyn PanelConfigSource>,
    spawner: Arc<dyn ProcessSpawner>,
    handle: Mutex<Slot>,
    starts: AtomicU64,
}

/// Why `check()` decided a panel needs (re)starting.
enum Death {
    NotRunning,
    Exited(ExitStatus),
    Unknown(ProcessError),
}

impl PanelProcess {
    pub fn new(
        role: PanelRole,
        config: Arc<dyn PanelConfigSource>,
        spawner: Arc<dyn ProcessSpawner>,
    ) -> Self {
        Self {
            role,
            config,
            spawner,
            handle: Mutex::new(None),
            starts: AtomicU64::new(0),
        }
    }

    pub fn role(&self) -> PanelRole {
        self.role
    }

    /// PID of the tracked process, if any.
    pub fn process_id(&self) -> Option<u32> {
        self.slot().as_ref().map(|handle| handle.id())
    }

    /// Number of successful spawns so far.
    pub fn starts(&self) -> u64 {
        self.starts.load(Ordering::Relaxed)
    }

    /// Restart the panel if it is enabled and not running.
    ///
    /// A panel whose command has been removed from the config is left
    /// alone, even if its process is still running.
    pub fn check(&self) {
        if self.config.command(self.role).is_none() {
            return;
        }

        let mut slot = self.slot();
        let death = match slot.as_mut() {
            None => Death::NotRunning,
            Some(handle) => match handle.try_wait() {
                Ok(None) => return,
                Ok(Some(status)) => Death::Exited(status),
                Err(e) => {
                    // The old process must be gone before a replacement starts.
                    if let Err(kill_err) = handle.kill() {
                        debug!(panel = %self.role, "kill after failed poll: {kill_err}");
                    }
                    Death::Unknown(e)
                }
            },
        };

        match death {
            Death::NotRunning => info!(panel = %self.role, "panel not running"),
            Death::Exited(status) => info!(panel = %self.role, %status, "panel process died"),
            Death::Unknown(e) => warn!(panel = %self.role, "panel process state unknown: {e}"),
        }

        self.start(&mut slot);
    }

    /// Kill the tracked process, if any. Errors are logged, never returned.
    pub fn stop(&self) {
        let mut slot = self.slot();
        if let Some(mut handle) = slot.take() {
            let pid = handle.id();
            match handle.kill() {
                Ok(()) => info!(panel = %self.role, pid, "panel stopped"),
                Err(e) => debug!(panel = %self.role, pid, "panel already gone: {e}"),
            }
        }
    }

    /// Spawn the configured command into `slot`. Caller holds the lock.
    fn start(&self, slot: &mut Slot) {
        *slot = None;

        let Some(command) = self.config.command(self.role) else {
            info!(panel = %self.role, "panel disabled, not restarting");
            return;
        };
        let cwd = self.config.working_directory(self.role);

        info!(panel = %self.role, cmd = %command, cwd = ?cwd, "starting panel");
        let spawned = CommandLine::parse(&command)
            .and_then(|line| line.spawn_with(self.spawner.as_ref(), cwd.as_deref().map(Path::new)));

        match spawned {
            Ok(handle) => {
                info!(panel = %self.role, pid = handle.id(), "panel started");
                self.starts.fetch_add(1, Ordering::Relaxed);
                *slot = Some(handle);
            }
            Err(e) => error!(panel = %self.role, cmd = %command, "failed to start panel: {e}"),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.handle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for PanelProcess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelProcess")
            .field("role", &self.role)
            .field("pid", &self.process_id())
            .field("starts", &self.starts())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::spawner::SystemSpawner;
    use crate::testing::{CountingSource, FakeSpawner};
    use paneld_config::schema::PanelEntry;
    use paneld_config::PaneldConfig;
    use std::sync::RwLock;
    use std::time::Duration;

    fn config_with(role: PanelRole, cmd: &str) -> Arc<RwLock<PaneldConfig>> {
        let mut config = PaneldConfig::default();
        for r in PanelRole::ALL {
            config.panels.entry_mut(r).cmd = Some(String::new());
        }
        *config.panels.entry_mut(role) = PanelEntry::with_cmd(cmd);
        Arc::new(RwLock::new(config))
    }

    #[test]
    fn disabled_panel_never_spawns() {
        let spawner = Arc::new(FakeSpawner::new());
        let source = Arc::new(CountingSource::default());
        let panel = PanelProcess::new(PanelRole::Bar, source.clone(), spawner.clone());

        for _ in 0..5 {
            panel.check();
        }

        assert_eq!(spawner.spawned(), 0);
        assert!(panel.process_id().is_none());
        assert_eq!(source.lookups(PanelRole::Bar), 5);
    }

    /// Enabled for the first lookup only, like a reload landing between
    /// `check()` and the restart it triggers.
    #[derive(Default)]
    struct DisabledAfterFirstLookup {
        lookups: AtomicU64,
    }

    impl PanelConfigSource for DisabledAfterFirstLookup {
        fn command(&self, _role: PanelRole) -> Option<String> {
            (self.lookups.fetch_add(1, Ordering::SeqCst) == 0).then(|| "fake-bar".to_string())
        }

        fn working_directory(&self, _role: PanelRole) -> Option<String> {
            None
        }
    }

    #[test]
    fn panel_disabled_before_restart_is_not_started() {
        let spawner = Arc::new(FakeSpawner::new());
        let source = Arc::new(DisabledAfterFirstLookup::default());
        let panel = PanelProcess::new(PanelRole::Bar, source.clone(), spawner.clone());

        panel.check();

        assert_eq!(source.lookups.load(Ordering::SeqCst), 2);
        assert_eq!(spawner.spawned(), 0);
        assert_eq!(panel.starts(), 0);
        assert!(panel.process_id().is_none());
    }

    #[test]
    fn first_check_starts_panel() {
        let spawner = Arc::new(FakeSpawner::new());
        let panel = PanelProcess::new(
            PanelRole::Lock,
            config_with(PanelRole::Lock, "locker --now"),
            spawner.clone(),
        );

        assert!(panel.process_id().is_none());
        panel.check();

        assert_eq!(panel.process_id(), Some(1000));
        assert_eq!(spawner.live("locker"), 1);
        assert_eq!(panel.starts(), 1);
    }

    #[test]
    fn healthy_panel_is_left_alone() {
        let spawner = Arc::new(FakeSpawner::new());
        let panel = PanelProcess::new(
            PanelRole::Lock,
            config_with(PanelRole::Lock, "locker"),
            spawner.clone(),
        );

        panel.check();
        let pid = panel.process_id();
        panel.check();
        panel.check();

        assert_eq!(panel.process_id(), pid);
        assert_eq!(spawner.spawned(), 1);
    }

    #[test]
    fn exited_panel_is_restarted_with_new_pid() {
        let spawner = Arc::new(FakeSpawner::with_lifetime(0));
        let panel = PanelProcess::new(
            PanelRole::Launcher,
            config_with(PanelRole::Launcher, "launcher"),
            spawner.clone(),
        );

        panel.check();
        let first = panel.process_id().unwrap();
        panel.check();
        let second = panel.process_id().unwrap();

        assert_ne!(first, second);
        assert_eq!(spawner.spawned(), 2);
        assert_eq!(spawner.max_live(), 1);
    }

    #[test]
    fn spawn_failure_leaves_panel_empty_and_retries() {
        let spawner = Arc::new(FakeSpawner::new());
        spawner.set_failing(true);
        let panel = PanelProcess::new(
            PanelRole::TopBar,
            config_with(PanelRole::TopBar, "waybar"),
            spawner.clone(),
        );

        panel.check();
        assert!(panel.process_id().is_none());
        assert_eq!(panel.starts(), 0);

        spawner.set_failing(false);
        panel.check();
        assert!(panel.process_id().is_some());
        assert_eq!(panel.starts(), 1);
    }

    struct BlankCommand;

    impl PanelConfigSource for BlankCommand {
        fn command(&self, _role: PanelRole) -> Option<String> {
            Some("  ".into())
        }

        fn working_directory(&self, _role: PanelRole) -> Option<String> {
            None
        }
    }

    #[test]
    fn blank_command_counts_as_spawn_failure() {
        let spawner = Arc::new(FakeSpawner::new());
        let panel = PanelProcess::new(PanelRole::Bar, Arc::new(BlankCommand), spawner.clone());

        panel.check();
        assert!(panel.process_id().is_none());
        assert_eq!(spawner.spawned(), 0);
    }

    #[test]
    fn disabling_command_does_not_kill_running_panel() {
        let spawner = Arc::new(FakeSpawner::new());
        let config = config_with(PanelRole::BottomBar, "bottom-bar");
        let panel = PanelProcess::new(PanelRole::BottomBar, config.clone(), spawner.clone());

        panel.check();
        let pid = panel.process_id();
        assert!(pid.is_some());

        config.write().unwrap().panels.bottom_bar.cmd = Some(String::new());
        panel.check();

        assert_eq!(panel.process_id(), pid);
        assert_eq!(spawner.live("bottom-bar"), 1);
    }

    #[test]
    fn command_change_applies_on_next_restart() {
        let spawner = Arc::new(FakeSpawner::with_lifetime(0));
        let config = config_with(PanelRole::Bar, "old-bar");
        let panel = PanelProcess::new(PanelRole::Bar, config.clone(), spawner.clone());

        panel.check();
        config.write().unwrap().panels.bar.cmd = Some("new-bar".into());
        panel.check();

        assert_eq!(spawner.live("old-bar"), 0);
        assert_eq!(spawner.live("new-bar"), 1);
    }

    #[test]
    fn stop_kills_and_clears() {
        let spawner = Arc::new(FakeSpawner::new());
        let panel = PanelProcess::new(
            PanelRole::Lock,
            config_with(PanelRole::Lock, "locker"),
            spawner.clone(),
        );

        panel.check();
        panel.stop();

        assert!(panel.process_id().is_none());
        assert_eq!(spawner.total_live(), 0);

        // Stopping twice is harmless.
        panel.stop();
        assert!(panel.process_id().is_none());
    }

    #[test]
    fn real_process_restart_gets_new_pid() {
        let panel = PanelProcess::new(
            PanelRole::Bar,
            config_with(PanelRole::Bar, "sleep 0.2"),
            Arc::new(SystemSpawner),
        );

        panel.check();
        let first = panel.process_id().expect("sleep should spawn");

        std::thread::sleep(Duration::from_millis(600));
        panel.check();
        let second = panel.process_id().expect("sleep should respawn");

        assert_ne!(first, second);
        panel.stop();
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn real_process_is_gone_after_stop() {
        let panel = PanelProcess::new(
            PanelRole::TopBar,
            config_with(PanelRole::TopBar, "sleep 30"),
            Arc::new(SystemSpawner),
        );

        panel.check();
        let pid = panel.process_id().expect("sleep should spawn");
        let proc_path = format!("/proc/{pid}");
        assert!(Path::new(&proc_path).exists());

        panel.stop();
        assert!(panel.process_id().is_none());
        assert!(!Path::new(&proc_path).exists());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn working_directory_is_passed_to_process() {
        let dir = std::env::temp_dir();
        let mut config = PaneldConfig::default();
        config.panels.lock = PanelEntry {
            cmd: Some("sleep 30".into()),
            cwd: Some(dir.display().to_string()),
        };
        let panel = PanelProcess::new(PanelRole::Lock, Arc::new(config), Arc::new(SystemSpawner));

        panel.check();
        let pid = panel.process_id().expect("sleep should spawn");
        let cwd = std::fs::read_link(format!("/proc/{pid}/cwd")).unwrap();
        panel.stop();

        assert_eq!(cwd, dir.canonicalize().unwrap());
    }
}
