//! Fakes shared by the panel and supervisor tests.

use crate::source::PanelConfigSource;
use crate::spawner::{ProcessHandle, ProcessSpawner};
use paneld_common::{PanelRole, ProcessError};
use std::collections::HashMap;
use std::os::unix::process::ExitStatusExt;
use std::path::Path;
use std::process::ExitStatus;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Config source that disables every panel and counts lookups per role.
#[derive(Default)]
pub(crate) struct CountingSource {
    lookups: Mutex<HashMap<PanelRole, usize>>,
}

impl CountingSource {
    pub(crate) fn lookups(&self, role: PanelRole) -> usize {
        self.lookups.lock().unwrap().get(&role).copied().unwrap_or(0)
    }
}

impl PanelConfigSource for CountingSource {
    fn command(&self, role: PanelRole) -> Option<String> {
        *self.lookups.lock().unwrap().entry(role).or_default() += 1;
        None
    }

    fn working_directory(&self, _role: PanelRole) -> Option<String> {
        None
    }
}

/// In-memory process table standing in for the OS.
///
/// Each spawned program name counts its live instances; `max_live`
/// records the worst overlap ever observed for any program.
#[derive(Default)]
pub(crate) struct FakeSpawner {
    next_pid: AtomicU32,
    spawned: AtomicUsize,
    live: Arc<Mutex<HashMap<String, usize>>>,
    max_live: Arc<AtomicUsize>,
    /// Polls a fresh process survives before exiting; `None` lives forever.
    lifetime: Option<u32>,
    fail: AtomicBool,
}

impl FakeSpawner {
    pub(crate) fn new() -> Self {
        Self {
            next_pid: AtomicU32::new(1000),
            ..Self::default()
        }
    }

    pub(crate) fn with_lifetime(polls: u32) -> Self {
        Self {
            lifetime: Some(polls),
            ..Self::new()
        }
    }

    pub(crate) fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn spawned(&self) -> usize {
        self.spawned.load(Ordering::SeqCst)
    }

    pub(crate) fn live(&self, program: &str) -> usize {
        self.live.lock().unwrap().get(program).copied().unwrap_or(0)
    }

    pub(crate) fn total_live(&self) -> usize {
        self.live.lock().unwrap().values().sum()
    }

    pub(crate) fn max_live(&self) -> usize {
        self.max_live.load(Ordering::SeqCst)
    }
}

impl ProcessSpawner for FakeSpawner {
    fn spawn(
        &self,
        program: &str,
        _args: &[String],
        _cwd: Option<&Path>,
    ) -> Result<Box<dyn ProcessHandle>, ProcessError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ProcessError::SpawnFailed {
                program: program.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "fake"),
            });
        }

        let live_now = {
            let mut live = self.live.lock().unwrap();
            let count = live.entry(program.to_string()).or_default();
            *count += 1;
            *count
        };
        self.max_live.fetch_max(live_now, Ordering::SeqCst);
        self.spawned.fetch_add(1, Ordering::SeqCst);

        Ok(Box::new(FakeProcess {
            pid: self.next_pid.fetch_add(1, Ordering::SeqCst),
            program: program.to_string(),
            polls_left: self.lifetime,
            exited: None,
            live: Arc::clone(&self.live),
        }))
    }
}

pub(crate) struct FakeProcess {
    pid: u32,
    program: String,
    polls_left: Option<u32>,
    exited: Option<ExitStatus>,
    live: Arc<Mutex<HashMap<String, usize>>>,
}

impl FakeProcess {
    fn exit(&mut self, status: ExitStatus) {
        if self.exited.is_none() {
            self.exited = Some(status);
            if let Some(count) = self.live.lock().unwrap().get_mut(&self.program) {
                *count -= 1;
            }
        }
    }
}

impl ProcessHandle for FakeProcess {
    fn id(&self) -> u32 {
        self.pid
    }

    fn try_wait(&mut self) -> Result<Option<ExitStatus>, ProcessError> {
        if self.exited.is_none() {
            match self.polls_left.as_mut() {
                Some(0) => self.exit(ExitStatus::from_raw(0)),
                Some(n) => *n -= 1,
                None => {}
            }
        }
        Ok(self.exited)
    }

    fn kill(&mut self) -> Result<(), ProcessError> {
        // 9 = SIGKILL in the raw wait status encoding
        self.exit(ExitStatus::from_raw(9));
        Ok(())
    }
}
