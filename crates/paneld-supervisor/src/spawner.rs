//! Process creation boundary.
//!
//! Everything the supervisor does to an OS process goes through
//! [`ProcessSpawner`] and [`ProcessHandle`], so spawn and kill failures
//! surface as [`ProcessError`] values the caller can log and drop.

use paneld_common::ProcessError;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};

/// A spawned child process.
pub trait ProcessHandle: Send {
    /// OS process id.
    fn id(&self) -> u32;

    /// Non-blocking exit poll. `Ok(None)` means still running.
    fn try_wait(&mut self) -> Result<Option<ExitStatus>, ProcessError>;

    /// Forcefully terminate the process and reap it.
    fn kill(&mut self) -> Result<(), ProcessError>;
}

/// Creates child processes.
pub trait ProcessSpawner: Send + Sync {
    fn spawn(
        &self,
        program: &str,
        args: &[String],
        cwd: Option<&Path>,
    ) -> Result<Box<dyn ProcessHandle>, ProcessError>;
}

/// A command string split into executable and arguments.
///
/// Splitting is on whitespace only: quotes and escapes are not
/// interpreted, so arguments cannot contain spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn parse(command: &str) -> Result<Self, ProcessError> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(ProcessError::EmptyCommand)?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    pub fn spawn_with(
        &self,
        spawner: &dyn ProcessSpawner,
        cwd: Option<&Path>,
    ) -> Result<Box<dyn ProcessHandle>, ProcessError> {
        spawner.spawn(&self.program, &self.args, cwd)
    }
}

// =============================================================================
// SYSTEM SPAWNER
// =============================================================================

/// Spawns real OS processes with `std::process::Command`.
///
/// Children inherit stdout and stderr; stdin is closed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSpawner;

impl ProcessSpawner for SystemSpawner {
    fn spawn(
        &self,
        program: &str,
        args: &[String],
        cwd: Option<&Path>,
    ) -> Result<Box<dyn ProcessHandle>, ProcessError> {
        let mut command = Command::new(program);
        command.args(args).stdin(Stdio::null());
        if let Some(cwd) = cwd {
            command.current_dir(cwd);
        }

        let child = command.spawn().map_err(|source| ProcessError::SpawnFailed {
            program: program.to_string(),
            source,
        })?;

        Ok(Box::new(SystemProcess { child }))
    }
}

struct SystemProcess {
    child: Child,
}

impl ProcessHandle for SystemProcess {
    fn id(&self) -> u32 {
        self.child.id()
    }

    fn try_wait(&mut self) -> Result<Option<ExitStatus>, ProcessError> {
        self.child.try_wait().map_err(ProcessError::PollFailed)
    }

    fn kill(&mut self) -> Result<(), ProcessError> {
        self.child.kill().map_err(ProcessError::KillFailed)?;
        // SIGKILL cannot be caught, so this returns as soon as the kernel reaps it.
        self.child.wait().map_err(ProcessError::KillFailed)?;
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
