//! Panel process supervision.
//!
//! [`PanelSupervisor`] owns one [`PanelProcess`] per [`PanelRole`] and
//! drives a polling loop on a background thread: every `check_period`
//! ticks each panel is checked and, if its process has exited, restarted
//! immediately with the command currently in the config.
//!
//! Commands and working directories come from a [`PanelConfigSource`]
//! resolved on every check, so live config reloads take effect without
//! restarting the supervisor. Processes are created through a
//! [`ProcessSpawner`]; [`SystemSpawner`] is the real implementation.

pub mod panel;
pub mod source;
pub mod spawner;
pub mod supervisor;

#[cfg(all(test, unix))]
pub(crate) mod testing;

pub use panel::PanelProcess;
pub use paneld_common::PanelRole;
pub use source::PanelConfigSource;
pub use spawner::{CommandLine, ProcessHandle, ProcessSpawner, SystemSpawner};
pub use supervisor::{PanelSnapshot, PanelSupervisor, SupervisorSettings};
