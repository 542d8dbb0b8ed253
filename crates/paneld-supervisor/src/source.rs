//! Where panel commands come from.

use paneld_common::PanelRole;
use paneld_config::PaneldConfig;
use std::sync::{PoisonError, RwLock};
use tokio::sync::watch;

/// Per-role command lookup, resolved fresh on every call.
///
/// `None` from [`command`](Self::command) means the panel is disabled.
pub trait PanelConfigSource: Send + Sync {
    fn command(&self, role: PanelRole) -> Option<String>;

    fn working_directory(&self, role: PanelRole) -> Option<String>;
}

/// A fixed config snapshot.
impl PanelConfigSource for PaneldConfig {
    fn command(&self, role: PanelRole) -> Option<String> {
        self.panels.command(role)
    }

    fn working_directory(&self, role: PanelRole) -> Option<String> {
        self.panels.working_directory(role)
    }
}

/// A config that callers update in place.
impl PanelConfigSource for RwLock<PaneldConfig> {
    fn command(&self, role: PanelRole) -> Option<String> {
        self.read()
            .unwrap_or_else(PoisonError::into_inner)
            .panels
            .command(role)
    }

    fn working_directory(&self, role: PanelRole) -> Option<String> {
        self.read()
            .unwrap_or_else(PoisonError::into_inner)
            .panels
            .working_directory(role)
    }
}

/// The live config published by [`paneld_config::ReloadManager`].
impl PanelConfigSource for watch::Receiver<PaneldConfig> {
    fn command(&self, role: PanelRole) -> Option<String> {
        self.borrow().panels.command(role)
    }

    fn working_directory(&self, role: PanelRole) -> Option<String> {
        self.borrow().panels.working_directory(role)
    }
}
