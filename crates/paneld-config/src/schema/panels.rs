//! Per-panel command configuration.

use paneld_common::PanelRole;
use serde::{Deserialize, Serialize};

/// Terminal used by the built-in lock and launcher commands.
pub const DEFAULT_TERMINAL: &str = "alacritty";

/// Panel binary launched inside [`DEFAULT_TERMINAL`].
pub const DEFAULT_PANEL_BINARY: &str = "paneld-panel";

/// Command and working directory for one panel.
///
/// `cmd` left unset falls back to the role's default command. An empty
/// string disables the panel explicitly.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PanelEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
}

impl PanelEntry {
    pub fn with_cmd(cmd: impl Into<String>) -> Self {
        Self {
            cmd: Some(cmd.into()),
            cwd: None,
        }
    }
}

/// Panel configuration, one entry per [`PanelRole`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PanelsConfig {
    pub lock: PanelEntry,
    pub launcher: PanelEntry,
    pub top_bar: PanelEntry,
    pub bottom_bar: PanelEntry,
    pub bar: PanelEntry,
}

impl PanelsConfig {
    pub fn entry(&self, role: PanelRole) -> &PanelEntry {
        match role {
            PanelRole::Lock => &self.lock,
            PanelRole::Launcher => &self.launcher,
            PanelRole::TopBar => &self.top_bar,
            PanelRole::BottomBar => &self.bottom_bar,
            PanelRole::Bar => &self.bar,
        }
    }

    pub fn entry_mut(&mut self, role: PanelRole) -> &mut PanelEntry {
        match role {
            PanelRole::Lock => &mut self.lock,
            PanelRole::Launcher => &mut self.launcher,
            PanelRole::TopBar => &mut self.top_bar,
            PanelRole::BottomBar => &mut self.bottom_bar,
            PanelRole::Bar => &mut self.bar,
        }
    }

    /// Resolved command for `role`, or `None` if the panel is disabled.
    pub fn command(&self, role: PanelRole) -> Option<String> {
        match &self.entry(role).cmd {
            Some(cmd) if cmd.trim().is_empty() => None,
            Some(cmd) => Some(cmd.clone()),
            None => default_command(role),
        }
    }

    pub fn working_directory(&self, role: PanelRole) -> Option<String> {
        self.entry(role).cwd.clone()
    }
}

/// Built-in command for a role. Only the lock screen and launcher have one.
pub fn default_command(role: PanelRole) -> Option<String> {
    match role {
        PanelRole::Lock | PanelRole::Launcher => Some(format!(
            "{DEFAULT_TERMINAL} -e {DEFAULT_PANEL_BINARY} {role}"
        )),
        PanelRole::TopBar | PanelRole::BottomBar | PanelRole::Bar => None,
    }
}
