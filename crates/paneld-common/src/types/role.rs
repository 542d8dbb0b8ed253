use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of panels a desktop shell supervises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelRole {
    Lock,
    Launcher,
    TopBar,
    BottomBar,
    Bar,
}

impl PanelRole {
    /// Every role, in supervision order.
    pub const ALL: [PanelRole; 5] = [
        PanelRole::Lock,
        PanelRole::Launcher,
        PanelRole::TopBar,
        PanelRole::BottomBar,
        PanelRole::Bar,
    ];

    /// Name used in config keys and log output.
    pub fn as_str(&self) -> &'static str {
        match self {
            PanelRole::Lock => "lock",
            PanelRole::Launcher => "launcher",
            PanelRole::TopBar => "top_bar",
            PanelRole::BottomBar => "bottom_bar",
            PanelRole::Bar => "bar",
        }
    }
}

impl fmt::Display for PanelRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown panel role: {0}")]
pub struct UnknownPanelRole(pub String);

impl FromStr for PanelRole {
    type Err = UnknownPanelRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PanelRole::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownPanelRole(s.to_string()))
    }
}
