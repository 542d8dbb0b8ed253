//! Configuration schema types for paneld.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with defaults, and panel commands fall back
//! to their per-role default when left unset.

mod panels;
mod supervisor;
mod system;

pub use panels::*;
pub use supervisor::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Root configuration for paneld.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PaneldConfig {
    pub panels: PanelsConfig,
    pub supervisor: SupervisorConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
