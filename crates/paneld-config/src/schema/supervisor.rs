//! Supervision loop timing.

use serde::{Deserialize, Serialize};

/// Poll loop timing for the panel supervisor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SupervisorConfig {
    /// Loop tick in milliseconds (valid range: 10-60000).
    pub tick_interval_ms: u32,
    /// Ticks between liveness sweeps (valid range: 1-100000).
    pub check_period: u32,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 500,
            check_period: 50,
        }
    }
}
