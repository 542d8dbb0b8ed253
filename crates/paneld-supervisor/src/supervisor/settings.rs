use paneld_config::schema::SupervisorConfig;
use std::time::Duration;

/// Poll loop timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupervisorSettings {
    pub tick_interval: Duration,
    /// Ticks between liveness sweeps. Never zero.
    pub check_period: u32,
}

impl SupervisorSettings {
    pub fn new(tick_interval: Duration, check_period: u32) -> Self {
        Self {
            tick_interval,
            check_period: check_period.max(1),
        }
    }

    /// Time between two liveness sweeps.
    pub fn sweep_interval(&self) -> Duration {
        self.tick_interval * self.check_period
    }
}

impl Default for SupervisorSettings {
    fn default() -> Self {
        SupervisorSettings::from(&SupervisorConfig::default())
    }
}

impl From<&SupervisorConfig> for SupervisorSettings {
    fn from(config: &SupervisorConfig) -> Self {
        Self::new(
            Duration::from_millis(u64::from(config.tick_interval_ms)),
            config.check_period,
        )
    }
}
