//! Validation for supervisor loop timing.

use crate::schema::{PaneldConfig, SupervisorConfig};

use super::helpers::validate_range;

pub(crate) fn validate_supervisor(errors: &mut Vec<String>, config: &PaneldConfig) {
    validate_range(
        errors,
        "supervisor.tick_interval_ms",
        config.supervisor.tick_interval_ms,
        10,
        60_000,
    );
    validate_range(
        errors,
        "supervisor.check_period",
        config.supervisor.check_period,
        1,
        100_000,
    );
}

/// An invalid `[supervisor]` section falls back to defaults as a whole.
pub(crate) fn repair_supervisor(repaired: &mut Vec<String>, config: &mut PaneldConfig) {
    let mut errors = Vec::new();
    validate_supervisor(&mut errors, config);
    if errors.is_empty() {
        return;
    }

    config.supervisor = SupervisorConfig::default();
    repaired.extend(
        errors
            .into_iter()
            .map(|e| format!("{e}, using the default [supervisor] section")),
    );
}
