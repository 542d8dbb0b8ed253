//! Full configuration validation.
//!
//! Each section has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`, or repairs them in
//! place section by section.

mod helpers;
mod panels;
mod supervisor;


use crate::schema::PaneldConfig;
use paneld_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &PaneldConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    panels::validate_panels(&mut errors, config);
    supervisor::validate_supervisor(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

/// Reset every invalid part of `config` to its default, one section at a
/// time, and describe what was reset.
///
/// Panel commands are never touched, so a bad timing value cannot change
/// which panels run.
pub fn repair(config: &mut PaneldConfig) -> Vec<String> {
    let mut repaired = Vec::new();
    if validate(config).is_ok() {
        return repaired;
    }

    panels::repair_panels(&mut repaired, config);
    supervisor::repair_supervisor(&mut repaired, config);

    repaired
}
