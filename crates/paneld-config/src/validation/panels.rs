//! Validation for panel entries.

use crate::schema::PaneldConfig;
use paneld_common::PanelRole;

fn blank(cwd: Option<&str>) -> bool {
    cwd.is_some_and(|cwd| cwd.trim().is_empty())
}

/// A configured `cwd` must not be blank.
pub(crate) fn validate_panels(errors: &mut Vec<String>, config: &PaneldConfig) {
    for role in PanelRole::ALL {
        if blank(config.panels.entry(role).cwd.as_deref()) {
            errors.push(format!("panels.{role}.cwd must not be empty"));
        }
    }
}

/// Clear blank `cwd` values; the panel then inherits the daemon's directory.
pub(crate) fn repair_panels(repaired: &mut Vec<String>, config: &mut PaneldConfig) {
    for role in PanelRole::ALL {
        let entry = config.panels.entry_mut(role);
        if blank(entry.cwd.as_deref()) {
            entry.cwd = None;
            repaired.push(format!(
                "panels.{role}.cwd must not be empty, inheriting the working directory"
            ));
        }
    }
}
