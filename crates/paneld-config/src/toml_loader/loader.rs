//! Core TOML config loading.

use crate::schema::PaneldConfig;
use paneld_common::ConfigError;
use std::path::Path;

/// Load config from a specific TOML file path.
///
/// Deserializes the file using serde defaults for any missing fields.
/// Values are returned exactly as parsed; nothing is validated or logged
/// here.
pub fn load_from_path(path: &Path) -> Result<PaneldConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    toml::from_str(&content).map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))
}
