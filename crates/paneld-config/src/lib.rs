//! paneld configuration system.
//!
//! Provides TOML-based configuration with live reload and validation.
//! All config sections use defaults so partial configs work out of the
//! box, and each panel command falls back to its role default when unset.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use paneld_config::{load_config, config_to_json};
//! use std::path::Path;
//!
//! let path = Path::new("config.toml");
//! let loaded = load_config(path).expect("failed to load config");
//! loaded.log(path);
//! println!("{}", config_to_json(&loaded.config));
//! ```

pub mod reload;
pub mod schema;
pub mod toml_loader;
pub mod validation;
pub mod watcher;

pub use reload::ReloadManager;
pub use schema::PaneldConfig;
pub use watcher::ConfigWatcher;

use paneld_common::ConfigError;
use std::path::Path;
use tracing::{info, warn};

/// A config read from disk, plus a note for every invalid value that was
/// reset to its default while loading.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: PaneldConfig,
    pub repaired: Vec<String>,
}

impl LoadedConfig {
    /// Log the load and every repair. Loading itself never logs, so this
    /// can run after the subscriber is set up from the loaded level.
    pub fn log(&self, path: &Path) {
        info!("loaded config from {}", path.display());
        for problem in &self.repaired {
            warn!("invalid config value: {problem}");
        }
    }
}

/// Load config from `path`, resetting invalid values section by section.
///
/// Startup and live reload both go through here, so a given file always
/// resolves to the same config. Panel commands are kept as written.
pub fn load_config(path: &Path) -> Result<LoadedConfig, ConfigError> {
    let mut config = toml_loader::load_from_path(path)?;
    let repaired = validation::repair(&mut config);
    Ok(LoadedConfig { config, repaired })
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &PaneldConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
