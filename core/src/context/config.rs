//! Application configuration
//!
//! This module re-exports shared types from spelltimer-types and provides
//! persistence for AppConfig.

use std::path::{Path, PathBuf};

pub use spelltimer_types::{AppConfig, OverlayOptions, PanelPosition, PanelSettings};

use super::ConfigError;

const APP_NAME: &str = "spelltimer";
const CONFIG_NAME: &str = "config";

// ─────────────────────────────────────────────────────────────────────────────
// AppConfig Extensions
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for AppConfig persistence
pub trait AppConfigExt: Sized {
    /// Load from the platform config dir, falling back to defaults
    fn load() -> Self;
    fn try_load() -> Result<Self, ConfigError>;
    fn load_from(path: &Path) -> Result<Self, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    fn save_to(&self, path: &Path) -> Result<(), ConfigError>;
    fn config_path() -> Result<PathBuf, ConfigError>;
}

impl AppConfigExt for AppConfig {
    fn load() -> Self {
        match Self::try_load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "Falling back to default configuration");
                Self::default()
            }
        }
    }

    fn try_load() -> Result<Self, ConfigError> {
        confy::load(APP_NAME, CONFIG_NAME).map_err(ConfigError::Load)
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        confy::load_path(path).map_err(ConfigError::Load)
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        confy::store_path(path, self).map_err(ConfigError::Save)
    }

    fn config_path() -> Result<PathBuf, ConfigError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).map_err(ConfigError::Path)
    }
}
