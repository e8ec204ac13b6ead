mod config;
mod error;
mod sources;

pub use config::{AppConfig, AppConfigExt, OverlayOptions, PanelPosition, PanelSettings};
pub use error::ConfigError;
pub use sources::{OptionsProvider, PanelSettingsSource};
