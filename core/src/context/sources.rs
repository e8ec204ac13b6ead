//! Read-only collaborators the overlay consults
//!
//! The overlay never reaches for global settings. Whoever hosts the panel
//! hands it an options provider per tick and a settings source at load.

use super::{AppConfig, OverlayOptions, PanelPosition};

/// Supplies the global display options, read fresh on every tick
pub trait OptionsProvider {
    fn overlay_options(&self) -> OverlayOptions;
}

/// Looks up the persisted position of a panel by name
pub trait PanelSettingsSource {
    fn panel_position(&self, panel_name: &str) -> Option<PanelPosition>;
}

impl OptionsProvider for OverlayOptions {
    fn overlay_options(&self) -> OverlayOptions {
        *self
    }
}

impl OptionsProvider for AppConfig {
    fn overlay_options(&self) -> OverlayOptions {
        self.options
    }
}

impl PanelSettingsSource for AppConfig {
    fn panel_position(&self, panel_name: &str) -> Option<PanelPosition> {
        self.panel(panel_name).map(|p| p.position())
    }
}

impl<T: OptionsProvider + ?Sized> OptionsProvider for &T {
    fn overlay_options(&self) -> OverlayOptions {
        (**self).overlay_options()
    }
}

impl<T: PanelSettingsSource + ?Sized> PanelSettingsSource for &T {
    fn panel_position(&self, panel_name: &str) -> Option<PanelPosition> {
        (**self).panel_position(panel_name)
    }
}
