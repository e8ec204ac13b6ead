//! Shared configuration types for the spell timer overlay
//!
//! This crate contains the serializable configuration types that are shared
//! between the timer model (spelltimer-core) and the overlay panel
//! (spelltimer-overlay).

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Color Type
// ─────────────────────────────────────────────────────────────────────────────

/// RGBA color as [r, g, b, a] bytes
pub type Color = [u8; 4];

/// Default colors for spell timer bars
pub mod overlay_colors {
    use super::Color;

    pub const WHITE: Color = [255, 255, 255, 255];
    pub const BLACK: Color = [0, 0, 0, 255];
    pub const BAR: Color = [100, 180, 220, 255];
    pub const BAR_OUTLINE: Color = [20, 40, 60, 255];
    pub const FONT_OUTLINE: Color = [10, 10, 10, 255];
    pub const PANEL_BG: Color = [0, 0, 0, 255];
}

// ─────────────────────────────────────────────────────────────────────────────
// Serde Default Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn default_true() -> bool {
    true
}
fn default_hide_after_secs() -> f64 {
    1.0
}

// ─────────────────────────────────────────────────────────────────────────────
// Overlay Options
// ─────────────────────────────────────────────────────────────────────────────

/// Global display options read by every spell timer panel on each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayOptions {
    /// Seconds after expiry before a finished timer is hidden (0 = never hide by age)
    #[serde(default = "default_hide_after_secs")]
    pub hide_after_secs: f64,
    /// Sort timers by when they come back up
    #[serde(default = "default_true")]
    pub auto_sort_enabled: bool,
    /// Sort the latest-due timer first
    #[serde(default)]
    pub auto_sort_reverse: bool,
}

impl OverlayOptions {
    /// Hide threshold with negative or non-finite values treated as disabled
    pub fn hide_threshold(&self) -> Option<f64> {
        if self.hide_after_secs.is_finite() && self.hide_after_secs > 0.0 {
            Some(self.hide_after_secs)
        } else {
            None
        }
    }
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            hide_after_secs: default_hide_after_secs(),
            auto_sort_enabled: true,
            auto_sort_reverse: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Panel Position
// ─────────────────────────────────────────────────────────────────────────────

/// Screen position of a panel's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PanelPosition {
    pub left: f64,
    pub top: f64,
}

/// Persisted settings for one named panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSettings {
    pub panel_name: String,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub top: f64,
}

impl PanelSettings {
    pub fn new(panel_name: impl Into<String>, left: f64, top: f64) -> Self {
        Self {
            panel_name: panel_name.into(),
            left,
            top,
        }
    }

    pub fn position(&self) -> PanelPosition {
        PanelPosition {
            left: self.left,
            top: self.top,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// App Config
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration
///
/// Note: Persistence methods (load/save) are provided by spelltimer-core via
/// the `AppConfigExt` trait.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub options: OverlayOptions,
    #[serde(default)]
    pub panels: Vec<PanelSettings>,
}

impl AppConfig {
    /// Settings for a panel by name (first match wins)
    pub fn panel(&self, panel_name: &str) -> Option<&PanelSettings> {
        self.panels.iter().find(|p| p.panel_name == panel_name)
    }

    /// Insert or update the stored position for a panel
    pub fn set_panel_position(&mut self, panel_name: &str, position: PanelPosition) {
        if let Some(panel) = self.panels.iter_mut().find(|p| p.panel_name == panel_name) {
            panel.left = position.left;
            panel.top = position.top;
            return;
        }
        self.panels
            .push(PanelSettings::new(panel_name, position.left, position.top));
    }
}
