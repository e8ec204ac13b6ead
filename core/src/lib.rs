pub mod context;
pub mod timers;

// Re-exports for convenience
pub use context::{
    AppConfig, AppConfigExt, ConfigError, OptionsProvider, OverlayOptions, PanelPosition,
    PanelSettings, PanelSettingsSource,
};
pub use spelltimer_types::{Color, overlay_colors};
pub use timers::{FontInfo, SpellTimer, TimerStyle};
