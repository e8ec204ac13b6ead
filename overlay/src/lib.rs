//! Spell Timer Overlay Library
//!
//! Floating countdown-bar panel for spell and ability timers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                      panel                          │
//! │                 SpellTimerPanel                     │
//! │     (select, sort, row reuse, layout, drag state)   │
//! ├─────────────────────────────────────────────────────┤
//! │          pool / layout          │      widgets      │
//! │      RowPool, LayoutGrid        │   SpellTimerRow   │
//! ├─────────────────────────────────────────────────────┤
//! │                 host / platform                     │
//! │     PanelHost (window), FocusAvoidance (style)      │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod host;
pub mod input;
pub mod layout;
pub mod logging;
pub mod panel;
pub mod platform;
pub mod pool;
pub mod utils;
pub mod widgets;

// Re-export commonly used types
pub use host::{BackgroundBrush, HeadlessHost, PanelHost};
pub use input::{ButtonState, InputTarget, MouseButton, PanelInput, PointerState};
pub use layout::LayoutGrid;
pub use panel::{SpellTimerPanel, select_timers};
pub use platform::{
    FocusAvoidance, NativeFocusAvoidance, NoopFocusAvoidance, PlatformError, WindowHandle,
    native_focus_avoidance,
};
pub use pool::RowPool;
pub use widgets::{SpellTimerRow, Visibility};

// Re-export tiny_skia Color for external use
pub use tiny_skia::Color;
