//! Platform abstraction for the focus-avoidance window style
//!
//! The panel asks the platform once, when its native window handle first
//! exists, to mark the window as non-activating so clicking or showing it
//! never pulls focus away from the game. Platforms without that concept get
//! a no-op backend.

use thiserror::Error;

#[cfg(target_os = "windows")]
pub mod windows;

/// Opaque native window handle (HWND on Windows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

impl WindowHandle {
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

/// Errors that can occur in platform operations
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("window handle is null")]
    NullHandle,

    #[error("failed to read extended window style (code {code})")]
    StyleRead { code: u32 },

    #[error("failed to write extended window style (code {code})")]
    StyleWrite { code: u32 },
}

/// Trait that all focus-avoidance backends implement
pub trait FocusAvoidance {
    /// Mark the window as never taking activation on click or show
    fn set_non_activating(&self, handle: WindowHandle) -> Result<(), PlatformError>;
}

/// Backend for platforms where overlays don't steal focus to begin with
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFocusAvoidance;

impl FocusAvoidance for NoopFocusAvoidance {
    fn set_non_activating(&self, _handle: WindowHandle) -> Result<(), PlatformError> {
        Ok(())
    }
}

/// Re-export the appropriate backend for the current target
#[cfg(target_os = "windows")]
pub use self::windows::Win32FocusAvoidance as NativeFocusAvoidance;

#[cfg(not(target_os = "windows"))]
pub use self::NoopFocusAvoidance as NativeFocusAvoidance;

/// Backend for the current platform
pub fn native_focus_avoidance() -> NativeFocusAvoidance {
    NativeFocusAvoidance::default()
}
