//! Windows focus avoidance
//!
//! ORs `WS_EX_NOACTIVATE` into the window's extended style.

use windows::Win32::Foundation::{ERROR_SUCCESS, GetLastError, HWND, SetLastError};
use windows::Win32::UI::WindowsAndMessaging::{
    GWL_EXSTYLE, GetWindowLongPtrW, SetWindowLongPtrW, WS_EX_NOACTIVATE,
};

use super::{FocusAvoidance, PlatformError, WindowHandle};

#[derive(Debug, Clone, Copy, Default)]
pub struct Win32FocusAvoidance;

impl FocusAvoidance for Win32FocusAvoidance {
    fn set_non_activating(&self, handle: WindowHandle) -> Result<(), PlatformError> {
        if handle.is_null() {
            return Err(PlatformError::NullHandle);
        }
        let hwnd = HWND(handle.0 as *mut core::ffi::c_void);

        // Both calls return 0 on failure, but 0 is also a valid previous
        // style, so the last error has to be cleared and checked.
        unsafe {
            SetLastError(ERROR_SUCCESS);
            let style = GetWindowLongPtrW(hwnd, GWL_EXSTYLE);
            if style == 0 {
                let err = GetLastError();
                if err != ERROR_SUCCESS {
                    return Err(PlatformError::StyleRead { code: err.0 });
                }
            }

            let updated = style | WS_EX_NOACTIVATE.0 as isize;
            SetLastError(ERROR_SUCCESS);
            if SetWindowLongPtrW(hwnd, GWL_EXSTYLE, updated) == 0 {
                let err = GetLastError();
                if err != ERROR_SUCCESS {
                    return Err(PlatformError::StyleWrite { code: err.0 });
                }
            }
        }

        tracing::debug!(hwnd = ?hwnd, "Applied WS_EX_NOACTIVATE");
        Ok(())
    }
}
