//! Common utility functions for overlay rendering

use tiny_skia::Color;

/// Convert [u8; 4] RGBA array to tiny_skia Color
#[inline]
pub fn color_from_rgba(rgba: [u8; 4]) -> Color {
    Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3])
}

/// Format remaining seconds as M:SS, whole seconds, or S.s
pub fn format_remaining(secs: f64) -> String {
    if secs.is_nan() || secs <= 0.0 {
        return "0.0".to_string();
    }

    if secs >= 60.0 {
        let mins = (secs / 60.0).floor() as u64;
        let remaining_secs = (secs % 60.0).floor() as u64;
        format!("{}:{:02}", mins, remaining_secs)
    } else if secs >= 10.0 {
        format!("{:.0}", secs.floor())
    } else {
        format!("{:.1}", secs)
    }
}
