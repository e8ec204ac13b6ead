use tiny_skia::Color;

#[inline]
pub fn transparent() -> Color {
    Color::from_rgba8(0, 0, 0, 0)
}

/// Track color behind the bar fill: the bar color at reduced opacity
#[inline]
pub fn bar_track(bar: [u8; 4]) -> Color {
    Color::from_rgba8(bar[0], bar[1], bar[2], bar[3] / 4)
}
