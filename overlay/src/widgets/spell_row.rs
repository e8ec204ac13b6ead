//! Spell timer row widget
//!
//! Layout of one row:
//! - Title text above the bar, remaining time right-aligned
//! - `| ███████████░░░░░░░ |` bar with 1px outline
//!
//! The row keeps its own painted bar surface. Text is kept as strings for the
//! window layer to draw with the timer's font.

use spelltimer_core::{FontInfo, SpellTimer, TimerStyle};
use tiny_skia::{BlendMode, Paint, Pixmap, Rect, Transform};

use crate::utils::{color_from_rgba, format_remaining};
use crate::widgets::colors;

/// Layout visibility of a row inside the panel grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    /// Hidden and takes no space
    Collapsed,
}

/// A reusable countdown bar bound to one timer id
#[derive(Debug)]
pub struct SpellTimerRow {
    id: i64,
    /// Order of creation within the panel (initial grid row)
    slot: usize,
    title: String,
    is_reverse: bool,
    remaining_secs: f64,
    progress: f64,
    style: TimerStyle,
    visibility: Visibility,
    grid_row: usize,
    surface: Option<Pixmap>,
    paint_count: u64,
}

impl SpellTimerRow {
    /// Create a collapsed row placed on `slot`
    pub fn new(id: i64, slot: usize) -> Self {
        Self {
            id,
            slot,
            title: String::new(),
            is_reverse: false,
            remaining_secs: 0.0,
            progress: 1.0,
            style: TimerStyle::default(),
            visibility: Visibility::Collapsed,
            grid_row: slot,
            surface: None,
            paint_count: 0,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_reverse(&self) -> bool {
        self.is_reverse
    }

    pub fn remaining_secs(&self) -> f64 {
        self.remaining_secs
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn style(&self) -> &TimerStyle {
        &self.style
    }

    pub fn font(&self) -> &FontInfo {
        &self.style.font
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    pub fn grid_row(&self) -> usize {
        self.grid_row
    }

    /// Number of times the bar surface has been repainted
    pub fn paint_count(&self) -> u64 {
        self.paint_count
    }

    /// The painted bar (None until the first refresh, or for a zero-size bar)
    pub fn surface(&self) -> Option<&Pixmap> {
        self.surface.as_ref()
    }

    /// Remaining time as shown next to the bar
    pub fn time_text(&self) -> String {
        format_remaining(self.remaining_secs)
    }

    pub(crate) fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    pub(crate) fn set_grid_row(&mut self, row: usize) {
        self.grid_row = row;
    }

    /// Values arrive already clamped by the timer
    pub(crate) fn set_countdown(&mut self, remaining_secs: f64, progress: f64) {
        self.remaining_secs = remaining_secs;
        self.progress = progress;
    }

    /// Mirror title and styling from the bound timer
    pub(crate) fn bind(&mut self, timer: &SpellTimer) {
        if self.title != timer.display_title() {
            self.title = timer.display_title().to_string();
        }
        self.is_reverse = timer.is_reverse;
        if self.style != timer.style {
            self.style = timer.style.clone();
        }
    }

    /// Fraction of the bar that is filled
    ///
    /// A reversed bar starts full and drains as the timer comes back up.
    pub fn fill_fraction(&self) -> f64 {
        if self.is_reverse {
            1.0 - self.progress
        } else {
            self.progress
        }
    }

    /// Repaint the bar surface from the current state
    pub fn refresh(&mut self) {
        let width = self.style.bar_width;
        let height = self.style.bar_height;

        let needs_alloc = self
            .surface
            .as_ref()
            .is_none_or(|p| p.width() != width || p.height() != height);
        if needs_alloc {
            self.surface = Pixmap::new(width, height);
        }

        let fill = self.fill_fraction() as f32;
        let style = &self.style;
        let Some(pixmap) = self.surface.as_mut() else {
            return;
        };

        pixmap.fill(colors::transparent());

        let mut paint = Paint::default();
        paint.anti_alias = false;
        paint.blend_mode = BlendMode::Source;

        // Outline covers the whole surface, track and fill sit 1px inside
        fill_rect(
            pixmap,
            &mut paint,
            0.0,
            0.0,
            width as f32,
            height as f32,
            color_from_rgba(style.bar_outline_color),
        );

        let inner_w = width.saturating_sub(2) as f32;
        let inner_h = height.saturating_sub(2) as f32;
        fill_rect(
            pixmap,
            &mut paint,
            1.0,
            1.0,
            inner_w,
            inner_h,
            colors::bar_track(style.bar_color),
        );

        let fill_w = (inner_w * fill).round();
        fill_rect(
            pixmap,
            &mut paint,
            1.0,
            1.0,
            fill_w,
            inner_h,
            color_from_rgba(style.bar_color),
        );

        self.paint_count += 1;
    }
}

fn fill_rect(
    pixmap: &mut Pixmap,
    paint: &mut Paint,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    color: tiny_skia::Color,
) {
    // Rect::from_xywh rejects empty rects
    if let Some(rect) = Rect::from_xywh(x, y, width, height) {
        paint.set_color(color);
        pixmap.fill_rect(rect, paint, Transform::identity(), None);
    }
}
