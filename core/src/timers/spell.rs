//! Spell timer records (externally owned countdown state)
//!
//! A `SpellTimer` is produced by whatever watches the game (log parser,
//! trigger engine) and handed to the overlay as a read-only snapshot.
//!
//! # Timing
//!
//! ```text
//!   match_time            due_at = match_time + recast
//!       │◄──────── recast ────────►│
//!       ├──────────────────────────┼──────────────► now
//!       │   remaining = due - now  │  expired for (now - due)
//! ```

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use spelltimer_types::{Color, overlay_colors};

/// Font description mirrored onto a timer row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontInfo {
    pub family: String,
    pub size: f32,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

impl Default for FontInfo {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            size: 13.0,
            bold: true,
            italic: false,
        }
    }
}

/// Per-timer styling (bar geometry, fonts, colors)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerStyle {
    pub bar_width: u32,
    pub bar_height: u32,
    #[serde(default)]
    pub font: FontInfo,
    pub font_color: Color,
    pub font_outline_color: Color,
    pub bar_color: Color,
    pub bar_outline_color: Color,
    /// Panel tint when this timer is at the top of the list (alpha ignored)
    pub background_color: Color,
    pub background_alpha: u8,
}

impl TimerStyle {
    /// Background color with the timer's background alpha applied
    pub fn background(&self) -> Color {
        let [r, g, b, _] = self.background_color;
        [r, g, b, self.background_alpha]
    }
}

impl Default for TimerStyle {
    fn default() -> Self {
        Self {
            bar_width: 190,
            bar_height: 8,
            font: FontInfo::default(),
            font_color: overlay_colors::WHITE,
            font_outline_color: overlay_colors::FONT_OUTLINE,
            bar_color: overlay_colors::BAR,
            bar_outline_color: overlay_colors::BAR_OUTLINE,
            background_color: overlay_colors::PANEL_BG,
            background_alpha: 0,
        }
    }
}

/// A countdown record tracked by the host application
#[derive(Debug, Clone, PartialEq)]
pub struct SpellTimer {
    /// Stable identity, unique for the lifetime of the timer
    pub id: i64,
    pub title: String,
    /// Replaces `title` when non-blank
    pub title_override: Option<String>,
    pub visible: bool,
    /// Exempt from the hide-after-expiry filter
    pub dont_hide: bool,
    /// Bar shrinks instead of grows
    pub is_reverse: bool,
    /// When the triggering event was last seen (`None` = never matched)
    pub match_time: Option<NaiveDateTime>,
    pub recast_secs: f64,
    /// Tie-breaker when two timers come due at the same instant
    pub display_order: i32,
    pub style: TimerStyle,
}

impl SpellTimer {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            title_override: None,
            visible: true,
            dont_hide: false,
            is_reverse: false,
            match_time: None,
            recast_secs: 0.0,
            display_order: 0,
            style: TimerStyle::default(),
        }
    }

    pub fn with_match_time(mut self, match_time: NaiveDateTime) -> Self {
        self.match_time = Some(match_time);
        self
    }

    pub fn with_recast(mut self, recast_secs: f64) -> Self {
        self.recast_secs = recast_secs;
        self
    }

    pub fn with_display_order(mut self, display_order: i32) -> Self {
        self.display_order = display_order;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_dont_hide(mut self, dont_hide: bool) -> Self {
        self.dont_hide = dont_hide;
        self
    }

    pub fn with_title_override(mut self, title: impl Into<String>) -> Self {
        self.title_override = Some(title.into());
        self
    }

    pub fn with_style(mut self, style: TimerStyle) -> Self {
        self.style = style;
        self
    }

    /// Title shown on the bar
    pub fn display_title(&self) -> &str {
        match self.title_override.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => &self.title,
        }
    }

    /// Recast as a signed delta; non-finite values count as zero
    pub fn recast_delta(&self) -> TimeDelta {
        secs_to_delta(self.recast_secs)
    }

    /// When the timer comes back up (`None` if it never matched)
    pub fn due_at(&self) -> Option<NaiveDateTime> {
        self.match_time.map(|t| add_saturating(t, self.recast_delta()))
    }

    /// Sort key for auto-sort
    ///
    /// An unmatched timer counts from the minimum timestamp, so its recast
    /// still orders it against other unmatched timers.
    pub fn sort_key(&self) -> NaiveDateTime {
        add_saturating(
            self.match_time.unwrap_or(NaiveDateTime::MIN),
            self.recast_delta(),
        )
    }

    /// Seconds elapsed since the timer came due (negative while still running)
    ///
    /// An unmatched timer is measured from the minimum timestamp, which is
    /// always longer ago than any hide threshold.
    pub fn secs_since_due(&self, now: NaiveDateTime) -> f64 {
        delta_to_secs(now.signed_duration_since(self.sort_key()))
    }

    /// Remaining seconds, never negative
    pub fn remaining_secs(&self, now: NaiveDateTime) -> f64 {
        match self.due_at() {
            Some(due) => delta_to_secs(due.signed_duration_since(now)).max(0.0),
            None => 0.0,
        }
    }

    /// Progress from 0.0 (just triggered) to 1.0 (ready)
    pub fn progress(&self, now: NaiveDateTime) -> f64 {
        if self.match_time.is_none() {
            return 1.0;
        }
        let recast = if self.recast_secs.is_finite() {
            self.recast_secs
        } else {
            0.0
        };
        if recast == 0.0 {
            return 1.0;
        }
        let remaining = self.remaining_secs(now);
        ((recast - remaining) / recast).clamp(0.0, 1.0)
    }
}

fn secs_to_delta(secs: f64) -> TimeDelta {
    if !secs.is_finite() {
        return TimeDelta::zero();
    }
    // `as` saturates; the fallback covers the range TimeDelta can't hold
    TimeDelta::try_milliseconds((secs * 1000.0).round() as i64).unwrap_or(if secs < 0.0 {
        TimeDelta::MIN
    } else {
        TimeDelta::MAX
    })
}

fn add_saturating(t: NaiveDateTime, delta: TimeDelta) -> NaiveDateTime {
    t.checked_add_signed(delta).unwrap_or(if delta < TimeDelta::zero() {
        NaiveDateTime::MIN
    } else {
        NaiveDateTime::MAX
    })
}

fn delta_to_secs(delta: TimeDelta) -> f64 {
    delta.num_milliseconds() as f64 / 1000.0
}
