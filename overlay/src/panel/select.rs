//! Which timers a panel shows, and in what order

use std::cmp::Ordering;

use chrono::NaiveDateTime;
use spelltimer_core::{OverlayOptions, SpellTimer};

/// Visible timers after the age filter, sorted per the options
///
/// Returns timers in source order when auto-sort is off.
pub fn select_timers<'a>(
    timers: &'a [SpellTimer],
    options: &OverlayOptions,
    now: NaiveDateTime,
) -> Vec<&'a SpellTimer> {
    let threshold = options.hide_threshold();

    let mut selected: Vec<&SpellTimer> = timers
        .iter()
        .filter(|t| t.visible)
        .filter(|t| match threshold {
            Some(limit) => t.dont_hide || t.secs_since_due(now) <= limit,
            None => true,
        })
        .collect();

    if options.auto_sort_enabled {
        let reverse = options.auto_sort_reverse;
        selected.sort_by(|a, b| compare_due(a, b, reverse));
    }

    selected
}

/// Due time (optionally reversed), then display order ascending
fn compare_due(a: &SpellTimer, b: &SpellTimer, reverse: bool) -> Ordering {
    let due = a.sort_key().cmp(&b.sort_key());
    let due = if reverse { due.reverse() } else { due };
    due.then_with(|| a.display_order.cmp(&b.display_order))
}
