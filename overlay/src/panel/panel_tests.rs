//! Tests for SpellTimerPanel refresh and layout
//!
//! Verifies row reuse, ordering, the spare row, and panel visibility.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{Local, NaiveDate, NaiveDateTime, TimeDelta};
use spelltimer_core::{
    AppConfig, OptionsProvider, OverlayOptions, PanelPosition, PanelSettings, SpellTimer,
};

use super::SpellTimerPanel;
use crate::host::HeadlessHost;
use crate::input::{ButtonState, InputTarget, MouseButton, PanelInput, PointerState};
use crate::platform::{FocusAvoidance, PlatformError, WindowHandle};
use crate::widgets::Visibility;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(20, 0, 0)
        .unwrap()
}

fn ago(s: i64) -> NaiveDateTime {
    now() - TimeDelta::seconds(s)
}

fn sorted() -> OverlayOptions {
    OverlayOptions {
        hide_after_secs: 0.0,
        auto_sort_enabled: true,
        auto_sort_reverse: false,
    }
}

fn running(id: i64, started_secs_ago: i64, recast: f64) -> SpellTimer {
    SpellTimer::new(id, format!("Spell {}", id))
        .with_match_time(ago(started_secs_ago))
        .with_recast(recast)
}

fn panel_with(timers: Vec<SpellTimer>) -> SpellTimerPanel<HeadlessHost> {
    let mut panel = SpellTimerPanel::new("General", HeadlessHost::default());
    panel.set_timers(Some(timers));
    panel
}

#[test]
fn test_scenario_orders_by_due_time() {
    let mut panel = panel_with(vec![
        running(1, 5, 10.0).with_display_order(0),
        running(2, 8, 10.0).with_display_order(1),
    ]);

    panel.refresh(&sorted(), now());

    assert_eq!(panel.displayed_ids(), vec![2, 1]);
    assert_eq!(panel.row(1).unwrap().remaining_secs(), 5.0);
    assert_eq!(panel.row(2).unwrap().remaining_secs(), 2.0);
    assert!((panel.row(2).unwrap().progress() - 0.8).abs() < 1e-9);
    assert!(panel.is_shown());
    assert!(panel.host().visible);
}

#[test]
fn test_missing_list_hides_and_keeps_pool() {
    let mut panel = panel_with(vec![running(1, 1, 10.0)]);
    panel.refresh(&sorted(), now());
    assert!(panel.is_shown());

    panel.set_timers(None);
    panel.refresh(&sorted(), now());

    assert!(!panel.is_shown());
    assert!(!panel.host().visible);
    assert_eq!(panel.rows().len(), 1);
    // Layout untouched: the row keeps its place and visibility
    assert!(panel.row(1).unwrap().is_visible());
}

#[test]
fn test_empty_selection_hides_panel() {
    let mut panel = panel_with(vec![running(1, 1, 10.0).with_visible(false)]);
    panel.refresh(&sorted(), now());

    assert!(!panel.is_shown());
    assert_eq!(panel.host().show_calls, 0);
    assert!(panel.rows().is_empty());
}

#[test]
fn test_invisible_timer_never_gets_a_row_shown() {
    let mut panel = panel_with(vec![
        running(1, 1, 10.0),
        running(2, 1, 10.0).with_visible(false).with_dont_hide(true),
    ]);
    panel.refresh(&sorted(), now());

    assert_eq!(panel.displayed_ids(), vec![1]);
    assert!(panel.row(2).is_none());
}

#[test]
fn test_age_hide_threshold() {
    let options = OverlayOptions {
        hide_after_secs: 10.0,
        ..sorted()
    };
    // due 15s ago and 5s ago
    let mut panel = panel_with(vec![running(1, 25, 10.0), running(2, 15, 10.0)]);
    panel.refresh(&options, now());

    assert_eq!(panel.displayed_ids(), vec![2]);
}

#[test]
fn test_refresh_is_idempotent() {
    let mut panel = panel_with(vec![running(1, 2, 10.0), running(2, 4, 10.0)]);
    panel.refresh(&sorted(), now());

    let layout = |p: &SpellTimerPanel<HeadlessHost>| {
        let mut rows: Vec<(i64, usize, Visibility)> = p
            .rows()
            .iter()
            .map(|(id, row)| (id, row.grid_row(), row.visibility()))
            .collect();
        rows.sort_unstable_by_key(|r| r.0);
        (rows, p.grid().row_count())
    };
    let before = layout(&panel);
    let brush = Rc::clone(panel.background().unwrap());

    panel.refresh(&sorted(), now());

    assert_eq!(layout(&panel), before);
    assert!(Rc::ptr_eq(&brush, panel.background().unwrap()));
    assert_eq!(panel.host().background_changes, 1);
    assert_eq!(panel.host().show_calls, 1);
}

#[test]
fn test_row_reused_across_disappear_and_reappear() {
    let mut panel = panel_with(vec![running(42, 1, 10.0), running(7, 2, 10.0)]);
    panel.refresh(&sorted(), now());
    let slot = panel.row(42).unwrap().slot();
    let paints = panel.row(42).unwrap().paint_count();

    panel.set_timers(Some(vec![running(7, 2, 10.0)]));
    panel.refresh(&sorted(), now());
    let parked = panel.row(42).unwrap();
    assert_eq!(parked.visibility(), Visibility::Collapsed);
    assert_eq!(parked.grid_row(), panel.grid().last_row());
    assert_eq!(parked.paint_count(), paints);

    panel.set_timers(Some(vec![running(42, 1, 10.0), running(7, 2, 10.0)]));
    panel.refresh(&sorted(), now());
    let row = panel.row(42).unwrap();
    assert!(row.is_visible());
    assert_eq!(row.slot(), slot);
    assert_eq!(row.paint_count(), paints + 1);
    assert_eq!(panel.rows().len(), 2);
    assert_eq!(panel.grid().children().len(), 2);
}

#[test]
fn test_spare_row_appended_when_rows_fill_grid() {
    let mut panel = panel_with(vec![running(1, 1, 10.0), running(2, 2, 10.0)]);

    // Two new rows => two row definitions, equal to displayed count
    panel.refresh(&sorted(), now());
    assert_eq!(panel.grid().row_count(), 3);

    // Same two rows against three definitions: nothing added
    panel.refresh(&sorted(), now());
    assert_eq!(panel.grid().row_count(), 3);

    // A third timer fills to 4 definitions while 3 display: nothing added
    panel.set_timers(Some(vec![
        running(1, 1, 10.0),
        running(2, 2, 10.0),
        running(3, 3, 10.0),
    ]));
    panel.refresh(&sorted(), now());
    assert_eq!(panel.grid().row_count(), 4);
    assert_eq!(panel.displayed_ids().len(), 3);
}

#[test]
fn test_displayed_rows_are_contiguous_from_zero() {
    let mut panel = panel_with(vec![
        running(1, 1, 10.0),
        running(2, 2, 10.0),
        running(3, 3, 10.0),
    ]);
    panel.refresh(&sorted(), now());

    panel.set_timers(Some(vec![running(1, 1, 10.0), running(3, 3, 10.0)]));
    panel.refresh(&sorted(), now());

    assert_eq!(panel.row(3).unwrap().grid_row(), 0);
    assert_eq!(panel.row(1).unwrap().grid_row(), 1);
    assert_eq!(panel.row(2).unwrap().grid_row(), panel.grid().last_row());
    assert!(!panel.row(2).unwrap().is_visible());
}

#[test]
fn test_unsorted_keeps_source_order() {
    let options = OverlayOptions {
        auto_sort_enabled: false,
        ..sorted()
    };
    let mut panel = panel_with(vec![running(1, 1, 10.0), running(2, 9, 10.0)]);
    panel.refresh(&options, now());

    assert_eq!(panel.displayed_ids(), vec![1, 2]);
}

#[test]
fn test_progress_clamps() {
    let mut panel = panel_with(vec![
        running(1, 3, 0.0),
        running(2, 100, 10.0),
        SpellTimer::new(3, "Idle").with_recast(10.0),
    ]);
    panel.refresh(&sorted(), now());

    for id in [1, 2, 3] {
        let row = panel.row(id).unwrap();
        assert_eq!(row.progress(), 1.0, "timer {}", id);
        assert_eq!(row.remaining_secs(), 0.0, "timer {}", id);
    }
}

#[test]
fn test_title_override_and_style_mirrored() {
    let mut timer = running(1, 1, 10.0).with_title_override("Renamed");
    timer.style.bar_width = 50;
    timer.style.bar_height = 4;
    timer.is_reverse = true;
    let mut panel = panel_with(vec![timer]);
    panel.refresh(&sorted(), now());

    let row = panel.row(1).unwrap();
    assert_eq!(row.title(), "Renamed");
    assert!(row.is_reverse());
    assert_eq!(row.style().bar_width, 50);
    let surface = row.surface().unwrap();
    assert_eq!((surface.width(), surface.height()), (50, 4));
}

#[test]
fn test_background_follows_first_timer() {
    let mut first = running(1, 8, 10.0);
    first.style.background_color = [10, 20, 30, 255];
    first.style.background_alpha = 128;
    let mut second = running(2, 1, 10.0);
    second.style.background_color = [200, 200, 200, 255];
    second.style.background_alpha = 16;

    let mut panel = panel_with(vec![second.clone(), first.clone()]);
    panel.refresh(&sorted(), now());
    assert_eq!(panel.background().unwrap().rgba(), [10, 20, 30, 128]);

    // Reversed sort puts the other timer on top and swaps the brush
    let reverse = OverlayOptions {
        auto_sort_reverse: true,
        ..sorted()
    };
    panel.refresh(&reverse, now());
    assert_eq!(panel.background().unwrap().rgba(), [200, 200, 200, 16]);
    assert_eq!(panel.host().background_changes, 2);
}

#[test]
fn test_drag_suppresses_refresh() {
    let mut panel = panel_with(vec![running(1, 1, 10.0)]);
    panel.refresh(&sorted(), now());

    panel.handle_input(PanelInput::MouseDown {
        target: InputTarget::Row(1),
        pointer: PointerState::left_down(),
    });
    assert!(panel.is_dragging());
    assert_eq!(panel.host().drag_moves, 1);

    panel.set_timers(Some(vec![running(2, 1, 10.0)]));
    panel.refresh(&sorted(), now());
    assert_eq!(panel.displayed_ids(), vec![1]);
    assert!(panel.row(2).is_none());

    panel.handle_input(PanelInput::MouseUp {
        target: InputTarget::Panel,
        pointer: PointerState::left_up(),
    });
    assert!(!panel.is_dragging());

    panel.refresh(&sorted(), now());
    assert_eq!(panel.displayed_ids(), vec![2]);
}

#[test]
fn test_right_click_does_not_drag() {
    let mut panel = panel_with(vec![]);
    panel.handle_input(PanelInput::MouseDown {
        target: InputTarget::Panel,
        pointer: PointerState {
            changed: MouseButton::Right,
            left: ButtonState::Released,
        },
    });

    assert!(!panel.is_dragging());
    assert_eq!(panel.host().drag_moves, 0);
}

#[test]
fn test_mouse_up_with_left_still_held_keeps_dragging() {
    let mut panel = panel_with(vec![]);
    panel.handle_input(PanelInput::MouseDown {
        target: InputTarget::Panel,
        pointer: PointerState::left_down(),
    });
    panel.handle_input(PanelInput::MouseUp {
        target: InputTarget::Panel,
        pointer: PointerState {
            changed: MouseButton::Right,
            left: ButtonState::Pressed,
        },
    });

    assert!(panel.is_dragging());
}

#[test]
fn test_on_loaded_restores_position_and_refreshes() {
    let config = AppConfig {
        panels: vec![PanelSettings::new("General", 300.0, 120.0)],
        ..AppConfig::default()
    };
    let mut panel = panel_with(vec![running(1, 1, 10.0)]);
    panel.on_loaded(&config, &config, now());

    assert_eq!(panel.host().position, PanelPosition { left: 300.0, top: 120.0 });
    assert_eq!(panel.displayed_ids(), vec![1]);
}

#[test]
fn test_on_loaded_without_saved_position_keeps_default() {
    let config = AppConfig::default();
    let mut panel = panel_with(vec![running(1, 1, 10.0)]);
    panel.on_loaded(&config, &sorted(), now());

    assert_eq!(panel.host().position, PanelPosition::default());
    assert!(panel.is_shown());
}

#[test]
fn test_close_clears_pool() {
    let mut panel = panel_with(vec![running(1, 1, 10.0), running(2, 1, 10.0)]);
    panel.refresh(&sorted(), now());
    panel.close();

    assert!(panel.rows().is_empty());
    assert_eq!(panel.grid().row_count(), 0);
    assert!(panel.background().is_none());
}

/// Backend that counts calls and can be told to fail
#[derive(Default)]
struct CountingFocus {
    calls: Cell<usize>,
    fail: bool,
}

impl FocusAvoidance for CountingFocus {
    fn set_non_activating(&self, _handle: WindowHandle) -> Result<(), PlatformError> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            Err(PlatformError::StyleWrite { code: 5 })
        } else {
            Ok(())
        }
    }
}

#[test]
fn test_non_activating_applied_once() {
    let focus = CountingFocus::default();
    let mut panel = panel_with(vec![]);

    panel.on_source_initialized(WindowHandle(0x10), &focus);
    panel.on_source_initialized(WindowHandle(0x10), &focus);

    assert_eq!(focus.calls.get(), 1);
}

#[test]
fn test_non_activating_failure_is_silent() {
    let focus = CountingFocus {
        fail: true,
        ..CountingFocus::default()
    };
    let mut panel = panel_with(vec![running(1, 1, 10.0)]);

    panel.on_source_initialized(WindowHandle(0x10), &focus);
    panel.refresh(&sorted(), now());

    assert_eq!(focus.calls.get(), 1);
    assert!(panel.is_shown());
}

#[test]
fn test_first_refresh_hides_a_window_created_visible() {
    let host = HeadlessHost {
        visible: true,
        ..HeadlessHost::default()
    };
    let mut panel = SpellTimerPanel::new("General", host);

    panel.refresh(&sorted(), now());
    assert!(!panel.host().visible);
    assert_eq!(panel.host().hide_calls, 1);

    // Later empty refreshes stay quiet
    panel.refresh(&sorted(), now());
    assert_eq!(panel.host().hide_calls, 1);
}

#[test]
fn test_first_refresh_always_shows() {
    let mut panel = panel_with(vec![running(1, 1, 10.0)]);
    panel.refresh(&sorted(), now());
    panel.refresh(&sorted(), now());

    assert!(panel.host().visible);
    assert_eq!(panel.host().show_calls, 1);
    assert_eq!(panel.host().hide_calls, 0);
}

/// Options that the test can change between ticks
struct LiveOptions {
    options: Cell<OverlayOptions>,
    reads: Cell<usize>,
}

impl OptionsProvider for LiveOptions {
    fn overlay_options(&self) -> OverlayOptions {
        self.reads.set(self.reads.get() + 1);
        self.options.get()
    }
}

#[test]
fn test_tick_reads_options_every_time() {
    let wall = Local::now().naive_local();
    // Due in about 5s and 2s
    let mut panel = panel_with(vec![
        SpellTimer::new(1, "A")
            .with_match_time(wall - TimeDelta::seconds(5))
            .with_recast(10.0),
        SpellTimer::new(2, "B")
            .with_match_time(wall - TimeDelta::seconds(8))
            .with_recast(10.0)
            .with_display_order(1),
    ]);
    let provider = LiveOptions {
        options: Cell::new(sorted()),
        reads: Cell::new(0),
    };

    panel.tick(&provider);
    assert_eq!(panel.displayed_ids(), vec![2, 1]);

    provider.options.set(OverlayOptions {
        auto_sort_reverse: true,
        ..sorted()
    });
    panel.tick(&provider);
    assert_eq!(panel.displayed_ids(), vec![1, 2]);

    // Both timers are still running, so a threshold alone hides nothing
    provider.options.set(OverlayOptions {
        hide_after_secs: 1.0,
        auto_sort_enabled: false,
        auto_sort_reverse: false,
    });
    panel.tick(&provider);
    assert_eq!(panel.displayed_ids(), vec![1, 2]);
    assert_eq!(provider.reads.get(), 3);
}

#[test]
fn test_refresh_follows_changed_threshold() {
    // due 15s ago
    let mut panel = panel_with(vec![running(1, 25, 10.0), running(2, 1, 10.0)]);

    panel.refresh(&sorted(), now());
    assert_eq!(panel.displayed_ids(), vec![1, 2]);

    let strict = OverlayOptions {
        hide_after_secs: 10.0,
        ..sorted()
    };
    panel.refresh(&strict, now());
    assert_eq!(panel.displayed_ids(), vec![2]);
    assert!(!panel.row(1).unwrap().is_visible());
}
