//! Spell timer panel
//!
//! A floating, non-activating window listing countdown bars. Each tick the
//! panel maps the current timer list onto a pool of reusable rows:
//!
//! ```text
//!   timers ──► select (visible, age, sort) ──► rows (get-or-create, bind)
//!                                                  │
//!        hide if empty ◄── park unused rows ◄── restack displayed rows
//! ```
//!
//! Rows are never destroyed while the panel is open, so a timer that drops
//! out and comes back reuses the same row instead of rebuilding layout.

mod select;

#[cfg(test)]
mod panel_tests;

pub use select::select_timers;

use std::rc::Rc;

use chrono::{Local, NaiveDateTime};
use hashbrown::HashSet;
use spelltimer_core::{OptionsProvider, OverlayOptions, PanelSettingsSource, SpellTimer};

use crate::host::{BackgroundBrush, PanelHost};
use crate::input::{ButtonState, InputTarget, MouseButton, PanelInput};
use crate::layout::LayoutGrid;
use crate::platform::{FocusAvoidance, WindowHandle};
use crate::pool::RowPool;
use crate::widgets::{SpellTimerRow, Visibility};

pub struct SpellTimerPanel<H: PanelHost> {
    name: String,
    host: H,
    timers: Option<Vec<SpellTimer>>,
    grid: LayoutGrid,
    rows: RowPool,
    background: Option<Rc<BackgroundBrush>>,
    dragging: bool,
    /// Last visibility pushed to the host (`None` until the first refresh)
    shown: Option<bool>,
    source_initialized: bool,
}

impl<H: PanelHost> SpellTimerPanel<H> {
    /// Create an empty panel; the first refresh sets the host's visibility
    pub fn new(name: impl Into<String>, host: H) -> Self {
        Self {
            name: name.into(),
            host,
            timers: None,
            grid: LayoutGrid::new(),
            rows: RowPool::new(),
            background: None,
            dragging: false,
            shown: None,
            source_initialized: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Replace the timer list read by the next refresh
    pub fn set_timers(&mut self, timers: Option<Vec<SpellTimer>>) {
        self.timers = timers;
    }

    pub fn timers(&self) -> Option<&[SpellTimer]> {
        self.timers.as_deref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_shown(&self) -> bool {
        self.shown == Some(true)
    }

    pub fn rows(&self) -> &RowPool {
        &self.rows
    }

    pub fn row(&self, id: i64) -> Option<&SpellTimerRow> {
        self.rows.get(id)
    }

    pub fn grid(&self) -> &LayoutGrid {
        &self.grid
    }

    pub fn background(&self) -> Option<&Rc<BackgroundBrush>> {
        self.background.as_ref()
    }

    /// Ids of the visible rows, top to bottom
    pub fn displayed_ids(&self) -> Vec<i64> {
        let mut visible: Vec<(usize, i64)> = self
            .rows
            .iter()
            .filter(|(_, row)| row.is_visible())
            .map(|(id, row)| (row.grid_row(), id))
            .collect();
        visible.sort_unstable();
        visible.into_iter().map(|(_, id)| id).collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Native window handle became available
    ///
    /// Applies the non-activating style the first time only. A failure leaves
    /// the window as a normal, focus-taking window.
    pub fn on_source_initialized(
        &mut self,
        handle: WindowHandle,
        platform: &dyn FocusAvoidance,
    ) {
        if self.source_initialized {
            return;
        }
        self.source_initialized = true;

        if let Err(e) = platform.set_non_activating(handle) {
            tracing::warn!(
                panel = %self.name,
                error = %e,
                "Could not make panel non-activating"
            );
        }
    }

    /// Window loaded: restore the saved position, then draw once
    pub fn on_loaded<S, O>(&mut self, settings: &S, options: &O, now: NaiveDateTime)
    where
        S: PanelSettingsSource + ?Sized,
        O: OptionsProvider + ?Sized,
    {
        match settings.panel_position(&self.name) {
            Some(position) => {
                tracing::info!(
                    panel = %self.name,
                    left = position.left,
                    top = position.top,
                    "Restoring panel position"
                );
                self.host.set_position(position);
            }
            None => tracing::debug!(panel = %self.name, "No saved position, keeping default"),
        }

        self.refresh(&options.overlay_options(), now);
    }

    /// Window closed: drop every row
    pub fn close(&mut self) {
        tracing::info!(panel = %self.name, rows = self.rows.len(), "Closing panel");
        self.rows.clear();
        self.grid.clear();
        self.background = None;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────────────────────────

    pub fn handle_input(&mut self, input: PanelInput) {
        match input {
            PanelInput::MouseDown { target, pointer } => {
                if pointer.left == ButtonState::Pressed {
                    self.dragging = true;
                    tracing::debug!(panel = %self.name, ?target, "Drag on");
                }
                if pointer.changed == MouseButton::Left {
                    self.begin_drag(target);
                }
            }
            PanelInput::MouseUp { target, pointer } => {
                if pointer.left == ButtonState::Released {
                    self.dragging = false;
                    tracing::debug!(panel = %self.name, ?target, "Drag off");
                }
            }
        }
    }

    fn begin_drag(&mut self, target: InputTarget) {
        if let InputTarget::Row(id) = target {
            if !self.rows.contains(id) {
                tracing::debug!(panel = %self.name, id, "Drag from unknown row");
            }
        }
        self.host.begin_drag_move();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Refresh
    // ─────────────────────────────────────────────────────────────────────────

    /// Refresh against the wall clock with options read from `provider`
    pub fn tick<O: OptionsProvider + ?Sized>(&mut self, provider: &O) {
        let now = Local::now().naive_local();
        self.refresh(&provider.overlay_options(), now);
    }

    /// Map the current timer list onto rows
    pub fn refresh(&mut self, options: &OverlayOptions, now: NaiveDateTime) {
        // Stale bars are fine while the window is being moved
        if self.dragging {
            return;
        }

        let Some(timers) = self.timers.as_deref() else {
            set_shown(&mut self.shown, &mut self.host, false);
            return;
        };

        let selected = select_timers(timers, options, now);
        let Some(first) = selected.first() else {
            set_shown(&mut self.shown, &mut self.host, false);
            return;
        };

        // Background tint comes from the top timer
        let rgba = first.style.background();
        if self.background.as_ref().is_none_or(|b| b.rgba() != rgba) {
            let brush = Rc::new(BackgroundBrush::new(rgba));
            tracing::debug!(panel = %self.name, ?rgba, "Background changed");
            self.host.set_background(&brush);
            self.background = Some(brush);
        }

        let mut display: Vec<i64> = Vec::with_capacity(selected.len());
        for timer in &selected {
            let row = self.rows.get_or_create(timer.id, &mut self.grid);
            row.bind(timer);
            row.set_countdown(timer.remaining_secs(now), timer.progress(now));
            row.refresh();
            display.push(timer.id);
        }

        // Keep one blank row below the bars
        if display.len() == self.grid.row_count() {
            self.grid.add_row();
        }

        // Park rows with no timer this tick on the last row, out of the way
        let selected_ids: HashSet<i64> = selected.iter().map(|t| t.id).collect();
        let last_row = self.grid.last_row();
        for (id, row) in self.rows.iter_mut() {
            if !selected_ids.contains(&id) {
                row.set_visibility(Visibility::Collapsed);
                row.set_grid_row(last_row);
            }
        }

        for (index, id) in display.iter().enumerate() {
            if let Some(row) = self.rows.get_mut(*id) {
                row.set_grid_row(index);
                row.set_visibility(Visibility::Visible);
            }
        }

        set_shown(&mut self.shown, &mut self.host, true);
    }
}

/// Show or hide the window, calling the host only on a change
///
/// The first call always reaches the host, whatever state the window was
/// created in.
fn set_shown<H: PanelHost>(shown: &mut Option<bool>, host: &mut H, visible: bool) {
    if *shown == Some(visible) {
        return;
    }
    *shown = Some(visible);
    if visible {
        host.show();
    } else {
        host.hide();
    }
}
