//! Window the panel draws into
//!
//! `PanelHost` is the outbound surface of the panel controller: window
//! visibility, position, the native drag-move primitive and the background
//! tint. The platform window implements it; `HeadlessHost` records calls for
//! tests and the demo binary.

use std::rc::Rc;

use spelltimer_core::{Color, PanelPosition};

use crate::utils::color_from_rgba;

/// Solid background tint shared with the host
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundBrush {
    rgba: Color,
}

impl BackgroundBrush {
    pub fn new(rgba: Color) -> Self {
        Self { rgba }
    }

    pub fn rgba(&self) -> Color {
        self.rgba
    }

    pub fn color(&self) -> tiny_skia::Color {
        color_from_rgba(self.rgba)
    }
}

pub trait PanelHost {
    fn show(&mut self);

    fn hide(&mut self);

    fn set_position(&mut self, position: PanelPosition);

    /// Hand the pointer to the platform's window-move loop
    fn begin_drag_move(&mut self);

    /// Called only when the brush actually changed
    fn set_background(&mut self, brush: &Rc<BackgroundBrush>);
}

/// Host that keeps the last state it was given
#[derive(Debug, Default)]
pub struct HeadlessHost {
    pub visible: bool,
    pub position: PanelPosition,
    pub background: Option<Rc<BackgroundBrush>>,
    pub show_calls: usize,
    pub hide_calls: usize,
    pub drag_moves: usize,
    pub background_changes: usize,
}

impl PanelHost for HeadlessHost {
    fn show(&mut self) {
        self.visible = true;
        self.show_calls += 1;
    }

    fn hide(&mut self) {
        self.visible = false;
        self.hide_calls += 1;
    }

    fn set_position(&mut self, position: PanelPosition) {
        self.position = position;
    }

    fn begin_drag_move(&mut self) {
        self.drag_moves += 1;
    }

    fn set_background(&mut self, brush: &Rc<BackgroundBrush>) {
        self.background = Some(Rc::clone(brush));
        self.background_changes += 1;
    }
}
