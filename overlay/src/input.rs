//! Pointer input routed to the panel
//!
//! The window layer translates its native mouse messages into these values
//! and hands them to `SpellTimerPanel::handle_input`. Rows forward their own
//! clicks with `InputTarget::Row`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Button that changed plus the left button's state after the change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerState {
    pub changed: MouseButton,
    pub left: ButtonState,
}

impl PointerState {
    pub fn left_down() -> Self {
        Self {
            changed: MouseButton::Left,
            left: ButtonState::Pressed,
        }
    }

    pub fn left_up() -> Self {
        Self {
            changed: MouseButton::Left,
            left: ButtonState::Released,
        }
    }
}

/// Where the event landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    Panel,
    Row(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelInput {
    MouseDown {
        target: InputTarget,
        pointer: PointerState,
    },
    MouseUp {
        target: InputTarget,
        pointer: PointerState,
    },
}
