//! Reusable UI widgets for the spell timer panel
//!
//! # Available Widgets
//!
//! - [`SpellTimerRow`] - One countdown bar bound to a timer id

pub mod colors;
mod spell_row;

pub use spell_row::{SpellTimerRow, Visibility};
