//! Timer model
//!
//! This module provides:
//! - **SpellTimer**: the countdown record the overlay reads each tick
//! - **TimerStyle / FontInfo**: per-timer styling mirrored onto bar rows
//!
//! Timers are owned by the host. The overlay only reads them and never
//! writes back.

mod spell;

pub use spell::{FontInfo, SpellTimer, TimerStyle};
