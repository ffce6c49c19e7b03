//! Terminal input (engine-facing).
//!
//! Independent of any UI framework: maps `crossterm` key events into
//! [`crate::types::Command`] values and provides a key-repeat handler that
//! also works in terminals without key-release events.

pub mod handler;
pub mod map;

pub use stackfall_types as types;

pub use handler::RepeatHandler;
pub use map::{map_control, map_key, should_quit, Control};
