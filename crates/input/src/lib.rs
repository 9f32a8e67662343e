//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`] and exposes the
//! non-blocking [`CommandSource`] contract the control loop polls once per
//! frame. The game core never sees which polling mechanism is in use.

pub mod map;
pub mod poll;

pub use tui_undo_tetris_types as types;

pub use map::{command_for_key, is_quit_key};
pub use poll::{CommandSource, CrosstermInput};
