//! Terminal falling-block puzzle with undo (workspace facade crate).
//!
//! Re-exports the implementation crates under `crates/` as
//! `tui_undo_tetris::{core,input,term,types}`.

pub use tui_undo_tetris_core as core;
pub use tui_undo_tetris_input as input;
pub use tui_undo_tetris_term as term;
pub use tui_undo_tetris_types as types;
