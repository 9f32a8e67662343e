//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. The board is
//! drawn into a framebuffer (pure, testable) which is then flushed to the
//! terminal backend as a full repaint.
//!
//! Each board cell is two terminal columns wide to compensate for the usual
//! glyph aspect ratio. Colours and glyphs come from an injected [`Palette`].

pub mod fb;
pub mod game_view;
pub mod palette;
pub mod renderer;

pub use tui_undo_tetris_core as core;
pub use tui_undo_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use palette::{Glyph, Palette};
pub use renderer::{encode_full_into, TerminalRenderer};
