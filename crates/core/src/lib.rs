//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the grid, the pieces, the 7-bag piece source, the undo
//! history and the [`Board`] that orchestrates them. It has no dependencies on
//! terminal I/O or wall-clock time: the control loop feeds it commands and
//! elapsed milliseconds, and reads a [`BoardView`] back for rendering.
//!
//! # Module Structure
//!
//! - [`grid`]: fixed-size cell matrix with placement checks and row clearing
//! - [`piece`]: shape matrices, naive clockwise rotation, anchor positions
//! - [`rng`]: seeded LCG and the 7-bag [`PieceSource`]
//! - [`history`]: snapshot stack backing undo
//! - [`scoring`]: classic single/double/triple/tetris table
//! - [`board`]: the state machine (spawn, move, rotate, hard drop, lock, undo, gravity)
//! - [`view`]: read-only projection handed to renderers
//!
//! # Example
//!
//! ```
//! use tui_undo_tetris_core::{Board, GameConfig};
//! use tui_undo_tetris_types::Command;
//!
//! let mut board = Board::new(GameConfig::default().with_seed(12345));
//! let start = board.position();
//!
//! board.apply(Command::SoftDown);
//! assert_eq!(board.position().y, start.y + 1);
//!
//! board.apply(Command::Undo);
//! assert_eq!(board.position(), start);
//! ```

pub mod board;
pub mod config;
pub mod grid;
pub mod history;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod view;

pub use tui_undo_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, MoveOutcome};
pub use config::{ConfigError, GameConfig};
pub use grid::Grid;
pub use history::{History, Snapshot};
pub use piece::{Piece, Position, Shape};
pub use rng::{PieceSource, SimpleRng};
pub use scoring::line_clear_score;
pub use view::BoardView;
