//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used
//! by the game core, the input mapper and the terminal renderer alike.
//!
//! # Board Dimensions
//!
//! The default playfield is 10 columns by 20 rows, origin at the top-left.
//! Other sizes can be configured at game start; they never change afterwards.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_DROP_MS` | 800 | Gravity interval at level 1 |
//! | `DEFAULT_FRAME_MS` | 50 | Sleep between control loop iterations |
//!
//! # Examples
//!
//! ```
//! use tui_undo_tetris_types::{Command, Direction, PieceKind, DEFAULT_BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::T.letter(), "T");
//!
//! assert_eq!(Command::SoftDown.direction(), Some(Direction::Down));
//! assert_eq!(DEFAULT_BOARD_WIDTH, 10);
//! ```

/// Default board width in cells (10 columns)
pub const DEFAULT_BOARD_WIDTH: u16 = 10;

/// Default board height in cells (20 rows)
pub const DEFAULT_BOARD_HEIGHT: u16 = 20;

/// Gravity interval at level 1 (0.8 seconds per row)
pub const DEFAULT_DROP_MS: u32 = 800;

/// Sleep between control loop iterations
pub const DEFAULT_FRAME_MS: u32 = 50;

/// Level the game starts (and, without level progression, stays) at
pub const START_LEVEL: u32 = 1;

/// Line clear scoring table
///
/// Base points for clearing N lines at once, multiplied by the current level:
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
///
/// Any other count scores 0.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// The seven tetromino piece kinds
///
/// The declaration order is the order pieces are listed in a fresh bag before
/// shuffling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Every kind, once.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Upper-case letter used in text panels
    pub fn letter(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// A cell on the game grid
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;

/// One-cell translation of a falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    /// Offset `(dx, dy)` of a single step in this direction
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }
}

/// Discrete player command produced by the input collaborator
///
/// "No command this frame" is expressed as `Option::<Command>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move piece one cell left
    Left,
    /// Move piece one cell right
    Right,
    /// Move piece one cell down, locking it if blocked
    SoftDown,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Drop piece to the lowest valid row and lock it
    HardDrop,
    /// Restore the most recent snapshot
    Undo,
    /// Leave the game loop
    Quit,
}

impl Command {
    /// Translation direction for movement commands
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Command::Left => Some(Direction::Left),
            Command::Right => Some(Direction::Right),
            Command::SoftDown => Some(Direction::Down),
            _ => None,
        }
    }
}
