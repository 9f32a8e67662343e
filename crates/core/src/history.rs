//! Undo history - a stack of full game snapshots
//!
//! Snapshots own deep copies of the grid and the active piece, so later
//! changes to the live board can never reach a stored entry. The stack is
//! never pruned; it grows for as long as the session lasts.

use crate::grid::Grid;
use crate::piece::{Piece, Position};

/// Saved copy of everything undo restores
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub grid: Grid,
    pub piece: Piece,
    pub position: Position,
    pub score: u32,
    pub lines: u32,
}

#[derive(Debug, Clone, Default)]
pub struct History {
    stack: Vec<Snapshot>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.stack.push(snapshot);
    }

    /// Most recent snapshot, if any
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.stack.pop()
    }

    /// Most recent snapshot without removing it (for testing)
    #[cfg(test)]
    pub fn peek(&self) -> Option<&Snapshot> {
        self.stack.last()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
