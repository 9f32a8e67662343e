//! Read-only render projection of a [`Board`](crate::Board)

use crate::grid::Grid;
use crate::piece::{Piece, Position};
use crate::types::{Cell, PieceKind};

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    pub grid: &'a Grid,
    pub piece: &'a Piece,
    pub position: Position,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub game_over: bool,
    pub next: PieceKind,
}

impl BoardView<'_> {
    pub fn width(&self) -> u16 {
        self.grid.width()
    }

    pub fn height(&self) -> u16 {
        self.grid.height()
    }

    /// Cell as drawn: the locked grid value, or the active piece's kind where
    /// it covers an empty grid cell.
    pub fn cell(&self, x: i32, y: i32) -> Cell {
        match self.grid.get(x, y) {
            Some(Some(kind)) => Some(kind),
            Some(None) if self.piece.covers(self.position, x, y) => Some(self.piece.kind()),
            _ => None,
        }
    }
}
