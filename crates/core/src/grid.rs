//! Grid module - the fixed-size playfield
//!
//! The grid is a `width x height` matrix where each cell is empty or holds the
//! kind of the piece that was locked there. Uses a flat row-major array
//! (`y * width + x`) so every access is O(1).
//! Coordinates: (x, y) with x growing to the right and y growing downwards,
//! origin at the top-left cell.

use crate::piece::{Piece, Position};
use crate::types::Cell;

/// The playfield - dimensions are fixed at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Check if (x, y) lies inside the grid
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub(crate) fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if the cell at (x, y) is empty.
    ///
    /// # Panics
    ///
    /// The coordinate must be in bounds; callers check with
    /// [`Grid::in_bounds`] (or go through [`Grid::is_valid_position`]) first.
    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        assert!(
            self.in_bounds(x, y),
            "cell ({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        self.cells[y as usize * self.width as usize + x as usize].is_none()
    }

    /// Check whether `piece` can sit with its anchor at `pos`.
    ///
    /// Occupied shape cells must stay within the side walls and above the
    /// floor, and must not overlap locked cells. Cells above row 0 are allowed
    /// so pieces can overhang the top while spawning or rotating.
    pub fn is_valid_position(&self, piece: &Piece, pos: Position) -> bool {
        piece.cells().all(|(dx, dy)| {
            let x = pos.x + dx;
            let y = pos.y + dy;
            if x < 0 || x >= self.width as i32 || y >= self.height as i32 {
                return false;
            }
            y < 0 || self.is_empty(x, y)
        })
    }

    /// Write `piece` into the grid with its anchor at `pos`.
    ///
    /// Cells that fall outside the grid are skipped. Returns true when the
    /// lock happened at or above the spawn row, i.e. when at least one cell
    /// was written while the anchor row is `<= 0`.
    pub fn place(&mut self, piece: &Piece, pos: Position) -> bool {
        let mut game_over = false;
        for (dx, dy) in piece.cells() {
            if self.set(pos.x + dx, pos.y + dy, Some(piece.kind())) && pos.y <= 0 {
                game_over = true;
            }
        }
        game_over
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Cells of row `y`, left to right
    pub fn row(&self, y: usize) -> &[Cell] {
        let width = self.width as usize;
        let start = y * width;
        &self.cells[start..start + width]
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Scans bottom to top. On a full row everything above shifts down by one
    /// and the top row is emptied; the scan index stays put so the row that
    /// just moved into place is examined next.
    pub fn clear_full_rows(&mut self) -> u32 {
        let width = self.width as usize;
        let mut cleared = 0;
        let mut y = self.height as usize;

        while y > 0 {
            let row = y - 1;
            if !self.is_row_full(row) {
                y -= 1;
                continue;
            }

            cleared += 1;
            // copy_within handles the overlapping ranges.
            self.cells.copy_within(0..row * width, width);
            self.cells[..width].fill(None);
        }

        cleared
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Create from rows of cells, top row first (for testing)
    #[cfg(test)]
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let height = rows.len() as u16;
        let width = rows.first().map_or(0, |r| r.len()) as u16;
        assert!(rows.iter().all(|r| r.len() == width as usize));
        Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        }
    }

    /// Fill row `y` completely (for testing)
    #[cfg(test)]
    pub fn fill_row(&mut self, y: i32, kind: crate::types::PieceKind) {
        for x in 0..self.width as i32 {
            self.set(x, y, Some(kind));
        }
    }
}
