//! Pieces module - tetromino shape matrices and naive rotation
//!
//! A piece is a small occupancy matrix (1x4 up to 3x3) tagged with its kind.
//! Rotation replaces the matrix with its 90° clockwise turn; there is no
//! wall-kick table, so a rotation that does not fit is simply undone by the
//! caller.

use crate::types::{Direction, PieceKind};

/// Largest matrix dimension any shape can take
pub const MAX_SHAPE_DIM: usize = 4;

/// Occupancy matrix of a piece, stored inline so copies are cheap and deep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    /// Row-major, only the first `rows * cols` entries are meaningful
    filled: [bool; MAX_SHAPE_DIM * MAX_SHAPE_DIM],
}

impl Shape {
    /// Build a shape from text rows where `#` marks an occupied cell
    fn from_rows(rows: &[&str]) -> Self {
        let mut filled = [false; MAX_SHAPE_DIM * MAX_SHAPE_DIM];
        let cols = rows.first().map_or(0, |r| r.len());
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.bytes().enumerate() {
                filled[r * cols + c] = ch == b'#';
            }
        }
        Self {
            rows: rows.len() as u8,
            cols: cols as u8,
            filled,
        }
    }

    /// Spawn matrix for a piece kind
    pub fn template(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => Self::from_rows(&["####"]),
            PieceKind::J => Self::from_rows(&["#..", "###"]),
            PieceKind::L => Self::from_rows(&["..#", "###"]),
            PieceKind::O => Self::from_rows(&["##", "##"]),
            PieceKind::S => Self::from_rows(&[".##", "##."]),
            PieceKind::T => Self::from_rows(&[".#.", "###"]),
            PieceKind::Z => Self::from_rows(&["##.", ".##"]),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols() && self.filled[row * self.cols() + col]
    }

    /// 90° clockwise turn: the transpose of the row-reversed matrix
    pub fn rotated_cw(&self) -> Self {
        let (rows, cols) = (self.rows(), self.cols());
        let mut filled = [false; MAX_SHAPE_DIM * MAX_SHAPE_DIM];
        // new[r][c] = old[rows - 1 - c][r], new size is cols x rows
        for r in 0..cols {
            for c in 0..rows {
                filled[r * rows + c] = self.filled[(rows - 1 - c) * cols + r];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            filled,
        }
    }
}

/// Anchor of a piece: grid coordinate of the shape's top-left cell
///
/// May be negative or out of range while a move is being evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The position one cell away in `direction` (no bounds checking)
    pub fn translated(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move this position one cell in `direction` (no bounds checking)
    pub fn translate(&mut self, direction: Direction) {
        *self = self.translated(direction);
    }
}

/// A falling piece: a shape plus an immutable kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
}

impl Piece {
    /// Create a piece in its spawn orientation
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: Shape::template(kind),
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Width of the shape matrix in columns
    pub fn width(&self) -> usize {
        self.shape.cols()
    }

    /// Height of the shape matrix in rows
    pub fn height(&self) -> usize {
        self.shape.rows()
    }

    /// Turn the shape 90° clockwise in place
    pub fn rotate(&mut self) {
        self.shape = self.shape.rotated_cw();
    }

    /// Offsets `(dx, dy)` of the occupied cells relative to the anchor
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let shape = &self.shape;
        (0..shape.rows()).flat_map(move |r| {
            (0..shape.cols())
                .filter(move |&c| shape.is_filled(r, c))
                .map(move |c| (c as i32, r as i32))
        })
    }

    /// Whether the piece covers grid cell (x, y) when anchored at `pos`
    pub fn covers(&self, pos: Position, x: i32, y: i32) -> bool {
        let (dx, dy) = (x - pos.x, y - pos.y);
        dx >= 0 && dy >= 0 && self.shape.is_filled(dy as usize, dx as usize)
    }
}
