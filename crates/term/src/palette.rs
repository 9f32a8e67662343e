//! Glyph table: how each cell tag is drawn.
//!
//! Presentation policy lives here rather than in the core. A [`Palette`] is
//! handed to [`GameView`](crate::GameView) at construction.

use crate::fb::{CellStyle, Rgb};
use crate::types::{Cell, PieceKind};

/// Two terminal columns drawn for one board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub chars: [char; 2],
    pub style: CellStyle,
}

impl Glyph {
    pub const fn new(chars: [char; 2], style: CellStyle) -> Self {
        Self { chars, style }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    empty: Glyph,
    /// Indexed in `PieceKind::ALL` order
    pieces: [Glyph; 7],
}

const BOARD_BG: Rgb = Rgb::new(20, 20, 28);

fn block(fg: Rgb) -> Glyph {
    let style = CellStyle {
        bg: BOARD_BG,
        ..CellStyle::fg(fg).bold()
    };
    Glyph::new(['█', '█'], style)
}

impl Palette {
    /// Solid coloured blocks, one colour per kind
    pub fn colored() -> Self {
        Self {
            empty: Glyph::new(
                [' ', ' '],
                CellStyle {
                    bg: BOARD_BG,
                    ..CellStyle::default()
                },
            ),
            pieces: [
                block(Rgb::new(80, 220, 240)),  // I
                block(Rgb::new(90, 120, 250)),  // J
                block(Rgb::new(245, 225, 80)),  // L
                block(Rgb::new(240, 240, 240)), // O
                block(Rgb::new(100, 230, 120)), // S
                block(Rgb::new(220, 110, 230)), // T
                block(Rgb::new(240, 80, 80)),   // Z
            ],
        }
    }

    /// Monochrome letters for terminals without block glyphs
    pub fn ascii() -> Self {
        let style = CellStyle::default();
        let letter = |c: char| Glyph::new([c, c], style);
        Self {
            empty: Glyph::new([' ', ' '], style),
            pieces: [
                letter('I'),
                letter('J'),
                letter('L'),
                letter('O'),
                letter('S'),
                letter('T'),
                letter('Z'),
            ],
        }
    }

    /// Replace the glyph for one piece kind
    pub fn with_piece(mut self, kind: PieceKind, glyph: Glyph) -> Self {
        self.pieces[slot(kind)] = glyph;
        self
    }

    pub fn glyph(&self, cell: Cell) -> Glyph {
        match cell {
            Some(kind) => self.pieces[slot(kind)],
            None => self.empty,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::colored()
    }
}

fn slot(kind: PieceKind) -> usize {
    match kind {
        PieceKind::I => 0,
        PieceKind::J => 1,
        PieceKind::L => 2,
        PieceKind::O => 3,
        PieceKind::S => 4,
        PieceKind::T => 5,
        PieceKind::Z => 6,
    }
}
