//! GameView: maps a [`BoardView`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::BoardView;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::palette::Palette;

/// Terminal columns per board cell.
const CELL_W: u16 = 2;

/// Narrowest side panel worth drawing (fits the longest legend line).
const PANEL_MIN_W: u16 = 14;

const LEGEND: [&str; 7] = [
    "←/A  left",
    "→/D  right",
    "↓/S  soft drop",
    "↑/W  rotate",
    "SPC  hard drop",
    "U    undo",
    "Q    quit",
];

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    palette: Palette,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}

impl GameView {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Render the board into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is resized to the
    /// viewport and fully cleared first.
    pub fn render_into(&self, view: &BoardView<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let frame_w = view.width() * CELL_W + 2;
        let frame_h = view.height() + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let border = CellStyle::fg(Rgb::new(200, 200, 200));
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Locked cells with the active piece overlaid.
        for y in 0..view.height() {
            for x in 0..view.width() {
                let glyph = self.palette.glyph(view.cell(x as i32, y as i32));
                let px = start_x + 1 + x * CELL_W;
                let py = start_y + 1 + y;
                fb.put_char(px, py, glyph.chars[0], glyph.style);
                fb.put_char(px + 1, py, glyph.chars[1], glyph.style);
            }
        }

        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x.saturating_add(PANEL_MIN_W) <= viewport.width {
            self.draw_side_panel(fb, view, panel_x, start_y);
        } else {
            self.draw_status_line(fb, view, start_x, start_y.saturating_add(frame_h));
        }

        if view.game_over {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, view: &BoardView<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(view, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '╔', style);
        fb.put_char(x + w - 1, y, '╗', style);
        fb.put_char(x, y + h - 1, '╚', style);
        fb.put_char(x + w - 1, y + h - 1, '╝', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '═', style);
            fb.put_char(x + dx, y + h - 1, '═', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '║', style);
            fb.put_char(x + w - 1, y + dy, '║', style);
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, view: &BoardView<'_>, x: u16, start_y: u16) {
        let label = CellStyle::fg(Rgb::new(220, 220, 220)).bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200));

        let mut y = start_y;
        for (name, number) in [
            ("SCORE", view.score),
            ("LINES", view.lines),
            ("LEVEL", view.level),
        ] {
            fb.put_str(x, y, name, label);
            fb.put_u32(x, y.saturating_add(1), number, value);
            y = y.saturating_add(3);
        }

        fb.put_str(x, y, "NEXT", label);
        let next = self.palette.glyph(Some(view.next));
        fb.put_char(x, y + 1, next.chars[0], next.style);
        fb.put_char(x + 1, y + 1, next.chars[1], next.style);
        fb.put_str(x + 3, y + 1, view.next.letter(), value);
        y = y.saturating_add(3);

        fb.put_str(x, y, "CONTROLS", label);
        let legend = value.dim();
        for line in LEGEND {
            y = y.saturating_add(1);
            fb.put_str(x, y, line, legend);
        }
    }

    /// One-line fallback when the viewport has no room for the side panel.
    fn draw_status_line(&self, fb: &mut FrameBuffer, view: &BoardView<'_>, x: u16, y: u16) {
        let style = CellStyle::default();
        fb.put_str(x, y, "Score:", style);
        let digits = digit_count(view.score);
        fb.put_u32(x + 6, y, view.score, style);
        let x = x + 6 + digits;
        fb.put_str(x, y, " | Lines:", style);
        fb.put_u32(x + 9, y, view.lines, style);
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::fg(Rgb::new(255, 255, 255)).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

fn digit_count(mut n: u32) -> u16 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
