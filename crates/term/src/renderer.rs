//! TerminalRenderer: flushes a framebuffer to a terminal.
//!
//! Every frame is a full repaint. Each row is addressed with an absolute
//! cursor move and printed as runs of equally styled cells; escape sequences
//! are only emitted where the style actually changes.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Owns the terminal session: raw mode, alternate screen and cursor.
///
/// Generic over the output so frames can be captured in tests; the default
/// writes to stdout.
pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    buf: Vec<u8>,
    raw: bool,
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(64 * 1024),
            raw: false,
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Enter raw mode (no echo, unbuffered keys) on the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.raw = true;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Restore the terminal. Does nothing unless `enter` got as far as raw mode.
    pub fn exit(&mut self) -> Result<()> {
        if !self.raw {
            return Ok(());
        }
        self.raw = false;
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Clear the screen and paint the whole framebuffer.
    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.buf.clear();
        encode_full_into(fb, &mut self.buf)?;
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out` without touching the terminal.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut pen: Option<CellStyle> = None;
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..fb.width() {
            let cell = fb.get(x, y).unwrap_or_default();
            restyle(out, pen, cell.style)?;
            pen = Some(cell.style);
            out.queue(Print(cell.ch))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Switch the pen from `from` to `to` with as few sequences as possible.
///
/// Clearing bold or dim needs a full attribute reset, which also drops both
/// colours, so those are re-sent afterwards.
fn restyle(out: &mut Vec<u8>, from: Option<CellStyle>, to: CellStyle) -> Result<()> {
    let attrs_changed = from.map_or(true, |f| f.bold != to.bold || f.dim != to.dim);
    if attrs_changed {
        out.queue(SetAttribute(Attribute::Reset))?;
        if to.bold {
            out.queue(SetAttribute(Attribute::Bold))?;
        }
        if to.dim {
            out.queue(SetAttribute(Attribute::Dim))?;
        }
    }

    let keep = from.filter(|_| !attrs_changed);
    if keep.map_or(true, |f| f.fg != to.fg) {
        out.queue(SetForegroundColor(rgb_to_color(to.fg)))?;
    }
    if keep.map_or(true, |f| f.bg != to.bg) {
        out.queue(SetBackgroundColor(rgb_to_color(to.bg)))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
