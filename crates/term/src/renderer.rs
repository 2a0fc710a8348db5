//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a resize) is a full redraw; after that
//! only runs of changed cells are written.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crossterm::{
    cursor,
    style::{self, Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, Color, FrameBuffer};

/// Owns stdout while the game runs in raw mode on the alternate screen.
pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Frame currently on screen; `None` forces a full redraw.
    shown: Option<FrameBuffer>,
    out: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            out: Vec::with_capacity(16 * 1024),
        }
    }

    /// Switch to raw mode and the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enabling raw mode")?;
        self.out.clear();
        self.out
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.flush().context("entering alternate screen")
    }

    /// Restore the terminal to its normal state.
    pub fn exit(&mut self) -> Result<()> {
        self.out.clear();
        self.out
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush().context("leaving alternate screen")?;
        terminal::disable_raw_mode().context("disabling raw mode")
    }

    /// Force the next draw to be a full redraw.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Show `fb`, then hand the previously shown frame back through `fb`.
    ///
    /// Keeping one framebuffer on each side means no per-frame allocation once
    /// the terminal size settles.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.out.clear();

        let mut previous = match self.shown.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.out)?;
                prev
            }
            _ => {
                encode_full_into(fb, &mut self.out)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.flush()?;

        std::mem::swap(&mut previous, fb);
        self.shown = Some(previous);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.out)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a full-frame redraw into `out`.
///
/// Nothing is written to the terminal; the bytes are queued crossterm commands.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut pen = Pen::default();
    for y in 0..fb.height() {
        pen.write_run(fb, 0, y, fb.width(), out)?;
    }
    pen.finish(out)
}

/// Encode only the cells that differ between `prev` and `next` into `out`.
///
/// Both frames must have the same size; `TerminalRenderer` falls back to a
/// full redraw otherwise.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();
    for (x, y, len) in changed_runs(prev, next) {
        pen.write_run(next, x, y, len, out)?;
    }
    pen.finish(out)
}

/// Tracks the active style so consecutive cells only emit SGR codes on change.
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn write_run(&mut self, fb: &FrameBuffer, x: u16, y: u16, len: u16, out: &mut Vec<u8>) -> Result<()> {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let cell = fb.get(x + dx, y).unwrap_or_default();
            if self.style != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                self.style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        out.queue(ResetColor)?.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?
        .queue(SetForegroundColor(to_crossterm(style.fg)))?
        .queue(SetBackgroundColor(to_crossterm(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn to_crossterm(color: Color) -> style::Color {
    match color {
        Color::Reset => style::Color::Reset,
        Color::Black => style::Color::Black,
        Color::Red => style::Color::DarkRed,
        Color::Green => style::Color::DarkGreen,
        Color::Yellow => style::Color::DarkYellow,
        Color::Blue => style::Color::DarkBlue,
        Color::Magenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::DarkCyan,
        Color::White => style::Color::Grey,
        Color::DarkGrey => style::Color::DarkGrey,
    }
}

/// Horizontal runs `(x, y, len)` of cells that differ between two equal-sized
/// frames, top to bottom and left to right.
fn changed_runs<'a>(prev: &'a FrameBuffer, next: &'a FrameBuffer) -> impl Iterator<Item = (u16, u16, u16)> + 'a {
    let w = next.width();
    (0..next.height()).flat_map(move |y| {
        let differs = move |x: u16| prev.get(x, y) != next.get(x, y);
        let mut x = 0;
        std::iter::from_fn(move || {
            while x < w && !differs(x) {
                x += 1;
            }
            if x >= w {
                return None;
            }
            let start = x;
            while x < w && differs(x) {
                x += 1;
            }
            Some((start, y, x - start))
        })
    })
}
