//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{get_shape, GameSnapshot};
use crate::fb::{Cell, CellStyle, Color, FrameBuffer};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH, MIN_VIEWPORT_HEIGHT, MIN_VIEWPORT_WIDTH};

/// Width of the side panel in columns.
const PANEL_W: u16 = 12;

/// Gap between the well border and the side panel.
const PANEL_GAP: u16 = 2;

const TITLE: &str = "TERMINAL TETRIS";

const CONTROLS: [&str; 6] = [
    "\u{2190}\u{2192}  move",
    "\u{2191}   rotate",
    "\u{2193}   down",
    "SPC drop",
    "P   pause",
    "Q   quit",
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

/// Whether the viewport can show the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportFit {
    Fits,
    /// Only the "too small" notice was drawn; the caller should pause.
    TooSmall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Check a viewport against the minimum playable size.
    pub fn fit(viewport: Viewport) -> ViewportFit {
        if viewport.width < MIN_VIEWPORT_WIDTH || viewport.height < MIN_VIEWPORT_HEIGHT {
            ViewportFit::TooSmall
        } else {
            ViewportFit::Fits
        }
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames; it is resized to the viewport as needed.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) -> ViewportFit {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        if Self::fit(viewport) == ViewportFit::TooSmall {
            self.draw_too_small(fb, viewport);
            return ViewportFit::TooSmall;
        }

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = BOARD_HEIGHT as u16;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let total_w = frame_w + PANEL_GAP + PANEL_W;
        let start_x = viewport.width.saturating_sub(total_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        if start_y > 0 {
            fb.put_str(start_x, start_y - 1, TITLE, CellStyle::fg(Color::White).bold());
        }

        self.draw_border(fb, start_x, start_y, frame_w, frame_h);

        // Locked board cells.
        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                match PieceKind::from_cell_value(snap.board[y as usize][x as usize]) {
                    Some(kind) => self.draw_block(fb, start_x, start_y, x, y, kind),
                    None => self.draw_empty_cell(fb, start_x, start_y, x, y),
                }
            }
        }

        // Ghost piece, then the active piece on top of it.
        if let Some(active) = snap.active {
            let shape = get_shape(active.kind, active.rotation);

            if let Some(ghost_y) = snap.ghost_y {
                let style = CellStyle::fg(piece_color(active.kind)).dim();
                for &(dx, dy) in shape.iter() {
                    if let Some((x, y)) = visible(active.x + dx, ghost_y + dy) {
                        self.fill_cell_rect(fb, start_x, start_y, x, y, '\u{2591}', style);
                    }
                }
            }

            for &(dx, dy) in shape.iter() {
                if let Some((x, y)) = visible(active.x + dx, active.y + dy) {
                    self.draw_block(fb, start_x, start_y, x, y, active.kind);
                }
            }
        }

        let panel_x = start_x + frame_w + PANEL_GAP;
        self.draw_side_panel(fb, snap, viewport, panel_x, start_y);

        // Overlays.
        if snap.game_over {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        } else if snap.paused {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "PAUSED");
        }

        ViewportFit::Fits
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Closing screen shown after the player quits.
    pub fn render_summary(&self, score: u32, lines: u32, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        let style = CellStyle::fg(Color::White).bold();

        let result = format!("Final score: {}  Lines: {}", score, lines);
        let prompt = "Press any key to exit.";
        let mid_y = viewport.height / 2;

        fb.put_str(centered(viewport.width, &result), mid_y.saturating_sub(1), &result, style);
        fb.put_str(centered(viewport.width, prompt), mid_y, prompt, CellStyle::default());
        fb
    }

    fn draw_too_small(&self, fb: &mut FrameBuffer, viewport: Viewport) {
        let style = CellStyle::fg(Color::Yellow).bold();
        let mid_y = viewport.height / 2;
        let first = "Terminal too small";
        let second = "Enlarge the window to play";
        fb.put_str(centered(viewport.width, first), mid_y.saturating_sub(1), first, style);
        fb.put_str(centered(viewport.width, second), mid_y, second, CellStyle::default());
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        let style = CellStyle::fg(Color::White).bold();

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16) {
        let style = CellStyle::fg(Color::DarkGrey).dim();
        self.fill_cell_rect(fb, start_x, start_y, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16, kind: PieceKind) {
        let style = CellStyle::fg(piece_color(kind)).bold();
        self.fill_cell_rect(fb, start_x, start_y, x, y, '█', style);
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y;
        fb.fill_rect(px, py, self.cell_w, 1, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, panel_x: u16, start_y: u16) {
        let label = CellStyle::fg(Color::White).bold();
        let value = CellStyle::default();

        let mut y = start_y;
        for (name, v) in [("SCORE", snap.score), ("LINES", snap.lines), ("LEVEL", snap.level)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, v, value);
            y += 3;
        }

        if snap.game_over {
            fb.put_str(panel_x, y, "GAME OVER", CellStyle::fg(Color::Red).bold());
        } else if snap.paused {
            fb.put_str(panel_x, y, "PAUSED", CellStyle::fg(Color::Yellow).bold());
        }
        y += 2;

        let hint = CellStyle::fg(Color::DarkGrey);
        for line in CONTROLS {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y += 1;
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, frame_w: u16, frame_h: u16, text: &str) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        fb.put_str(x, mid_y, text, CellStyle::fg(Color::White).bold());
    }
}

/// Colors match the classic curses palette, one per kind.
pub fn piece_color(kind: PieceKind) -> Color {
    match kind {
        PieceKind::I => Color::Cyan,
        PieceKind::O => Color::Yellow,
        PieceKind::T => Color::Magenta,
        PieceKind::S => Color::Green,
        PieceKind::Z => Color::Red,
        PieceKind::J => Color::Blue,
        PieceKind::L => Color::White,
    }
}

/// Grid coordinates inside the visible well, if any.
fn visible(x: i8, y: i8) -> Option<(u16, u16)> {
    if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
        Some((x as u16, y as u16))
    } else {
        None
    }
}

fn centered(width: u16, text: &str) -> u16 {
    width.saturating_sub(text.chars().count() as u16) / 2
}
