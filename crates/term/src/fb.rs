//! Framebuffer and style types for terminal rendering.
//!
//! Colors are the eight classic terminal colors so the game looks the same on
//! terminals without truecolor support.

/// Terminal palette color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// The terminal's own default.
    #[default]
    Reset,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    DarkGrey,
}

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    pub const fn fg(fg: Color) -> Self {
        Self {
            fg,
            bg: Color::Reset,
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub const fn dim(self) -> Self {
        Self { dim: true, ..self }
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Cell {
    pub const fn new(ch: char, style: CellStyle) -> Self {
        Self { ch, style }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// 2D framebuffer of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the framebuffer.
    ///
    /// This preserves the underlying allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, Cell { ch, style });
    }

    /// Write a string left to right, clipped at the right edge.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.put_char(cx, y, ch, style);
            cx += 1;
        }
    }

    /// Write a decimal number without allocating.
    pub fn put_u32(&mut self, x: u16, y: u16, value: u32, style: CellStyle) {
        let mut digits = [0u8; 10];
        let mut n = value;
        let mut len = 0;
        loop {
            digits[len] = b'0' + (n % 10) as u8;
            len += 1;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        for (i, d) in digits[..len].iter().rev().enumerate() {
            self.put_char(x.saturating_add(i as u16), y, *d as char, style);
        }
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        for dy in 0..h {
            for dx in 0..w {
                self.put_char(x.saturating_add(dx), y.saturating_add(dy), ch, style);
            }
        }
    }

    /// Collect row `y` as plain text (test and debugging aid).
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|c| c.ch)
            .collect()
    }
}
