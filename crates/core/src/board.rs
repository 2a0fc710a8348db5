//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Pieces may sit partly above the grid (negative y) while they spawn.

use crate::pieces::Tetromino;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether the piece may occupy its current position.
    ///
    /// Every mino must lie within the side walls and above the floor. Minos
    /// above the grid are legal; minos inside it need an empty cell. This is
    /// the only legality check in the game: moves, rotation, the ghost and
    /// spawning all go through it.
    pub fn can_place(&self, piece: &Tetromino) -> bool {
        piece.cells().iter().all(|&(x, y)| {
            if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
                return false;
            }
            y < 0 || !self.is_occupied(x, y)
        })
    }

    /// Write the piece into the grid.
    ///
    /// Minos above the visible grid are dropped.
    pub fn lock(&mut self, piece: &Tetromino) {
        for (x, y) in piece.cells() {
            self.set(x, y, Some(piece.kind));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Remove row `y`, shift all rows above down by one and empty the top row.
    fn collapse_row(&mut self, y: usize) {
        let width = BOARD_WIDTH as usize;

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, row * width);
        }

        self.cells[..width].fill(None);
    }

    /// Clear all full rows and return how many were removed.
    ///
    /// Scans bottom to top. After a collapse the same index holds the row that
    /// used to sit above it, so it is examined again before moving up.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = BOARD_HEIGHT as usize;

        while y > 0 {
            if self.is_row_full(y - 1) {
                self.collapse_row(y - 1);
                cleared += 1;
            } else {
                y -= 1;
            }
        }

        cleared
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write the numeric grid: `0` for empty, `shape id + 1` otherwise.
    pub fn write_u8_grid(
        &self,
        out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    ) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = self.cells[y * width + x].map_or(0, PieceKind::cell_value);
            }
        }
    }

    /// Build a board from the numeric grid form.
    pub fn from_u8_grid(grid: &[[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) -> Self {
        let mut board = Self::new();
        let width = BOARD_WIDTH as usize;
        for (y, row) in grid.iter().enumerate() {
            for (x, v) in row.iter().enumerate() {
                board.cells[y * width + x] = PieceKind::from_cell_value(*v);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
