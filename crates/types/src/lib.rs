//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, so they
//! can be shared by the game logic, the input mapping and the terminal view.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Spawn anchor**: (3, -2), two rows above the visible well
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS_INITIAL` | 550 | Gravity interval at level 1 |
//! | `TICK_MS_STEP` | 45 | Interval reduction per level |
//! | `TICK_MS_MIN` | 80 | Gravity interval floor |
//! | `FRAME_SLEEP_MS` | 8 | Idle sleep between loop iterations |
//!
//! # Examples
//!
//! ```
//! use term_tetris_types::{GameAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_index(2), Some(PieceKind::T));
//! assert_eq!(PieceKind::T.cell_value(), 3);
//!
//! assert_eq!(Rotation::from_index(5), Rotation::East);
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//!
//! assert!(GameAction::Quit.always_available());
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Column of the spawn anchor: centers the 4-wide bounding box.
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 2;

/// Row of the spawn anchor, above the visible grid.
pub const SPAWN_Y: i8 = -2;

/// Gravity interval at level 1.
pub const TICK_MS_INITIAL: u32 = 550;

/// Gravity interval floor.
pub const TICK_MS_MIN: u32 = 80;

/// Gravity interval reduction applied per level gained.
pub const TICK_MS_STEP: u32 = 45;

/// Cleared lines needed per level.
pub const LEVEL_UP_LINES: u32 = 10;

/// Points for clearing 0..=4 rows with one lock, multiplied by the level.
pub const LINE_REWARDS: [u32; 5] = [0, 100, 300, 500, 800];

/// Idle sleep between loop iterations.
pub const FRAME_SLEEP_MS: u64 = 8;

/// Smallest terminal width that fits the well plus the side panel.
pub const MIN_VIEWPORT_WIDTH: u16 = 38;

/// Smallest terminal height that fits the well plus its border.
pub const MIN_VIEWPORT_HEIGHT: u16 = 22;

/// The seven tetromino piece kinds
///
/// The declaration order is the shape id used by the tetromino table and the
/// numeric grid (`shape id + 1`):
/// - **I** (0): cyan bar
/// - **O** (1): yellow square
/// - **T** (2): magenta
/// - **S** (3): green
/// - **Z** (4): red
/// - **J** (5): blue
/// - **L** (6): white
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in shape-id order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Shape id (0..=6).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Value stored in the numeric grid for a cell occupied by this kind (1..=7).
    pub fn cell_value(self) -> u8 {
        self as u8 + 1
    }

    /// Inverse of [`PieceKind::cell_value`]; `0` and out-of-range values are empty.
    pub fn from_cell_value(value: u8) -> Option<Self> {
        match value {
            0 => None,
            v => Self::from_index(v as usize - 1),
        }
    }
}

/// Rotation states, clockwise from the spawn orientation.
///
/// The cycle goes: North → East → South → West → North. The numeric index
/// (0..=3) selects the column of the tetromino table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Build a rotation from any integer index, taken modulo 4.
    pub fn from_index(index: i32) -> Self {
        match index.rem_euclid(4) {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use term_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::East.rotate_cw(), Rotation::South);
    /// assert_eq!(Rotation::South.rotate_cw(), Rotation::West);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }
}

/// Player commands recognised by the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell, locking it if it cannot descend
    SoftDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Drop piece as far as it goes and lock it
    HardDrop,
    /// Toggle pause
    Pause,
    /// Leave the game loop
    Quit,
}

impl GameAction {
    /// Whether the action is accepted while the game is paused.
    ///
    /// Pause must stay reachable to resume; quit is always honoured.
    pub fn always_available(self) -> bool {
        matches!(self, GameAction::Pause | GameAction::Quit)
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the specified piece kind
pub type Cell = Option<PieceKind>;
