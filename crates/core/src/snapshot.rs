use crate::pieces::Tetromino;
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, TICK_MS_INITIAL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

impl From<ActiveSnapshot> for Tetromino {
    fn from(value: ActiveSnapshot) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

/// Read-only view of one frame, handed to the renderer.
///
/// `board` holds `0` for empty cells and `shape id + 1` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub tick_ms: u32,
    pub paused: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            score: 0,
            lines: 0,
            level: 1,
            tick_ms: TICK_MS_INITIAL,
            paused: false,
            game_over: false,
        }
    }
}
