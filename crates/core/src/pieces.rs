//! Pieces module - tetromino shapes and the active piece value
//!
//! Every shape is a 4x4 occupancy box packed into a 16-bit mask, read row by
//! row from the most significant bit: bit `15 - (row * 4 + col)` set means the
//! cell at (`row`, `col`) is occupied. Rotation is a plain table lookup; there
//! are no wall kicks.

use crate::types::{PieceKind, Rotation, SPAWN_X, SPAWN_Y};

/// Offset of a single mino relative to piece origin, as (col, row)
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Occupancy masks indexed by `[shape id][rotation index]`.
pub const TETROMINO_MASKS: [[u16; 4]; 7] = [
    [0x0F00, 0x2222, 0x00F0, 0x4444], // I
    [0x0660, 0x0660, 0x0660, 0x0660], // O
    [0x0E40, 0x4C40, 0x4E00, 0x4640], // T
    [0x06C0, 0x4620, 0x06C0, 0x4620], // S
    [0x0C60, 0x2640, 0x0C60, 0x2640], // Z
    [0x08E0, 0x6440, 0x0E20, 0x44C0], // J
    [0x02E0, 0x4460, 0x0E80, 0xC440], // L
];

/// Mask for a kind at any rotation index (taken modulo 4).
pub fn mask(kind: PieceKind, rotation: i32) -> u16 {
    TETROMINO_MASKS[kind.index()][rotation.rem_euclid(4) as usize]
}

/// Whether (`row`, `col`) of the piece's 4x4 box is occupied.
///
/// Total over all inputs: cells outside the box are simply empty.
pub fn occupies(kind: PieceKind, rotation: i32, row: i32, col: i32) -> bool {
    if !(0..4).contains(&row) || !(0..4).contains(&col) {
        return false;
    }
    let bit = 15 - (row * 4 + col);
    (mask(kind, rotation) >> bit) & 1 == 1
}

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    let m = mask(kind, rotation.index() as i32);
    let mut shape = [(0, 0); 4];
    let mut n = 0;
    for row in 0..4i8 {
        for col in 0..4i8 {
            if (m >> (15 - (row * 4 + col))) & 1 == 1 && n < 4 {
                shape[n] = (col, row);
                n += 1;
            }
        }
    }
    shape
}

/// Active falling piece
///
/// A plain value: every proposed move builds a new `Tetromino` which only
/// replaces the active one after the board accepts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at the spawn anchor
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute grid coordinates of the four minos.
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn rotated(&self) -> Self {
        Self {
            rotation: self.rotation.rotate_cw(),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mask_has_four_cells() {
        for row in TETROMINO_MASKS.iter() {
            for m in row.iter() {
                assert_eq!(m.count_ones(), 4, "mask {:#06x}", m);
            }
        }
    }

    #[test]
    fn rotation_index_is_taken_modulo_four() {
        for kind in PieceKind::ALL {
            for r in 0..4 {
                assert_eq!(mask(kind, r), mask(kind, r + 4));
                assert_eq!(mask(kind, r), mask(kind, r - 4));
            }
        }
    }

    #[test]
    fn i_piece_spawns_horizontal_on_second_row() {
        assert_eq!(
            get_shape(PieceKind::I, Rotation::North),
            [(0, 1), (1, 1), (2, 1), (3, 1)]
        );
        assert_eq!(
            get_shape(PieceKind::I, Rotation::East),
            [(2, 0), (2, 1), (2, 2), (2, 3)]
        );
    }

    #[test]
    fn occupies_is_false_outside_box() {
        assert!(!occupies(PieceKind::O, 0, -1, 1));
        assert!(!occupies(PieceKind::O, 0, 1, 4));
        assert!(occupies(PieceKind::O, 0, 1, 1));
        assert!(occupies(PieceKind::O, 0, 2, 2));
    }

    #[test]
    fn tetromino_spawns_at_anchor() {
        let piece = Tetromino::new(PieceKind::T);
        assert_eq!(piece.rotation, Rotation::North);
        assert_eq!((piece.x, piece.y), (3, -2));
    }

    #[test]
    fn candidates_leave_original_untouched() {
        let piece = Tetromino::new(PieceKind::L);
        let moved = piece.shifted(1, 2);
        let turned = piece.rotated();
        assert_eq!((moved.x, moved.y), (4, 0));
        assert_eq!(turned.rotation, Rotation::East);
        assert_eq!(piece, Tetromino::new(PieceKind::L));
    }
}
