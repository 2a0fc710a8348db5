//! Tetromino table tests

use term_tetris::core::{get_shape, mask, occupies, Tetromino};
use term_tetris::types::{PieceKind, Rotation, SPAWN_X, SPAWN_Y};

fn rows(kind: PieceKind, rotation: i32) -> [String; 4] {
    let mut out: [String; 4] = Default::default();
    for (row, line) in out.iter_mut().enumerate() {
        for col in 0..4 {
            line.push(if occupies(kind, rotation, row as i32, col) { '#' } else { '.' });
        }
    }
    out
}

#[test]
fn test_o_piece_is_rotation_invariant() {
    for r in 0..4 {
        assert_eq!(mask(PieceKind::O, r), 0x0660);
    }
    assert_eq!(rows(PieceKind::O, 0), ["....", ".##.", ".##.", "...."]);
}

#[test]
fn test_t_piece_rotations() {
    assert_eq!(rows(PieceKind::T, 0), ["....", "###.", ".#..", "...."]);
    assert_eq!(rows(PieceKind::T, 1), [".#..", "##..", ".#..", "...."]);
    assert_eq!(rows(PieceKind::T, 2), [".#..", "###.", "....", "...."]);
    assert_eq!(rows(PieceKind::T, 3), [".#..", ".##.", ".#..", "...."]);
}

#[test]
fn test_s_and_z_have_two_distinct_states() {
    for kind in [PieceKind::S, PieceKind::Z] {
        assert_eq!(mask(kind, 0), mask(kind, 2));
        assert_eq!(mask(kind, 1), mask(kind, 3));
        assert_ne!(mask(kind, 0), mask(kind, 1));
    }
}

#[test]
fn test_j_and_l_spawn_shapes() {
    assert_eq!(rows(PieceKind::J, 0), ["....", "#...", "###.", "...."]);
    assert_eq!(rows(PieceKind::L, 0), ["....", "..#.", "###.", "...."]);
}

#[test]
fn test_any_rotation_index_is_accepted() {
    for kind in PieceKind::ALL {
        assert_eq!(rows(kind, -3), rows(kind, 1));
        assert_eq!(rows(kind, 9), rows(kind, 1));
        assert_eq!(rows(kind, i32::MIN), rows(kind, 0));
    }
}

#[test]
fn test_shape_offsets_agree_with_occupancy() {
    for kind in PieceKind::ALL {
        for r in 0..4 {
            let rotation = Rotation::from_index(r);
            let shape = get_shape(kind, rotation);
            for (col, row) in shape {
                assert!(occupies(kind, r, row as i32, col as i32));
            }
            let mut unique = shape.to_vec();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), 4);
        }
    }
}

#[test]
fn test_spawned_piece_is_centered() {
    let piece = Tetromino::new(PieceKind::I);
    assert_eq!((piece.x, piece.y), (SPAWN_X, SPAWN_Y));
    let xs: Vec<i8> = piece.cells().iter().map(|&(x, _)| x).collect();
    assert_eq!(xs, vec![3, 4, 5, 6]);
}
