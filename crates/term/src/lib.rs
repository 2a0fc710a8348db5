//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It renders into a simple framebuffer that can be flushed to a terminal
//! backend, rather than using a widget toolkit.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Lay out the well, ghost and side panel without any I/O (`GameView`)
//! - Two terminal columns per cell to compensate for glyph aspect ratio

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use term_tetris_core as core;
pub use term_tetris_types as types;

pub use fb::{Cell, CellStyle, Color, FrameBuffer};
pub use game_view::{piece_color, AnchorY, GameView, Viewport, ViewportFit};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
