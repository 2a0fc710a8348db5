//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and the
//! fixed-timestep loop. It has **no dependency** on the terminal: input
//! arrives through [`InputSource`], time through [`Clock`], and the renderer
//! only ever sees a [`GameSnapshot`].
//!
//! # Module Structure
//!
//! - [`pieces`]: 16-bit tetromino masks and the active piece value
//! - [`board`]: 10x20 grid with placement test, locking and line clearing
//! - [`scoring`]: score, lines, level and gravity interval
//! - [`rng`]: uniform random piece selection
//! - [`game_state`]: active piece, collision engine and game flags
//! - [`game_loop`]: gravity accumulator and input dispatch
//! - [`snapshot`]: read-only frame data for rendering
//!
//! # Game Rules
//!
//! - **Randomizer**: every kind is equally likely on every spawn
//! - **Rotation**: clockwise table lookup, no wall kicks
//! - **Locking**: immediate, as soon as a piece cannot move down
//! - **Scoring**: 100 / 300 / 500 / 800 points times the level for 1-4 rows
//! - **Speed**: a new level every 10 lines, gravity 45ms faster per level
//!   (550ms at level 1, never below 80ms)
//!
//! # Example
//!
//! ```
//! use term_tetris_core::GameState;
//! use term_tetris_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! // The dropped piece is locked and a new one has spawned.
//! assert_eq!(game.piece_count(), 2);
//! assert_eq!(game.board().cells().iter().filter(|c| c.is_some()).count(), 4);
//! ```

pub mod board;
pub mod game_loop;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use term_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_loop::{Clock, Flow, GameLoop, InputSource, MonotonicClock};
pub use game_state::{GameState, GameStatus, LockEvent};
pub use pieces::{get_shape, mask, occupies, Tetromino};
pub use rng::{PieceSource, UniformRandomizer};
pub use scoring::{line_clear_points, tick_ms_for_level, Progression, ScoreResult};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
