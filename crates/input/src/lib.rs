//! Terminal input module (loop-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and exposes a
//! non-blocking [`TerminalInput`] that the game loop polls once per frame.

pub mod map;
pub mod source;

pub use term_tetris_types as types;

pub use map::{action_for_key, handle_key_event, should_quit};
pub use source::TerminalInput;
