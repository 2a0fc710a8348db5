//! Non-blocking terminal input for the game loop.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event};

use term_tetris_core::InputSource;

use crate::map::action_for_key;
use crate::types::GameAction;

/// Polls crossterm without waiting.
///
/// At most one terminal event is consumed per call. Events that do not map to
/// an action (resizes, mouse, unknown keys) are dropped and report `None`.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    pub fn new() -> Self {
        Self
    }

    /// Block until any key is pressed.
    pub fn wait_for_key(&mut self) -> io::Result<()> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Press {
                    return Ok(());
                }
            }
        }
    }
}

impl InputSource for TerminalInput {
    type Error = io::Error;

    fn poll_action(&mut self) -> io::Result<Option<GameAction>> {
        if !event::poll(Duration::ZERO)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => Ok(action_for_key(key)),
            _ => Ok(None),
        }
    }
}
