//! Fixed-timestep driver.
//!
//! One call to [`GameLoop::frame`] is one loop iteration: measure elapsed
//! time, run any gravity ticks that are due, then poll and dispatch at most one
//! input event. Rendering and the idle sleep belong to the caller, which keeps
//! this module free of terminal I/O and lets tests drive it with a manual
//! clock and a scripted input source.

use std::time::Instant;

use log::trace;

use crate::game_state::GameState;
use crate::rng::{PieceSource, UniformRandomizer};
use crate::types::GameAction;

/// Monotonic time source measured in millisecond deltas.
pub trait Clock {
    /// Milliseconds since the previous call (or since creation).
    fn delta_ms(&mut self) -> u32;
}

/// [`Clock`] backed by [`Instant`].
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    last: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn delta_ms(&mut self) -> u32 {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX)
    }
}

/// Non-blocking source of player commands.
pub trait InputSource {
    type Error;

    /// Next recognised command, or `None` when nothing is pending.
    ///
    /// Must return immediately.
    fn poll_action(&mut self) -> Result<Option<GameAction>, Self::Error>;
}

/// Whether the loop should keep going after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the game state and the gravity accumulator.
#[derive(Debug)]
pub struct GameLoop<C, S = UniformRandomizer> {
    state: GameState<S>,
    clock: C,
    fall_accum_ms: u32,
}

impl<C: Clock, S: PieceSource> GameLoop<C, S> {
    /// Wrap a game, starting it if needed.
    pub fn new(mut state: GameState<S>, clock: C) -> Self {
        state.start();
        Self {
            state,
            clock,
            fall_accum_ms: 0,
        }
    }

    pub fn state(&self) -> &GameState<S> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState<S> {
        &mut self.state
    }

    /// Time banked towards the next gravity tick.
    pub fn fall_accum_ms(&self) -> u32 {
        self.fall_accum_ms
    }

    /// Run one loop iteration.
    pub fn frame<I: InputSource>(&mut self, input: &mut I) -> Result<Flow, I::Error> {
        let elapsed = self.clock.delta_ms();
        self.advance(elapsed);

        match input.poll_action()? {
            Some(GameAction::Quit) => Ok(Flow::Quit),
            Some(action) => {
                self.state.apply_action(action);
                Ok(Flow::Continue)
            }
            None => Ok(Flow::Continue),
        }
    }

    /// Bank `elapsed_ms` and perform every gravity tick that is due.
    ///
    /// Nothing accumulates while paused or after game over. The interval is
    /// re-read on every pass so a level-up during catch-up applies at once.
    /// Returns the number of ticks performed.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        if self.state.paused() || self.state.game_over() {
            return 0;
        }

        self.fall_accum_ms = self.fall_accum_ms.saturating_add(elapsed_ms);

        let mut ticks = 0;
        while self.fall_accum_ms >= self.state.tick_ms() {
            self.fall_accum_ms -= self.state.tick_ms();
            self.state.soft_drop();
            ticks += 1;

            if self.state.game_over() {
                break;
            }
        }

        if ticks > 1 {
            trace!("gravity caught up {} ticks", ticks);
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::convert::Infallible;

    use crate::types::{PieceKind, SPAWN_Y, TICK_MS_INITIAL};

    struct StepClock(VecDeque<u32>);

    impl Clock for StepClock {
        fn delta_ms(&mut self) -> u32 {
            self.0.pop_front().unwrap_or(0)
        }
    }

    struct Keys(VecDeque<GameAction>);

    impl InputSource for Keys {
        type Error = Infallible;

        fn poll_action(&mut self) -> Result<Option<GameAction>, Infallible> {
            Ok(self.0.pop_front())
        }
    }

    struct Repeat(PieceKind);

    impl PieceSource for Repeat {
        fn next_kind(&mut self) -> PieceKind {
            self.0
        }
    }

    fn game(deltas: &[u32]) -> GameLoop<StepClock, Repeat> {
        GameLoop::new(
            GameState::with_source(Repeat(PieceKind::T)),
            StepClock(deltas.iter().copied().collect()),
        )
    }

    #[test]
    fn test_new_starts_game() {
        let lp = game(&[]);
        assert!(lp.state().started());
        assert!(lp.state().active().is_some());
    }

    #[test]
    fn test_gravity_waits_for_full_interval() {
        let mut lp = game(&[TICK_MS_INITIAL - 1, 1]);
        let mut keys = Keys(VecDeque::new());

        assert_eq!(lp.frame(&mut keys), Ok(Flow::Continue));
        assert_eq!(lp.state().active().unwrap().y, SPAWN_Y);

        lp.frame(&mut keys).unwrap();
        assert_eq!(lp.state().active().unwrap().y, SPAWN_Y + 1);
        assert_eq!(lp.fall_accum_ms(), 0);
    }

    #[test]
    fn test_stalled_frame_catches_up() {
        let mut lp = game(&[]);
        assert_eq!(lp.advance(TICK_MS_INITIAL * 3 + 10), 3);
        assert_eq!(lp.state().active().unwrap().y, SPAWN_Y + 3);
        assert_eq!(lp.fall_accum_ms(), 10);
    }

    #[test]
    fn test_paused_time_is_not_banked() {
        let mut lp = game(&[]);
        lp.state_mut().toggle_pause();
        assert_eq!(lp.advance(10_000), 0);
        assert_eq!(lp.fall_accum_ms(), 0);
    }

    #[test]
    fn test_quit_stops_loop_even_when_paused() {
        let mut lp = game(&[]);
        let mut keys = Keys(VecDeque::from([GameAction::Pause, GameAction::Quit]));

        assert_eq!(lp.frame(&mut keys), Ok(Flow::Continue));
        assert!(lp.state().paused());
        assert_eq!(lp.frame(&mut keys), Ok(Flow::Quit));
    }

    #[test]
    fn test_one_event_per_frame() {
        let mut lp = game(&[]);
        let mut keys = Keys(VecDeque::from([GameAction::MoveLeft, GameAction::MoveLeft]));

        lp.frame(&mut keys).unwrap();
        assert_eq!(lp.state().active().unwrap().x, 2);
        assert_eq!(keys.0.len(), 1);
    }
}
