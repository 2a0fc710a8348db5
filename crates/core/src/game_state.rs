//! Game state module - manages the complete game state
//!
//! This module ties together the board, the active piece, the randomizer and
//! the progression rules. Every move follows the same pattern: build a
//! candidate [`Tetromino`], ask [`Board::can_place`], and only then replace
//! the active piece.

use log::{debug, info};

use crate::board::Board;
use crate::pieces::Tetromino;
use crate::rng::{PieceSource, UniformRandomizer};
use crate::scoring::Progression;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, PieceKind};

/// Gameplay state as seen by the loop and the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Paused,
    GameOver,
}

/// Record of the most recent lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub points: u32,
    /// New level, if this lock crossed a level threshold.
    pub level_up: Option<u32>,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<S = UniformRandomizer> {
    board: Board,
    active: Option<Tetromino>,
    source: S,
    progression: Progression,
    /// Number of pieces that spawned successfully.
    piece_count: u32,
    last_event: Option<LockEvent>,
    paused: bool,
    game_over: bool,
    started: bool,
}

impl GameState<UniformRandomizer> {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u64) -> Self {
        Self::with_source(UniformRandomizer::new(seed))
    }
}

impl<S: PieceSource> GameState<S> {
    /// Create a new game drawing pieces from `source`.
    pub fn with_source(source: S) -> Self {
        Self::with_board(Board::new(), source)
    }

    /// Create a game on a prepared board.
    pub fn with_board(board: Board, source: S) -> Self {
        Self {
            board,
            active: None,
            source,
            progression: Progression::new(),
            piece_count: 0,
            last_event: None,
            paused: false,
            game_over: false,
            started: false,
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_piece();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn status(&self) -> GameStatus {
        if self.game_over {
            GameStatus::GameOver
        } else if self.paused {
            GameStatus::Paused
        } else {
            GameStatus::Running
        }
    }

    pub fn score(&self) -> u32 {
        self.progression.score()
    }

    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    pub fn lines(&self) -> u32 {
        self.progression.lines()
    }

    /// Current gravity interval.
    pub fn tick_ms(&self) -> u32 {
        self.progression.tick_ms()
    }

    pub fn piece_count(&self) -> u32 {
        self.piece_count
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.score = self.progression.score();
        out.lines = self.progression.lines();
        out.level = self.progression.level();
        out.tick_ms = self.progression.tick_ms();
        out.paused = self.paused;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Spawn a new piece at the top of the well.
    ///
    /// If the spawn position is already illegal the game is over and the
    /// board is left untouched.
    pub fn spawn_piece(&mut self) -> bool {
        let piece = Tetromino::new(self.source.next_kind());

        if !self.board.can_place(&piece) {
            info!(
                "spawn of {:?} blocked, game over: score={} lines={} level={}",
                piece.kind,
                self.score(),
                self.lines(),
                self.level()
            );
            self.active = None;
            self.game_over = true;
            return false;
        }

        self.active = Some(piece);
        self.piece_count = self.piece_count.wrapping_add(1);
        debug!("spawned {:?} (piece #{})", piece.kind, self.piece_count);
        true
    }

    /// Replace the active piece with `candidate` if the board accepts it.
    fn commit(&mut self, candidate: Tetromino) -> bool {
        if self.board.can_place(&candidate) {
            self.active = Some(candidate);
            true
        } else {
            false
        }
    }

    /// Shift the active piece horizontally. Illegal moves are ignored.
    pub fn try_shift(&mut self, dx: i8) -> bool {
        match self.active {
            Some(active) => self.commit(active.shifted(dx, 0)),
            None => false,
        }
    }

    /// Rotate clockwise in place. No kicks: if the rotated piece does not
    /// fit where it stands, nothing happens.
    pub fn try_rotate(&mut self) -> bool {
        match self.active {
            Some(active) => self.commit(active.rotated()),
            None => false,
        }
    }

    /// Move the piece down one row, or lock it if it has landed.
    ///
    /// Shared by the down key and the gravity tick. Returns `true` when the
    /// piece fell and `false` when it locked (or there was nothing to drop).
    pub fn soft_drop(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        if self.commit(active.shifted(0, 1)) {
            return true;
        }

        self.lock_piece();
        false
    }

    /// Drop the piece as far as it goes, then lock it with one soft drop.
    ///
    /// Returns the number of rows the piece descended.
    pub fn hard_drop(&mut self) -> u32 {
        let Some(mut active) = self.active else {
            return 0;
        };

        let mut distance = 0;
        while self.board.can_place(&active.shifted(0, 1)) {
            active = active.shifted(0, 1);
            distance += 1;
        }
        self.active = Some(active);

        self.soft_drop();
        distance
    }

    /// Lock the active piece, clear rows, update progression and spawn the
    /// next piece.
    pub fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board.lock(&active);
        let cleared = self.board.clear_full_rows();
        let result = self.progression.record_clear(cleared);

        let event = LockEvent {
            kind: active.kind,
            lines_cleared: cleared as u32,
            points: result.points,
            level_up: result.level_up,
        };
        debug!(
            "locked {:?} at ({}, {}): {} line(s), +{} points",
            active.kind, active.x, active.y, cleared, result.points
        );
        if let Some(level) = result.level_up {
            info!(
                "level {} reached, gravity interval now {}ms",
                level,
                self.progression.tick_ms()
            );
        }
        self.last_event = Some(event);

        self.spawn_piece();
    }

    /// Row the active piece would come to rest on if hard-dropped now.
    pub fn ghost_y(&self) -> Option<i8> {
        let mut ghost = self.active?;
        while self.board.can_place(&ghost.shifted(0, 1)) {
            ghost = ghost.shifted(0, 1);
        }
        Some(ghost.y)
    }

    /// Toggle pause. Has no effect once the game is over.
    pub fn toggle_pause(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.paused = !self.paused;
        true
    }

    /// Pause regardless of the current state (e.g. the terminal became too small).
    pub fn force_pause(&mut self) {
        if !self.game_over {
            self.paused = true;
        }
    }

    /// Apply a player command.
    ///
    /// Nothing but quit is accepted after game over, and only pause and quit
    /// while paused. Quit itself is a loop concern and is a no-op here.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.game_over || (self.paused && !action.always_available()) {
            return false;
        }

        match action {
            GameAction::MoveLeft => self.try_shift(-1),
            GameAction::MoveRight => self.try_shift(1),
            GameAction::SoftDrop => {
                self.soft_drop();
                true
            }
            GameAction::Rotate => self.try_rotate(),
            GameAction::HardDrop => {
                self.hard_drop();
                true
            }
            GameAction::Pause => self.toggle_pause(),
            GameAction::Quit => false,
        }
    }
}

impl Default for GameState<UniformRandomizer> {
    fn default() -> Self {
        Self::with_source(UniformRandomizer::from_entropy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Rotation, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_X, SPAWN_Y};

    /// Always hands out the same kind.
    struct Repeat(PieceKind);

    impl PieceSource for Repeat {
        fn next_kind(&mut self) -> PieceKind {
            self.0
        }
    }

    fn started(kind: PieceKind) -> GameState<Repeat> {
        let mut state = GameState::with_source(Repeat(kind));
        state.start();
        state
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert!(!state.started());
        assert!(!state.game_over());
        assert!(!state.paused());
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.lines(), 0);
        assert!(state.active().is_none());
    }

    #[test]
    fn test_game_start_spawns_at_anchor() {
        let mut state = GameState::new(12345);
        state.start();

        let active = state.active().unwrap();
        assert_eq!((active.x, active.y), (SPAWN_X, SPAWN_Y));
        assert_eq!(active.rotation, Rotation::North);
        assert_eq!(state.piece_count(), 1);
        assert_eq!(state.status(), GameStatus::Running);
    }

    #[test]
    fn test_start_twice_keeps_piece() {
        let mut state = GameState::new(1);
        state.start();
        let first = state.active();
        state.start();
        assert_eq!(state.active(), first);
        assert_eq!(state.piece_count(), 1);
    }

    #[test]
    fn test_shift_stops_at_walls() {
        let mut state = started(PieceKind::O);

        // O occupies columns 1..=2 of its box, anchor at x = 3.
        let mut moved = 0;
        for _ in 0..10 {
            if state.try_shift(-1) {
                moved += 1;
            }
        }
        assert_eq!(moved, 4);
        assert_eq!(state.active().unwrap().x, -1);

        let mut moved = 0;
        for _ in 0..10 {
            if state.try_shift(1) {
                moved += 1;
            }
        }
        assert_eq!(moved, 8);
        assert_eq!(state.active().unwrap().x, 7);
    }

    #[test]
    fn test_rotate_cycles_through_four_states() {
        let mut state = started(PieceKind::T);
        for _ in 0..3 {
            state.soft_drop();
        }

        for expected in [Rotation::East, Rotation::South, Rotation::West, Rotation::North] {
            assert!(state.try_rotate());
            assert_eq!(state.active().unwrap().rotation, expected);
        }
    }

    #[test]
    fn test_rotate_without_kick_is_rejected() {
        let mut state = started(PieceKind::I);
        // Vertical I hugging the right wall: col 2 of the box at x = 7.
        assert!(state.try_rotate());
        for _ in 0..5 {
            state.soft_drop();
        }
        while state.try_shift(1) {}
        let before = state.active().unwrap();
        assert_eq!(before.x, 7);

        // Horizontal I would need columns 7..=10.
        assert!(!state.try_rotate());
        assert_eq!(state.active().unwrap(), before);
    }

    #[test]
    fn test_soft_drop_moves_then_locks() {
        let mut state = started(PieceKind::O);
        // O rows 1..=2 of the box: resting anchor y = 17.
        let mut falls = 0;
        while state.soft_drop() {
            falls += 1;
        }
        assert_eq!(falls, 19);
        assert_eq!(state.board().get(4, 19), Some(Some(PieceKind::O)));
        assert_eq!(state.board().get(5, 18), Some(Some(PieceKind::O)));
        assert_eq!(state.piece_count(), 2);

        let event = state.take_last_event().unwrap();
        assert_eq!(event.kind, PieceKind::O);
        assert_eq!(event.lines_cleared, 0);
        assert!(state.take_last_event().is_none());
    }

    #[test]
    fn test_hard_drop_reports_distance() {
        let mut state = started(PieceKind::I);
        // Horizontal I on box row 1: anchor y goes from -2 to 18.
        assert_eq!(state.hard_drop(), 20);
        for x in 3..7 {
            assert_eq!(state.board().get(x, 19), Some(Some(PieceKind::I)));
        }
        assert_eq!(state.active().unwrap().y, SPAWN_Y);
    }

    #[test]
    fn test_ghost_matches_hard_drop() {
        let mut state = started(PieceKind::T);
        let ghost = state.ghost_y().unwrap();
        let before = state.active().unwrap();

        // Ghost projection does not touch the piece.
        assert_eq!(state.active().unwrap(), before);

        state.hard_drop();
        let mut grid = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        state.board().write_u8_grid(&mut grid);
        let landed = Tetromino { y: ghost, ..before };
        for (x, y) in landed.cells() {
            assert_eq!(grid[y as usize][x as usize], PieceKind::T.cell_value());
        }
    }

    #[test]
    fn test_blocked_spawn_ends_game() {
        let mut board = Board::new();
        // Column 4 filled top to bottom, no row complete.
        for y in 0..BOARD_HEIGHT as i8 {
            board.set(4, y, Some(PieceKind::J));
        }
        let mut state = GameState::with_board(board.clone(), Repeat(PieceKind::O));
        state.start();

        assert!(state.game_over());
        assert!(state.active().is_none());
        assert_eq!(state.board(), &board);
        assert_eq!(state.status(), GameStatus::GameOver);

        assert!(!state.apply_action(GameAction::HardDrop));
        assert!(!state.apply_action(GameAction::Pause));
        assert_eq!(state.board(), &board);
    }

    #[test]
    fn test_pause_gates_movement() {
        let mut state = started(PieceKind::T);
        assert!(state.apply_action(GameAction::Pause));
        assert_eq!(state.status(), GameStatus::Paused);

        let before = state.active();
        assert!(!state.apply_action(GameAction::MoveLeft));
        assert!(!state.apply_action(GameAction::HardDrop));
        assert_eq!(state.active(), before);

        assert!(state.apply_action(GameAction::Pause));
        assert_eq!(state.status(), GameStatus::Running);
        assert!(state.apply_action(GameAction::MoveLeft));
    }

    #[test]
    fn test_force_pause_is_idempotent() {
        let mut state = started(PieceKind::S);
        state.force_pause();
        state.force_pause();
        assert!(state.paused());
    }
}
