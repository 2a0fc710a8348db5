//! Scoring module - score, lines, level and gravity speed
//!
//! Progression only changes when a lock clears rows:
//! - clearing `c` rows awards `LINE_REWARDS[c] * level`;
//! - every `LEVEL_UP_LINES` cumulative lines raise the level by one;
//! - each level shortens the gravity interval by `TICK_MS_STEP`, down to
//!   `TICK_MS_MIN`.

use crate::types::{LEVEL_UP_LINES, LINE_REWARDS, TICK_MS_INITIAL, TICK_MS_MIN, TICK_MS_STEP};

/// Points for clearing `lines` rows at `level`.
///
/// More than four rows can only come from a hand-built board; they earn the
/// four-row reward.
pub fn line_clear_points(lines: usize, level: u32) -> u32 {
    let reward = LINE_REWARDS[lines.min(LINE_REWARDS.len() - 1)];
    reward.saturating_mul(level)
}

/// Gravity interval in milliseconds for a level (1-based).
pub fn tick_ms_for_level(level: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(TICK_MS_STEP);
    TICK_MS_INITIAL.saturating_sub(reduction).max(TICK_MS_MIN)
}

/// Level reached after `lines` cumulative cleared lines.
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LEVEL_UP_LINES + 1
}

/// Outcome of feeding one line-clear into the progression state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub points: u32,
    /// New level, when this clear crossed a level threshold.
    pub level_up: Option<u32>,
}

/// Score, lines, level and gravity interval for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progression {
    score: u32,
    lines: u32,
    level: u32,
    tick_ms: u32,
}

impl Progression {
    pub fn new() -> Self {
        Self {
            score: 0,
            lines: 0,
            level: 1,
            tick_ms: TICK_MS_INITIAL,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn tick_ms(&self) -> u32 {
        self.tick_ms
    }

    /// Apply the rows cleared by one lock.
    ///
    /// Points use the level in effect before the clear; the level (and with it
    /// the gravity interval) is raised afterwards. A zero count changes nothing.
    pub fn record_clear(&mut self, cleared: usize) -> ScoreResult {
        if cleared == 0 {
            return ScoreResult::default();
        }

        self.lines = self.lines.saturating_add(cleared as u32);
        let points = line_clear_points(cleared, self.level);
        self.score = self.score.saturating_add(points);

        let reached = level_for_lines(self.lines);
        let level_up = if reached > self.level {
            self.level = reached;
            self.tick_ms = tick_ms_for_level(reached);
            Some(reached)
        } else {
            None
        };

        ScoreResult { points, level_up }
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}
