//! Scoring module - classic line scores and level progression
//!
//! - a pass clearing `n` rows scores `LINE_SCORES[min(n, 4)] * (level + 1)`,
//!   using the level held *before* the clear
//! - `level = lines / 10`
//! - gravity speed is `max(1, 30 - 2 * level)` ticks per row

use crate::types::{
    BASE_SPEED_TICKS, LINES_PER_LEVEL, LINE_SCORES, MIN_SPEED_TICKS, SPEED_STEP_PER_LEVEL,
};

/// Calculate line clear score
/// rows: number of rows cleared in one pass (clamped to 4)
/// level: current level (0-based)
pub fn calculate_line_score(rows: usize, level: u32) -> u32 {
    let base = LINE_SCORES[rows.min(LINE_SCORES.len() - 1)];
    base.saturating_mul(level.saturating_add(1))
}

/// Level for a total number of cleared rows
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}

/// Ticks between gravity steps at `level`
pub fn speed_for_level(level: u32) -> u32 {
    BASE_SPEED_TICKS
        .saturating_sub(level.saturating_mul(SPEED_STEP_PER_LEVEL))
        .max(MIN_SPEED_TICKS)
}

/// Accumulated score, cleared rows and the derived level and speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    score: u32,
    lines: u32,
    level: u32,
    speed: u32,
}

impl Progress {
    pub fn new() -> Self {
        Self {
            score: 0,
            lines: 0,
            level: 0,
            speed: speed_for_level(0),
        }
    }

    /// Account for a clear pass of `rows` rows. Returns the points awarded.
    pub fn apply_clear(&mut self, rows: usize) -> u32 {
        if rows == 0 {
            return 0;
        }
        let points = calculate_line_score(rows, self.level);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(rows as u32);
        self.level = calculate_level(self.lines);
        self.speed = speed_for_level(self.level);
        points
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

    pub fn speed(&self) -> u32 {
        self.speed
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}
