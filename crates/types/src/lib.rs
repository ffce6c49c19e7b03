//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! by the engine, the input mapping and the terminal view alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn rows**: rows 0-1; a new piece is written there at a column
//!   offset in `0..=6`
//!
//! # Tick Timing
//!
//! The engine has no clock. It advances one tick per `step()`; gravity moves the
//! falling piece once every `speed` ticks where
//!
//! ```text
//! speed = max(1, 30 - 2 * level)
//! level = cleared_rows / 10
//! ```
//!
//! The terminal runner calls `step()` every [`TICK_MS`] milliseconds.
//!
//! # Examples
//!
//! ```
//! use stackfall_types::{Command, Phase, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let cmd = Command::from_str("moveLeft").unwrap();
//! assert_eq!(cmd, Command::MoveLeft);
//! assert_eq!(cmd.as_str(), "moveLeft");
//!
//! assert_eq!(Phase::AwaitingSpawn.as_str(), "awaiting_spawn");
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Number of top rows a new piece is written into.
pub const SPAWN_ROWS: u8 = 2;

/// Largest column offset for a spawned 4-wide template.
pub const SPAWN_MAX_COL: u8 = BOARD_WIDTH - 4;

/// Number of canonical shapes in the catalog.
pub const SHAPE_COUNT: usize = 7;

/// Upper bound on the cells of a single piece.
pub const MAX_PIECE_CELLS: usize = 4;

/// Side of the square every piece footprint fits in.
pub const PIECE_SPAN: i8 = 4;

/// Wall-clock tick used by the terminal runner (16ms ≈ 60 ticks per second)
pub const TICK_MS: u32 = 16;

/// Ticks per gravity step at level 0.
pub const BASE_SPEED_TICKS: u32 = 30;

/// Ticks removed from the gravity interval per level.
pub const SPEED_STEP_PER_LEVEL: u32 = 2;

/// Fastest gravity: one row every tick.
pub const MIN_SPEED_TICKS: u32 = 1;

/// Cleared rows needed per level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Delay before a held movement key starts repeating.
pub const DEFAULT_REPEAT_DELAY_MS: u32 = 150;

/// Interval between repeated moves while a key is held.
pub const DEFAULT_REPEAT_MS: u32 = 80;

/// Interval between repeated soft drops while the drop key is held.
pub const SOFT_DROP_REPEAT_MS: u32 = 50;

/// Line clear scoring table
///
/// Base points for clearing N rows in a single pass at level 0:
/// - 0 rows: 0 points
/// - 1 row: 40 points
/// - 2 rows: 80 points
/// - 3 rows: 300 points
/// - 4 rows: 1200 points
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 80, 300, 1200];

/// Identifier of a spawned piece. Unique for the lifetime of a game.
pub type PieceId = u32;

/// Cell value for an empty cell; never a valid piece identifier.
pub const EMPTY: PieceId = 0;

/// A board coordinate. Signed so that probes one step off the grid can be
/// expressed and rejected by bounds checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: i8,
    pub col: i8,
}

impl Pos {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Offset this position by `(dr, dc)`.
    pub const fn offset(self, dr: i8, dc: i8) -> Self {
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    pub fn in_bounds(self) -> bool {
        self.row >= 0
            && self.row < BOARD_HEIGHT as i8
            && self.col >= 0
            && self.col < BOARD_WIDTH as i8
    }
}

/// Player commands consumed by the engine at the start of a tick.
///
/// Commands are queued by the caller and drained in FIFO order. They only
/// affect the falling piece; anything else turns them into no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move the falling piece one column left
    MoveLeft,
    /// Move the falling piece one column right
    MoveRight,
    /// Rotate the falling piece 90° clockwise
    Rotate,
    /// Advance the falling piece one row (locks it if it cannot advance)
    SoftDrop,
}

impl Command {
    /// Parse command from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use stackfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveRight"), Some(Command::MoveRight));
    /// assert_eq!(Command::from_str("ROTATE"), Some(Command::Rotate));
    /// assert_eq!(Command::from_str("softdrop"), Some(Command::SoftDrop));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "rotate" => Some(Command::Rotate),
            "softdrop" => Some(Command::SoftDrop),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::Rotate => "rotate",
            Command::SoftDrop => "softDrop",
        }
    }
}

/// Horizontal direction of a move or a side collision probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Column delta for one step in this direction.
    pub const fn delta(self) -> i8 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// States of the tick controller.
///
/// ```text
/// AwaitingSpawn --spawn--> Falling --lock, no clear--> AwaitingSpawn
///       |                     |
///       |                     +--lock, rows cleared--> Cascading --gaps closed--> AwaitingSpawn
///       +--top rows occupied--> GameOver (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    AwaitingSpawn,
    Falling,
    Cascading,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::AwaitingSpawn => "awaiting_spawn",
            Phase::Falling => "falling",
            Phase::Cascading => "cascading",
            Phase::GameOver => "game_over",
        }
    }
}
