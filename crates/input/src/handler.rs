//! Key-repeat handler for terminal environments.
//!
//! A press emits its command at once. While the key stays held, left/right
//! repeat every 80ms after a 150ms delay and the drop key repeats every 50ms
//! with no delay. Terminals that never report key releases are handled with a
//! timeout: no movement key seen for that long counts as released.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::map::map_code;
use crate::types::{
    Command, Direction, DEFAULT_REPEAT_DELAY_MS, DEFAULT_REPEAT_MS, SOFT_DROP_REPEAT_MS,
};

// Without release events a single tap must not turn into a long hold.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Commands produced by one `update` call.
pub type Repeats = ArrayVec<Command, 32>;

/// Delay-then-interval repeat timer for one held key.
#[derive(Debug, Clone, Copy)]
struct Repeat {
    held: bool,
    held_ms: u32,
    accumulator: u32,
    delay: u32,
    interval: u32,
}

impl Repeat {
    fn new(delay: u32, interval: u32) -> Self {
        Self {
            held: false,
            held_ms: 0,
            accumulator: 0,
            delay,
            interval: interval.max(1),
        }
    }

    fn press(&mut self) {
        self.held = true;
        self.held_ms = 0;
        self.accumulator = 0;
    }

    fn release(&mut self) {
        self.held = false;
        self.held_ms = 0;
        self.accumulator = 0;
    }

    /// Advance by `elapsed_ms`, returning how many repeats fell due.
    fn advance(&mut self, elapsed_ms: u32) -> u32 {
        if !self.held {
            return 0;
        }
        let before = self.held_ms;
        self.held_ms = self.held_ms.saturating_add(elapsed_ms);
        if self.held_ms < self.delay {
            return 0;
        }
        // Only the time past the delay counts towards the first repeat
        self.accumulator += if before < self.delay {
            self.held_ms - self.delay
        } else {
            elapsed_ms
        };
        let due = self.accumulator / self.interval;
        self.accumulator %= self.interval;
        due
    }
}

/// Tracks held movement keys and turns them into repeated commands.
#[derive(Debug, Clone)]
pub struct RepeatHandler {
    horizontal: Option<Direction>,
    side: Repeat,
    down: Repeat,
    last_key_time: Instant,
    key_release_timeout_ms: u32,
}

impl RepeatHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_REPEAT_DELAY_MS, DEFAULT_REPEAT_MS)
    }

    /// Custom delay and interval for left/right repeats.
    pub fn with_config(delay_ms: u32, repeat_ms: u32) -> Self {
        Self {
            horizontal: None,
            side: Repeat::new(delay_ms, repeat_ms),
            down: Repeat::new(0, SOFT_DROP_REPEAT_MS),
            last_key_time: Instant::now(),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    /// Handle a key press. Returns the command to enqueue now, if any.
    ///
    /// Auto-repeat events from the terminal for a key already held are
    /// swallowed; the handler produces its own repeats in `update`.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<Command> {
        let cmd = map_code(code)?;
        let dir = match cmd {
            Command::MoveLeft => Direction::Left,
            Command::MoveRight => Direction::Right,
            Command::SoftDrop => {
                self.last_key_time = Instant::now();
                if self.down.held {
                    return None;
                }
                self.down.press();
                return Some(cmd);
            }
            // Rotation does not repeat and does not count as holding a key
            Command::Rotate => return Some(cmd),
        };

        self.last_key_time = Instant::now();
        if self.horizontal == Some(dir) {
            return None;
        }
        self.horizontal = Some(dir);
        self.side.press();
        Some(cmd)
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        match map_code(code) {
            Some(Command::MoveLeft) => self.release_side(Direction::Left),
            Some(Command::MoveRight) => self.release_side(Direction::Right),
            Some(Command::SoftDrop) => self.down.release(),
            _ => {}
        }
    }

    fn release_side(&mut self, dir: Direction) {
        if self.horizontal == Some(dir) {
            self.horizontal = None;
            self.side.release();
        }
    }

    /// Advance the repeat timers by `elapsed_ms` and collect due repeats.
    pub fn update(&mut self, elapsed_ms: u32) -> Repeats {
        let mut out = Repeats::new();

        let idle = self.last_key_time.elapsed();
        if idle > Duration::from_millis(self.key_release_timeout_ms as u64) {
            self.horizontal = None;
            self.side.release();
            self.down.release();
        }

        if let Some(dir) = self.horizontal {
            let cmd = match dir {
                Direction::Left => Command::MoveLeft,
                Direction::Right => Command::MoveRight,
            };
            for _ in 0..self.side.advance(elapsed_ms) {
                let _ = out.try_push(cmd);
            }
        }
        for _ in 0..self.down.advance(elapsed_ms) {
            let _ = out.try_push(Command::SoftDrop);
        }

        out
    }

    pub fn reset(&mut self) {
        self.horizontal = None;
        self.side.release();
        self.down.release();
        self.last_key_time = Instant::now();
    }
}

impl Default for RepeatHandler {
    fn default() -> Self {
        Self::new()
    }
}
