//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the falling-block engine: the grid, the piece catalog,
//! movement, rotation, line clearing with its row cascade, scoring and the
//! tick controller. It has **zero dependencies** on terminals or I/O, which
//! makes it:
//!
//! - **Deterministic**: the same seed and command sequence replay the same game
//! - **Testable**: every rule is reachable through [`Engine`] or the free
//!   functions of its modules
//! - **Portable**: the terminal binary, the headless runner and the tests all
//!   drive the same `step()`
//!
//! # Module Structure
//!
//! - [`board`]: 20x10 grid of piece identifiers
//! - [`catalog`]: the seven shape templates
//! - [`rng`]: seeded LCG and the shape bag
//! - [`registry`]: remaining cell count per piece
//! - [`locator`]: cursor fast path and bounded board scans
//! - [`collision`]: vertical and horizontal collision checks
//! - [`mover`]: gravity steps and horizontal shifts
//! - [`rotation`]: window rotation, bar toggle
//! - [`clear`]: full-row clearing and the row cascade
//! - [`scoring`]: line scores, level and speed
//! - [`engine`]: the tick controller
//! - [`snapshot`]: plain-data view of the engine state
//!
//! # Game Rules
//!
//! - Pieces spawn in rows 0-1 at a random column offset in `0..=6`, shapes
//!   drawn from a bag of seven
//! - Gravity moves the falling piece one row every `speed` ticks; a blocked
//!   piece locks immediately (no lock delay, no hard drop, no hold)
//! - Full rows are zeroed at once and the rows above close the gap one row
//!   per tick
//! - The game ends when a spawn finds rows 0-1 occupied
//!
//! # Example
//!
//! ```
//! use stackfall_core::Engine;
//! use stackfall_core::types::{Command, Phase};
//!
//! let mut engine = Engine::new(12345);
//! engine.step(); // spawns the first piece
//! assert_eq!(engine.phase(), Phase::Falling);
//!
//! engine.enqueue_command(Command::MoveRight);
//! engine.enqueue_command(Command::SoftDrop);
//! engine.step();
//!
//! let snap = engine.snapshot();
//! assert_eq!(snap.active_id, Some(1));
//! assert_eq!(snap.score, 0);
//! ```

pub mod board;
pub mod catalog;
pub mod clear;
pub mod collision;
pub mod engine;
pub mod locator;
pub mod mover;
pub mod registry;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod snapshot;

pub use stackfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Grid};
pub use catalog::{Shape, SHAPES};
pub use clear::Cascade;
pub use engine::Engine;
pub use locator::Cursor;
pub use registry::Registry;
pub use rng::{ShapeBag, SimpleRng};
pub use scoring::{calculate_level, calculate_line_score, speed_for_level, Progress};
pub use snapshot::GameSnapshot;
