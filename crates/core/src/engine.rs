//! Engine module - the tick controller
//!
//! Ties together board, registry, bag, movement and line clearing. The engine
//! has no clock: an outside scheduler calls [`Engine::step`] once per tick and
//! queues player commands with [`Engine::enqueue_command`] in between.
//!
//! One tick runs, in order:
//!
//! 1. drain the command queue (FIFO), applying commands only while `Falling`
//! 2. act on the phase the tick started in:
//!    - `Cascading`: close one gap; once none are left, re-scan for full rows
//!    - `Falling`: every `speed` ticks, move the piece down or lock it
//!    - `AwaitingSpawn`: end the game if rows 0-1 are occupied, else spawn
//!
//! `GameOver` is terminal; `step` then discards queued commands and returns.

use std::collections::VecDeque;

use crate::catalog;
use crate::clear::{self, Cascade};
use crate::collision;
use crate::locator::{self, Cursor};
use crate::mover;
use crate::registry::Registry;
use crate::rng::{ShapeBag, SimpleRng};
use crate::rotation;
use crate::scoring::Progress;
use crate::snapshot::GameSnapshot;
use crate::types::{
    Command, Direction, Phase, PieceId, Pos, EMPTY, SPAWN_MAX_COL, SPAWN_ROWS,
};
use crate::Board;

/// The game engine: owns all mutable game state.
#[derive(Debug, Clone)]
pub struct Engine {
    board: Board,
    registry: Registry,
    cursor: Option<Cursor>,
    rng: SimpleRng,
    bag: ShapeBag,
    commands: VecDeque<Command>,
    phase: Phase,
    cascade: Cascade,
    progress: Progress,
    /// Identifier for the next spawned piece (starts at 1, never reused)
    next_id: PieceId,
    /// Falling ticks since the last gravity step
    gravity_timer: u32,
    ticks: u64,
    seed: u32,
}

impl Engine {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self {
            board: Board::new(),
            registry: Registry::new(),
            cursor: None,
            rng: SimpleRng::new(seed),
            bag: ShapeBag::new(),
            commands: VecDeque::new(),
            phase: Phase::AwaitingSpawn,
            cascade: Cascade::new(),
            progress: Progress::new(),
            next_id: 1,
            gravity_timer: 0,
            ticks: 0,
            seed,
        }
    }

    /// Start from an arbitrary stack.
    ///
    /// Every identifier on `board` is registered with its cell count and the
    /// next spawned piece gets an identifier above all of them.
    pub fn with_board(seed: u32, board: Board) -> Self {
        let mut engine = Self::new(seed);
        let mut max_id = EMPTY;
        for &id in board.cells() {
            if id == EMPTY || engine.registry.contains(id) {
                continue;
            }
            let count = board.count_of(id).min(u8::MAX as usize) as u8;
            engine.registry.register(id, count);
            max_id = max_id.max(id);
        }
        engine.next_id = max_id.saturating_add(1);
        engine.board = board;
        engine
    }

    /// Queue a command for the next tick.
    pub fn enqueue_command(&mut self, cmd: Command) {
        self.commands.push_back(cmd);
    }

    /// Advance the game by exactly one tick.
    pub fn step(&mut self) {
        if self.phase == Phase::GameOver {
            self.commands.clear();
            return;
        }
        self.ticks = self.ticks.wrapping_add(1);

        let entry = self.phase;
        while let Some(cmd) = self.commands.pop_front() {
            if self.phase == Phase::Falling {
                self.apply_command(cmd);
            }
        }

        match entry {
            Phase::Cascading => {
                self.cascade.close_one(&mut self.board);
                if self.cascade.is_idle() {
                    self.run_clear();
                }
            }
            Phase::Falling => {
                // A soft drop may already have locked the piece this tick
                if self.phase != Phase::Falling {
                    return;
                }
                self.gravity_timer += 1;
                if self.gravity_timer >= self.progress.speed() {
                    self.gravity_timer = 0;
                    self.drop_active();
                }
            }
            Phase::AwaitingSpawn => self.spawn_or_end(),
            Phase::GameOver => {}
        }
    }

    fn apply_command(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::MoveLeft => self.shift_active(Direction::Left),
            Command::MoveRight => self.shift_active(Direction::Right),
            Command::Rotate => rotation::rotate(&mut self.board, &mut self.cursor),
            Command::SoftDrop => self.drop_active(),
        }
    }

    fn shift_active(&mut self, dir: Direction) -> bool {
        match self.cursor.as_mut() {
            Some(cur) => mover::step_side(&mut self.board, cur, dir),
            None => false,
        }
    }

    /// Move the falling piece down one row, locking it when it cannot move.
    /// Returns true if the piece moved.
    fn drop_active(&mut self) -> bool {
        let Some(id) = self.cursor.map(|c| c.id) else {
            return false;
        };
        if collision::check_vertical(&self.board, id, &mut self.cursor) {
            self.lock_active();
            return false;
        }
        mover::step_down(&mut self.board, id, &mut self.cursor)
    }

    fn lock_active(&mut self) {
        self.cursor = None;
        self.gravity_timer = 0;
        self.run_clear();
    }

    /// Clear full rows and pick the follow-up phase.
    fn run_clear(&mut self) {
        let cleared = clear::clear_full_rows(&mut self.board, &mut self.registry);
        if cleared.is_empty() {
            self.phase = Phase::AwaitingSpawn;
            return;
        }
        self.progress.apply_clear(cleared.len());
        self.cascade.begin(&cleared);
        self.phase = Phase::Cascading;
    }

    fn spawn_or_end(&mut self) {
        if self.board.top_rows_occupied(SPAWN_ROWS as usize) {
            self.phase = Phase::GameOver;
            self.cursor = None;
            return;
        }
        let shape = self.bag.next(&mut self.rng);
        let col = self.rng.next_range(SPAWN_MAX_COL as u32 + 1) as i8;
        self.spawn_at(shape, col);
    }

    /// Write shape `shape` into rows 0-1 at column offset `col` and make it
    /// the falling piece.
    ///
    /// Returns the new identifier, or None when the engine is not waiting
    /// for a spawn, the shape or offset is invalid, or rows 0-1 are occupied.
    pub fn spawn_at(&mut self, shape: usize, col: i8) -> Option<PieceId> {
        if self.phase != Phase::AwaitingSpawn {
            return None;
        }
        if col < 0 || col > SPAWN_MAX_COL as i8 {
            return None;
        }
        let template = catalog::shape(shape)?;
        if self.board.top_rows_occupied(SPAWN_ROWS as usize) {
            return None;
        }

        let id = self.next_id;
        for &(r, c) in template.cells() {
            self.board.set(r, col + c, id);
        }
        self.registry.register(id, template.cell_count());

        let (ar, ac) = template.anchor_offset();
        let (pr, pc) = template.pivot_offset();
        self.cursor = Some(Cursor {
            id,
            shape,
            anchor: Pos::new(ar, col + ac),
            pivot: Pos::new(pr, col + pc),
            descended: 0,
        });
        self.next_id = self.next_id.saturating_add(1);
        self.gravity_timer = 0;
        self.phase = Phase::Falling;
        Some(id)
    }

    /// Anchor (bottom-leftmost cell) of any piece still on the board.
    pub fn locate(&self, id: PieceId) -> Option<Pos> {
        locator::anchor_of(&self.board, id, self.cursor.as_ref())
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active_id = self.cursor.map(|c| c.id);
        out.next_id = self.next_id;
        out.phase = self.phase;
        out.score = self.progress.score();
        out.level = self.progress.level();
        out.lines = self.progress.lines();
        out.speed = self.progress.speed();
        out.cascade_pending = self.cascade.pending() as u32;
        out.game_over = self.is_game_over();
        out.seed = self.seed;
        out.tick = self.ticks;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Cursor of the falling piece.
    pub fn active(&self) -> Option<Cursor> {
        self.cursor
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.progress.score()
    }

    pub fn level(&self) -> u32 {
        self.progress.level()
    }

    pub fn lines(&self) -> u32 {
        self.progress.lines()
    }

    /// Ticks per gravity step.
    pub fn speed(&self) -> u32 {
        self.progress.speed()
    }

    pub fn cascade_pending(&self) -> usize {
        self.cascade.pending()
    }

    pub fn next_id(&self) -> PieceId {
        self.next_id
    }

    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    pub fn bag(&self) -> &ShapeBag {
        &self.bag
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(1)
    }
}
