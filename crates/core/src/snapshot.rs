use crate::board::Grid;
use crate::types::{Phase, PieceId};

/// Observable engine state after a tick.
///
/// Plain data: the terminal view and tests read it without touching the
/// engine. `snapshot_into` refills an existing value without allocating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GameSnapshot {
    /// Owner identifier per cell, `0` for empty
    pub board: Grid,
    /// Identifier of the falling piece, if any
    pub active_id: Option<PieceId>,
    /// Identifier the next spawned piece will get
    pub next_id: PieceId,
    pub phase: Phase,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    /// Ticks per gravity step
    pub speed: u32,
    pub cascade_pending: u32,
    pub game_over: bool,
    pub seed: u32,
    pub tick: u64,
}
