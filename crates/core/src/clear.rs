//! Line clearing and the row cascade that follows it
//!
//! A clear pass zeroes every full row in place and releases the cleared cells
//! from the registry. The emptied rows stay on the board as gaps; the
//! [`Cascade`] then closes one gap per tick, lowest first, by shifting every
//! row above it down one row.

use arrayvec::ArrayVec;

use crate::registry::Registry;
use crate::types::BOARD_HEIGHT;
use crate::Board;

/// Rows cleared by one pass, top to bottom.
pub type ClearedRows = ArrayVec<u8, { BOARD_HEIGHT as usize }>;

/// Zero every full row and release its cells from the registry.
pub fn clear_full_rows(board: &mut Board, registry: &mut Registry) -> ClearedRows {
    let mut cleared = ClearedRows::new();
    for row in 0..BOARD_HEIGHT as usize {
        if !board.is_row_full(row) {
            continue;
        }
        for owner in board.clear_row(row) {
            registry.release_cell(owner);
        }
        cleared.push(row as u8);
    }
    cleared
}

/// Pending gaps left by a clear pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cascade {
    /// Gap rows, kept sorted top to bottom
    gaps: ClearedRows,
}

impl Cascade {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the rows of a clear pass as gaps to close.
    pub fn begin(&mut self, rows: &[u8]) {
        for &row in rows {
            if !self.gaps.contains(&row) && self.gaps.try_push(row).is_err() {
                break;
            }
        }
        self.gaps.sort_unstable();
    }

    /// Close the lowest gap. Returns the gaps still pending.
    pub fn close_one(&mut self, board: &mut Board) -> usize {
        let Some(lowest) = self.gaps.pop() else {
            return 0;
        };
        board.shift_down_above(lowest as usize);
        // Every remaining gap sits above the shifted region
        for gap in &mut self.gaps {
            *gap += 1;
        }
        self.gaps.len()
    }

    /// Number of shift ticks still pending.
    pub fn pending(&self) -> usize {
        self.gaps.len()
    }

    pub fn is_idle(&self) -> bool {
        self.gaps.is_empty()
    }

    pub fn gaps(&self) -> &[u8] {
        &self.gaps
    }
}
