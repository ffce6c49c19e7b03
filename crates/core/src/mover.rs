//! Piece movement - gravity steps and horizontal shifts
//!
//! Moves are validated before anything is written, so a refused move leaves
//! the board untouched.

use crate::collision;
use crate::locator::{self, Cursor};
use crate::types::{Direction, PieceId, EMPTY, PIECE_SPAN};
use crate::Board;

/// Move `id` down one row.
///
/// Each column's run of cells is shifted bottom-first. When `id` is the
/// falling piece its cursor follows (anchor, pivot and descent count).
/// Returns false, changing nothing, when the piece is missing or blocked.
pub fn step_down(board: &mut Board, id: PieceId, cursor: &mut Option<Cursor>) -> bool {
    let Some(anchor) = locator::anchor_of(board, id, cursor.as_ref()) else {
        return false;
    };
    if collision::collides_below(board, id, anchor) {
        return false;
    }

    for col in anchor.col..anchor.col + PIECE_SPAN {
        let Some(bottom) = locator::column_bottom(board, id, col, anchor.row) else {
            continue;
        };
        let top = locator::run_top(board, id, col, bottom);
        board.set(bottom + 1, col, id);
        board.set(top, col, EMPTY);
    }

    if let Some(cur) = cursor.as_mut().filter(|c| c.id == id) {
        cur.translate(1, 0);
        cur.descended += 1;
    }
    true
}

/// Move the falling piece one column towards `dir`.
///
/// No-op returning false when a wall or another piece is in the way.
pub fn step_side(board: &mut Board, cursor: &mut Cursor, dir: Direction) -> bool {
    let id = cursor.id;
    if collision::collides_side(board, id, cursor.anchor, dir) {
        return false;
    }

    let step = dir.delta();
    let mut cells = locator::piece_cells(board, id, cursor.anchor);
    // Leading edge first so no cell lands on one not yet moved
    cells.sort_unstable_by_key(|p| -(p.col * step));

    for cell in &cells {
        board.set(cell.row, cell.col + step, id);
        board.set(cell.row, cell.col, EMPTY);
    }

    cursor.translate(0, step);
    true
}
