//! Piece locator - finding a piece's cells on the board
//!
//! The falling piece is tracked by a [`Cursor`] holding its cached anchor
//! (bottom-leftmost cell) and pivot. Lookups for that piece use the cache;
//! anything else falls back to a full scan.
//!
//! Every piece fits inside a 4-column box that starts at its anchor column
//! and extends at most 3 rows above or below the anchor row, so the bounded
//! helpers never look further than that.

use arrayvec::ArrayVec;

use crate::types::{PieceId, Pos, BOARD_HEIGHT, BOARD_WIDTH, MAX_PIECE_CELLS, PIECE_SPAN};
use crate::Board;

/// Rows searched above and below a hint row.
const ROW_REACH: i8 = PIECE_SPAN - 1;

/// Cached position of the falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub id: PieceId,
    /// Catalog index of the piece's shape
    pub shape: usize,
    /// Bottom-leftmost occupied cell
    pub anchor: Pos,
    /// Rotation centre
    pub pivot: Pos,
    /// Rows descended since spawn
    pub descended: u32,
}

impl Cursor {
    /// Shift anchor and pivot by `(dr, dc)`.
    pub fn translate(&mut self, dr: i8, dc: i8) {
        self.anchor = self.anchor.offset(dr, dc);
        self.pivot = self.pivot.offset(dr, dc);
    }
}

/// Slow path: scan columns left to right and, within each column, rows
/// bottom to top. The first hit is the piece's bottom-leftmost cell.
pub fn find_anchor(board: &Board, id: PieceId) -> Option<Pos> {
    for col in 0..BOARD_WIDTH as i8 {
        for row in (0..BOARD_HEIGHT as i8).rev() {
            if board.get(row, col) == Some(id) {
                return Some(Pos::new(row, col));
            }
        }
    }
    None
}

/// Anchor of `id`, from the cursor when it tracks `id`, otherwise by scan.
pub fn anchor_of(board: &Board, id: PieceId, cursor: Option<&Cursor>) -> Option<Pos> {
    match cursor {
        Some(cur) if cur.id == id => Some(cur.anchor),
        _ => find_anchor(board, id),
    }
}

/// Lowest cell of `id` in `col`, searching `hint_row ± 3`.
///
/// The search starts at the hint and alternates outward; once a cell is found
/// it walks down the contiguous run.
pub fn column_bottom(board: &Board, id: PieceId, col: i8, hint_row: i8) -> Option<i8> {
    let found = (0..=ROW_REACH)
        .flat_map(|d| [hint_row + d, hint_row - d])
        .find(|&row| board.get(row, col) == Some(id))?;
    let mut row = found;
    while board.get(row + 1, col) == Some(id) {
        row += 1;
    }
    Some(row)
}

/// Topmost cell of the contiguous run of `id` that contains `(row, col)`.
pub fn run_top(board: &Board, id: PieceId, col: i8, row: i8) -> i8 {
    let mut top = row;
    while board.get(top - 1, col) == Some(id) {
        top -= 1;
    }
    top
}

/// Cells of `id` inside the box around `anchor`: rows `anchor.row ± 3`,
/// columns `anchor.col..anchor.col + 4`.
pub fn piece_cells(board: &Board, id: PieceId, anchor: Pos) -> ArrayVec<Pos, MAX_PIECE_CELLS> {
    let mut cells = ArrayVec::new();
    for row in anchor.row - ROW_REACH..=anchor.row + ROW_REACH {
        for col in anchor.col..anchor.col + PIECE_SPAN {
            if board.get(row, col) == Some(id) && cells.try_push(Pos::new(row, col)).is_err() {
                return cells;
            }
        }
    }
    cells
}

/// Bottom-leftmost of a set of cells: leftmost column, lowest row on a tie.
pub fn bottom_left(cells: &[Pos]) -> Option<Pos> {
    cells
        .iter()
        .copied()
        .min_by(|a, b| a.col.cmp(&b.col).then(b.row.cmp(&a.row)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with_s() -> Board {
        // S piece (id 4) near the floor
        Board::parse(
            "\
            .44.......\n\
            44........\n\
            ..........\n",
        )
        .unwrap()
    }

    #[test]
    fn test_find_anchor_scans_left_then_bottom() {
        let board = board_with_s();
        assert_eq!(find_anchor(&board, 4), Some(Pos::new(18, 0)));
        assert_eq!(find_anchor(&board, 9), None);
    }

    #[test]
    fn test_anchor_of_prefers_cursor() {
        let board = board_with_s();
        let cursor = Cursor {
            id: 4,
            shape: 4,
            anchor: Pos::new(5, 5),
            pivot: Pos::new(4, 6),
            descended: 0,
        };
        assert_eq!(anchor_of(&board, 4, Some(&cursor)), Some(Pos::new(5, 5)));
        // A cursor for another id does not short-circuit the scan
        let other = Cursor { id: 5, ..cursor };
        assert_eq!(anchor_of(&board, 4, Some(&other)), Some(Pos::new(18, 0)));
    }

    #[test]
    fn test_column_bottom_and_run_top() {
        let board = Board::parse(
            "\
            ...7......\n\
            ...7......\n\
            ...7......\n\
            ...7......\n",
        )
        .unwrap();
        assert_eq!(column_bottom(&board, 7, 3, 16), Some(19));
        assert_eq!(run_top(&board, 7, 3, 19), 16);
        assert_eq!(column_bottom(&board, 7, 4, 16), None);
    }

    #[test]
    fn test_piece_cells_in_box() {
        let board = board_with_s();
        let cells = piece_cells(&board, 4, Pos::new(18, 0));
        assert_eq!(cells.len(), 4);
        assert_eq!(bottom_left(&cells), Some(Pos::new(18, 0)));
    }
}
