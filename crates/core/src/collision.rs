//! Collision detection for the falling piece
//!
//! A piece is blocked below when one of its columns already rests on the
//! floor or on another piece, and blocked sideways when the outermost cell of
//! any of its rows has a wall or another piece next to it.

use crate::locator::{self, Cursor};
use crate::types::{Direction, PieceId, Pos, BOARD_HEIGHT, PIECE_SPAN};
use crate::Board;

const FLOOR_ROW: i8 = BOARD_HEIGHT as i8 - 1;

/// Whether `id`, anchored at `anchor`, cannot move down one row.
pub fn collides_below(board: &Board, id: PieceId, anchor: Pos) -> bool {
    for col in anchor.col..anchor.col + PIECE_SPAN {
        let Some(bottom) = locator::column_bottom(board, id, col, anchor.row) else {
            continue;
        };
        if bottom == FLOOR_ROW || board.is_foreign(bottom + 1, col, id) {
            return true;
        }
    }
    false
}

/// Vertical collision check for any piece.
///
/// When `id` is the cursor's piece and it is blocked, the cursor is cleared:
/// the piece is about to lock and stops being the falling piece. A piece that
/// is not on the board never collides.
pub fn check_vertical(board: &Board, id: PieceId, cursor: &mut Option<Cursor>) -> bool {
    let Some(anchor) = locator::anchor_of(board, id, cursor.as_ref()) else {
        return false;
    };
    let hit = collides_below(board, id, anchor);
    if hit && cursor.is_some_and(|c| c.id == id) {
        *cursor = None;
    }
    hit
}

/// Whether `id`, anchored at `anchor`, cannot move one column towards `dir`.
pub fn collides_side(board: &Board, id: PieceId, anchor: Pos, dir: Direction) -> bool {
    let cells = locator::piece_cells(board, id, anchor);
    let step = dir.delta();

    for cell in &cells {
        // Only the outermost cell of each row on the move side can be blocked
        let outermost = cells
            .iter()
            .filter(|other| other.row == cell.row)
            .all(|other| (other.col - cell.col) * step <= 0);
        if !outermost {
            continue;
        }
        let next = cell.offset(0, step);
        if !next.in_bounds() || board.is_foreign(next.row, next.col, id) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_collision() {
        let board = Board::parse("3333......\n").unwrap();
        assert!(collides_below(&board, 3, Pos::new(19, 0)));
    }

    #[test]
    fn test_resting_on_other_piece() {
        let board = Board::parse(
            "\
            .55.......\n\
            .22.......\n",
        )
        .unwrap();
        assert!(collides_below(&board, 5, Pos::new(18, 1)));
        assert!(collides_below(&board, 2, Pos::new(19, 1)));
    }

    #[test]
    fn test_free_fall_has_no_collision() {
        let board = Board::parse(
            "\
            111.......\n\
            .1........\n\
            ..........\n",
        )
        .unwrap();
        assert!(!collides_below(&board, 1, Pos::new(17, 0)));
    }

    #[test]
    fn test_check_vertical_clears_cursor_on_hit() {
        let board = Board::parse("44........\n").unwrap();
        let mut cursor = Some(Cursor {
            id: 4,
            shape: 3,
            anchor: Pos::new(19, 0),
            pivot: Pos::new(18, 1),
            descended: 18,
        });
        assert!(check_vertical(&board, 4, &mut cursor));
        assert!(cursor.is_none());
    }

    #[test]
    fn test_check_vertical_keeps_cursor_for_other_piece() {
        let board = Board::parse(
            "\
            ....9.....\n\
            44........\n",
        )
        .unwrap();
        let mut cursor = Some(Cursor {
            id: 9,
            shape: 0,
            anchor: Pos::new(18, 4),
            pivot: Pos::new(18, 4),
            descended: 1,
        });
        assert!(check_vertical(&board, 4, &mut cursor));
        assert!(cursor.is_some());
    }

    #[test]
    fn test_side_collision_walls_and_pieces() {
        let board = Board::parse(
            "\
            11........\n\
            11.2......\n",
        )
        .unwrap();
        let anchor = Pos::new(19, 0);
        assert!(collides_side(&board, 1, anchor, Direction::Left));
        assert!(!collides_side(&board, 1, anchor, Direction::Right));

        let board = Board::parse(
            "\
            .11.......\n\
            .112......\n",
        )
        .unwrap();
        assert!(collides_side(&board, 1, Pos::new(19, 1), Direction::Right));
    }
}
