//! Rotation of the falling piece
//!
//! Rotation happens inside a small window around the pivot:
//!
//! - general shapes use the 3x3 window centred on the pivot, rotated 90°
//!   clockwise and then pushed down so its lowest occupied row sits on the
//!   window's bottom row
//! - the bar uses a 4x4 window (pivot row/col at window index 1) and toggles
//!   between a horizontal and a vertical line
//! - the square never rotates
//!
//! There are no wall kicks. Any foreign cell inside the window, or a target
//! cell off the board, rejects the rotation and leaves everything as it was.

use arrayvec::ArrayVec;

use crate::catalog::{self, BAR, SQUARE};
use crate::locator::{self, Cursor};
use crate::types::{PieceId, Pos, EMPTY, MAX_PIECE_CELLS};
use crate::Board;

type Cells = ArrayVec<Pos, MAX_PIECE_CELLS>;

/// Rotate the falling piece clockwise.
///
/// No-op returning false without a falling piece, for the square, before the
/// piece has descended a row, or when the rotated cells do not fit.
pub fn rotate(board: &mut Board, cursor: &mut Option<Cursor>) -> bool {
    let Some(cur) = cursor.as_mut() else {
        return false;
    };
    if cur.shape == SQUARE || cur.descended < 1 {
        return false;
    }
    let Some(shape) = catalog::shape(cur.shape) else {
        return false;
    };

    let rotated = if cur.shape == BAR {
        toggle_bar(board, cur.id, cur.pivot)
    } else {
        rotate_window(board, cur.id, cur.pivot, shape.cell_count())
    };
    let Some((old, new)) = rotated else {
        return false;
    };

    for p in &old {
        board.set(p.row, p.col, EMPTY);
    }
    for p in &new {
        board.set(p.row, p.col, cur.id);
    }
    if let Some(anchor) = locator::bottom_left(&new) {
        cur.anchor = anchor;
    }
    true
}

/// Plan a clockwise turn of the 3x3 window around `pivot`.
/// Returns the cells to clear and the cells to fill.
fn rotate_window(board: &Board, id: PieceId, pivot: Pos, cell_count: u8) -> Option<(Cells, Cells)> {
    let origin = pivot.offset(-1, -1);
    let mut window = [[false; 3]; 3];
    let mut old = Cells::new();

    for (r, row) in window.iter_mut().enumerate() {
        for (c, slot) in row.iter_mut().enumerate() {
            let p = origin.offset(r as i8, c as i8);
            match board.get(p.row, p.col) {
                Some(v) if v == id => {
                    *slot = true;
                    old.try_push(p).ok()?;
                }
                Some(EMPTY) | None => {}
                Some(_) => return None,
            }
        }
    }
    // Part of the piece outside the window: refuse rather than tear it
    if old.len() != cell_count as usize {
        return None;
    }

    let mut turned = [[false; 3]; 3];
    for (r, row) in turned.iter_mut().enumerate() {
        for (c, slot) in row.iter_mut().enumerate() {
            *slot = window[2 - c][r];
        }
    }
    let lowest = (0..3).rev().find(|&r| turned[r].iter().any(|&b| b))?;
    let drop = (2 - lowest) as i8;

    let mut new = Cells::new();
    for (r, row) in turned.iter().enumerate() {
        for (c, &filled) in row.iter().enumerate() {
            if !filled {
                continue;
            }
            let p = origin.offset(r as i8 + drop, c as i8);
            if !p.in_bounds() {
                return None;
            }
            new.try_push(p).ok()?;
        }
    }
    Some((old, new))
}

/// Plan the bar's toggle between its horizontal and vertical line.
fn toggle_bar(board: &Board, id: PieceId, pivot: Pos) -> Option<(Cells, Cells)> {
    let origin = pivot.offset(-1, -1);
    let horizontal: Cells = (0..4).map(|c| origin.offset(1, c)).collect();
    let vertical: Cells = (0..4).map(|r| origin.offset(r, 1)).collect();

    for r in 0..4 {
        for c in 0..4 {
            let p = origin.offset(r, c);
            if board.is_foreign(p.row, p.col, id) {
                return None;
            }
        }
    }

    let owns_all = |cells: &Cells| cells.iter().all(|p| board.get(p.row, p.col) == Some(id));
    let (old, new) = if owns_all(&horizontal) {
        (horizontal, vertical)
    } else if owns_all(&vertical) {
        (vertical, horizontal)
    } else {
        return None;
    };

    if !new.iter().all(|p| p.in_bounds()) {
        return None;
    }
    Some((old, new))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn falling(id: PieceId, shape: usize, anchor: Pos, pivot: Pos) -> Option<Cursor> {
        Some(Cursor {
            id,
            shape,
            anchor,
            pivot,
            descended: 5,
        })
    }

    #[test]
    fn test_t_rotates_clockwise() {
        // T at rows 5-6, pivot (5, 2)
        let mut board = Board::new();
        for (r, c) in [(5, 1), (5, 2), (5, 3), (6, 2)] {
            board.set(r, c, 1);
        }
        let mut cur = falling(1, 0, Pos::new(5, 1), Pos::new(5, 2));

        assert!(rotate(&mut board, &mut cur));

        // .#.
        // ##.
        // .#.
        for (r, c) in [(4, 2), (5, 1), (5, 2), (6, 2)] {
            assert_eq!(board.get(r, c), Some(1), "missing ({}, {})", r, c);
        }
        assert_eq!(board.count_of(1), 4);
        let cur = cur.unwrap();
        assert_eq!(cur.anchor, Pos::new(5, 1));
        assert_eq!(cur.pivot, Pos::new(5, 2));
    }

    #[test]
    fn test_four_turns_keep_cell_count() {
        let mut board = Board::new();
        for (r, c) in [(5, 3), (5, 4), (6, 4), (6, 5)] {
            board.set(r, c, 2);
        }
        let mut cur = falling(2, 2, Pos::new(5, 3), Pos::new(5, 4));
        for _ in 0..4 {
            assert!(rotate(&mut board, &mut cur));
            assert_eq!(board.count_of(2), 4);
        }
    }

    #[test]
    fn test_square_never_rotates() {
        let mut board = Board::new();
        for (r, c) in [(5, 3), (5, 4), (6, 3), (6, 4)] {
            board.set(r, c, 3);
        }
        let before = board.clone();
        let mut cur = falling(3, SQUARE, Pos::new(6, 3), Pos::new(5, 4));
        assert!(!rotate(&mut board, &mut cur));
        assert_eq!(board, before);
    }

    #[test]
    fn test_no_rotation_before_first_descent() {
        let mut board = Board::new();
        for (r, c) in [(0, 1), (0, 2), (0, 3), (1, 2)] {
            board.set(r, c, 1);
        }
        let mut cur = falling(1, 0, Pos::new(0, 1), Pos::new(0, 2));
        if let Some(c) = cur.as_mut() {
            c.descended = 0;
        }
        assert!(!rotate(&mut board, &mut cur));
    }

    #[test]
    fn test_foreign_cell_in_window_blocks() {
        let mut board = Board::new();
        for (r, c) in [(5, 1), (5, 2), (5, 3), (6, 2)] {
            board.set(r, c, 1);
        }
        board.set(4, 1, 9);
        let before = board.clone();
        let mut cur = falling(1, 0, Pos::new(5, 1), Pos::new(5, 2));
        assert!(!rotate(&mut board, &mut cur));
        assert_eq!(board, before);
        assert_eq!(cur.map(|c| c.anchor), Some(Pos::new(5, 1)));
    }

    #[test]
    fn test_bar_toggles() {
        let mut board = Board::new();
        for c in 3..7 {
            board.set(1, c, 7);
        }
        let mut cur = falling(7, BAR, Pos::new(1, 3), Pos::new(1, 4));

        assert!(rotate(&mut board, &mut cur));
        for r in 0..4 {
            assert_eq!(board.get(r, 4), Some(7));
        }
        assert_eq!(board.count_of(7), 4);
        assert_eq!(cur.map(|c| c.anchor), Some(Pos::new(3, 4)));

        assert!(rotate(&mut board, &mut cur));
        for c in 3..7 {
            assert_eq!(board.get(1, c), Some(7));
        }
        assert_eq!(cur.map(|c| c.anchor), Some(Pos::new(1, 3)));
    }

    #[test]
    fn test_bar_off_board_is_rejected() {
        // Vertical bar against the left wall cannot lie down
        let mut board = Board::new();
        for r in 4..8 {
            board.set(r, 0, 7);
        }
        let before = board.clone();
        let mut cur = falling(7, BAR, Pos::new(7, 0), Pos::new(5, 0));
        assert!(!rotate(&mut board, &mut cur));
        assert_eq!(board, before);
    }
}
