//! Board module - the 20x10 grid of piece identifiers
//!
//! Each cell holds the [`PieceId`] of the piece occupying it, or [`EMPTY`].
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates are `(row, col)`: row 0 is the top, column 0 is the left.

use std::fmt;

use arrayvec::ArrayVec;

use crate::types::{PieceId, BOARD_HEIGHT, BOARD_WIDTH, EMPTY};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Cells per row
pub const ROW_LEN: usize = BOARD_WIDTH as usize;

/// Printed for ids with no single base-36 digit (above 35).
const WIDE_ID: char = '#';

/// Row-major 2D view of the grid, as exposed in snapshots.
pub type Grid = [[PieceId; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// The game board - 20 rows x 10 columns using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [PieceId; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [EMPTY; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= BOARD_HEIGHT as i8 || col < 0 || col >= BOARD_WIDTH as i8 {
            return None;
        }
        Some((row as usize) * ROW_LEN + (col as usize))
    }

    /// Get cell at `(row, col)`.
    /// Returns None if out of bounds
    pub fn get(&self, row: i8, col: i8) -> Option<PieceId> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at `(row, col)`.
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i8, col: i8, value: PieceId) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty.
    pub fn is_empty(&self, row: i8, col: i8) -> bool {
        self.get(row, col) == Some(EMPTY)
    }

    /// In bounds and held by a piece other than `id`.
    pub fn is_foreign(&self, row: i8, col: i8, id: PieceId) -> bool {
        matches!(self.get(row, col), Some(v) if v != EMPTY && v != id)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = row * ROW_LEN;
        self.cells[start..start + ROW_LEN]
            .iter()
            .all(|&cell| cell != EMPTY)
    }

    /// Zero a row in place and return the former owner of each cell.
    pub fn clear_row(&mut self, row: usize) -> ArrayVec<PieceId, ROW_LEN> {
        let mut owners = ArrayVec::new();
        if row >= BOARD_HEIGHT as usize {
            return owners;
        }
        let start = row * ROW_LEN;
        for cell in &mut self.cells[start..start + ROW_LEN] {
            if *cell != EMPTY {
                owners.push(*cell);
            }
            *cell = EMPTY;
        }
        owners
    }

    /// Move every row above `row` down by one, overwriting `row`.
    /// Row 0 becomes empty.
    pub fn shift_down_above(&mut self, row: usize) {
        if row >= BOARD_HEIGHT as usize {
            return;
        }
        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..row * ROW_LEN, ROW_LEN);
        for cell in &mut self.cells[0..ROW_LEN] {
            *cell = EMPTY;
        }
    }

    /// Whether any of the top `n` rows holds a cell.
    pub fn top_rows_occupied(&self, n: usize) -> bool {
        let end = n.min(BOARD_HEIGHT as usize) * ROW_LEN;
        self.cells[..end].iter().any(|&cell| cell != EMPTY)
    }

    /// Number of cells held by `id`.
    pub fn count_of(&self, id: PieceId) -> usize {
        self.cells.iter().filter(|&&cell| cell == id).count()
    }

    /// Number of non-empty cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != EMPTY).count()
    }

    /// Copy the grid into a row-major 2D array.
    pub fn write_grid(&self, out: &mut Grid) {
        for (row, dst) in out.iter_mut().enumerate() {
            let start = row * ROW_LEN;
            dst.copy_from_slice(&self.cells[start..start + ROW_LEN]);
        }
    }

    /// Flat view of the cells (row-major).
    pub fn cells(&self) -> &[PieceId] {
        &self.cells
    }

    /// Parse a text picture of the board.
    ///
    /// Lines are aligned to the bottom of the board, so a picture of only the
    /// last few rows is enough. `.` is empty, a base-36 digit `1`-`z` is an id.
    /// Returns None for unknown characters (including the `#` that `Display`
    /// prints for ids above 35), a `0` cell, or oversized input.
    pub fn parse(text: &str) -> Option<Self> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if lines.len() > BOARD_HEIGHT as usize {
            return None;
        }

        let mut board = Self::new();
        let first_row = BOARD_HEIGHT as usize - lines.len();
        for (i, line) in lines.iter().enumerate() {
            if line.chars().count() > ROW_LEN {
                return None;
            }
            let row = (first_row + i) as i8;
            for (col, ch) in line.chars().enumerate() {
                let value = match ch {
                    '.' => EMPTY,
                    c => c.to_digit(36).filter(|&id| id != EMPTY)?,
                };
                board.set(row, col as i8, value);
            }
        }
        Some(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(ROW_LEN) {
            for &cell in row {
                let ch = match cell {
                    EMPTY => '.',
                    id => std::char::from_digit(id, 36).unwrap_or(WIDE_ID),
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
