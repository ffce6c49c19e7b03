//! Piece catalog - the seven canonical shapes
//!
//! Every shape is a 2-row by 4-column template written into the spawn rows at
//! a column offset. Offsets are `(row, col)` relative to the template's
//! top-left corner.
//!
//! ```text
//!  0 T   ###.   1 J   ###.   2 Z   ##..   3 O   ##..
//!        .#..         ..#.         .##.         ##..
//!
//!  4 S   .##.   5 L   ###.   6 I   ####
//!        ##..         #...         ....
//! ```

use crate::types::{MAX_PIECE_CELLS, SHAPE_COUNT};

/// Cell offsets of a shape template
pub type ShapeCells = [(i8, i8); MAX_PIECE_CELLS];

/// Catalog index of the square (rotation-invariant).
pub const SQUARE: usize = 3;

/// Catalog index of the bar (two-orientation rotation).
pub const BAR: usize = 6;

/// An immutable shape template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    name: char,
    cells: ShapeCells,
}

/// All canonical shapes, indexed 0-6.
pub const SHAPES: [Shape; SHAPE_COUNT] = [
    Shape {
        name: 'T',
        cells: [(0, 0), (0, 1), (0, 2), (1, 1)],
    },
    Shape {
        name: 'J',
        cells: [(0, 0), (0, 1), (0, 2), (1, 2)],
    },
    Shape {
        name: 'Z',
        cells: [(0, 0), (0, 1), (1, 1), (1, 2)],
    },
    Shape {
        name: 'O',
        cells: [(0, 0), (0, 1), (1, 0), (1, 1)],
    },
    Shape {
        name: 'S',
        cells: [(0, 1), (0, 2), (1, 0), (1, 1)],
    },
    Shape {
        name: 'L',
        cells: [(0, 0), (0, 1), (0, 2), (1, 0)],
    },
    Shape {
        name: 'I',
        cells: [(0, 0), (0, 1), (0, 2), (0, 3)],
    },
];

/// Look up a shape by catalog index.
pub fn shape(index: usize) -> Option<&'static Shape> {
    SHAPES.get(index)
}

impl Shape {
    pub fn name(&self) -> char {
        self.name
    }

    pub fn cells(&self) -> &ShapeCells {
        &self.cells
    }

    pub fn cell_count(&self) -> u8 {
        self.cells.len() as u8
    }

    /// Bottom-leftmost template cell: leftmost column, lowest row within it.
    pub fn anchor_offset(&self) -> (i8, i8) {
        let mut best = self.cells[0];
        for &(r, c) in &self.cells[1..] {
            if c < best.1 || (c == best.1 && r > best.0) {
                best = (r, c);
            }
        }
        best
    }

    /// Rotation centre, relative to the template origin.
    pub fn pivot_offset(&self) -> (i8, i8) {
        (0, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BOARD_WIDTH, SPAWN_MAX_COL, SPAWN_ROWS};

    #[test]
    fn test_catalog_order() {
        let names: String = SHAPES.iter().map(Shape::name).collect();
        assert_eq!(names, "TJZOSLI");
        assert_eq!(SHAPES[SQUARE].name(), 'O');
        assert_eq!(SHAPES[BAR].name(), 'I');
    }

    #[test]
    fn test_shapes_fit_spawn_area() {
        for shape in &SHAPES {
            assert!(shape.cell_count() as usize <= MAX_PIECE_CELLS);
            for &(r, c) in shape.cells() {
                assert!(r >= 0 && r < SPAWN_ROWS as i8);
                assert!(c >= 0 && SPAWN_MAX_COL as i8 + c < BOARD_WIDTH as i8);
            }
        }
    }

    #[test]
    fn test_anchor_offsets() {
        assert_eq!(SHAPES[0].anchor_offset(), (0, 0)); // T
        assert_eq!(SHAPES[3].anchor_offset(), (1, 0)); // O
        assert_eq!(SHAPES[4].anchor_offset(), (1, 0)); // S
        assert_eq!(SHAPES[5].anchor_offset(), (1, 0)); // L
        assert_eq!(SHAPES[6].anchor_offset(), (0, 0)); // I
    }

    #[test]
    fn test_shape_lookup_out_of_range() {
        assert!(shape(6).is_some());
        assert!(shape(7).is_none());
    }
}
