//! Piece catalog - canonical shape masks for the seven piece kinds
//!
//! Shapes are small square bit masks (3x3 or 4x4). Rotation builds a new mask
//! instead of mutating one in place, so a piece's shape is always a plain
//! value that can be copied around freely.

use crate::types::PieceKind;

/// Largest mask dimension in the catalog
pub const MAX_SHAPE_SIZE: usize = 4;

/// Offset of a single filled mask cell: (row, col) relative to the mask origin
pub type MinoOffset = (i8, i8);

/// A binary shape mask of `rows x cols` cells (at most 4x4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    /// Row-major, only the top-left `rows x cols` region is meaningful
    mask: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from row strings of `'0'`/`'1'` (anything else is empty)
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut mask = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let height = rows.len().min(MAX_SHAPE_SIZE);
        let mut width = 0usize;
        for (r, line) in rows.iter().take(height).enumerate() {
            width = width.max(line.len().min(MAX_SHAPE_SIZE));
            for (c, ch) in line.bytes().take(MAX_SHAPE_SIZE).enumerate() {
                mask[r][c] = ch == b'1';
            }
        }
        Self {
            rows: height as u8,
            cols: width as u8,
            mask,
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether the mask cell at (row, col) is filled; out of range is empty
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.rows as usize && col < self.cols as usize && self.mask[row][col]
    }

    /// Offsets of every filled cell, in row-major order
    pub fn minos(&self) -> impl Iterator<Item = MinoOffset> + '_ {
        (0..self.rows as usize).flat_map(move |r| {
            (0..self.cols as usize)
                .filter(move |&c| self.mask[r][c])
                .map(move |c| (r as i8, c as i8))
        })
    }

    /// 90° clockwise rotation: `rotated[c][rows - 1 - r] = original[r][c]`
    ///
    /// The result has swapped dimensions.
    pub fn rotated_cw(&self) -> Self {
        let rows = self.rows as usize;
        let cols = self.cols as usize;
        let mut mask = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for r in 0..rows {
            for c in 0..cols {
                mask[c][rows - 1 - r] = self.mask[r][c];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            mask,
        }
    }
}

/// Canonical (spawn orientation) mask for a piece kind
pub fn shape_of(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::from_rows(&["0000", "1111", "0000", "0000"]),
        PieceKind::O => Shape::from_rows(&["0000", "0110", "0110", "0000"]),
        PieceKind::T => Shape::from_rows(&["000", "111", "010"]),
        PieceKind::L => Shape::from_rows(&["000", "111", "001"]),
        PieceKind::J => Shape::from_rows(&["000", "111", "100"]),
        PieceKind::S => Shape::from_rows(&["000", "011", "110"]),
        PieceKind::Z => Shape::from_rows(&["000", "110", "011"]),
    }
}

/// Spawn anchor (row, col) for a mask
///
/// 4-row masks start at row 0, smaller ones one row above the well (-1).
/// 4-column masks start at column 3, smaller ones at column 5.
pub fn spawn_position(shape: &Shape) -> (i8, i8) {
    let row = if shape.rows() == 4 { 0 } else { -1 };
    let col = if shape.cols() == 4 { 3 } else { 5 };
    (row, col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shape_has_four_minos() {
        for kind in PieceKind::ALL {
            assert_eq!(shape_of(kind).minos().count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_shape_dimensions() {
        assert_eq!((shape_of(PieceKind::I).rows(), shape_of(PieceKind::I).cols()), (4, 4));
        assert_eq!((shape_of(PieceKind::O).rows(), shape_of(PieceKind::O).cols()), (4, 4));
        for kind in [PieceKind::T, PieceKind::L, PieceKind::J, PieceKind::S, PieceKind::Z] {
            let shape = shape_of(kind);
            assert_eq!((shape.rows(), shape.cols()), (3, 3), "{:?}", kind);
        }
    }

    #[test]
    fn test_t_minos_row_major() {
        let minos: Vec<_> = shape_of(PieceKind::T).minos().collect();
        assert_eq!(minos, vec![(1, 0), (1, 1), (1, 2), (2, 1)]);
    }

    #[test]
    fn test_rotate_i_horizontal_to_vertical() {
        let rotated = shape_of(PieceKind::I).rotated_cw();
        // Row 1 of the horizontal bar becomes column 2.
        let minos: Vec<_> = rotated.minos().collect();
        assert_eq!(minos, vec![(0, 2), (1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn test_rotate_non_square_swaps_dimensions() {
        let bar = Shape::from_rows(&["111"]);
        let rotated = bar.rotated_cw();
        assert_eq!((rotated.rows(), rotated.cols()), (3, 1));
        assert!(rotated.is_filled(0, 0) && rotated.is_filled(1, 0) && rotated.is_filled(2, 0));
    }

    #[test]
    fn test_four_rotations_is_identity() {
        for kind in PieceKind::ALL {
            let shape = shape_of(kind);
            let back = shape.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(back, shape, "{:?}", kind);
        }
    }

    #[test]
    fn test_spawn_positions() {
        assert_eq!(spawn_position(&shape_of(PieceKind::I)), (0, 3));
        assert_eq!(spawn_position(&shape_of(PieceKind::O)), (0, 3));
        assert_eq!(spawn_position(&shape_of(PieceKind::T)), (-1, 5));
        assert_eq!(spawn_position(&shape_of(PieceKind::Z)), (-1, 5));
    }
}
