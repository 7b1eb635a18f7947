//! Piece state - a piece instance's mask and board anchor

use crate::catalog::{shape_of, spawn_position, Shape};
use crate::types::PieceKind;

/// A live piece: its kind, current mask, and the board cell its mask's
/// top-left corner sits on.
///
/// Rotation replaces `shape` with a new mask instead of tracking an
/// orientation, so board coordinates are always `anchor + mask offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub row: i8,
    pub col: i8,
}

impl Piece {
    /// Create a piece in its canonical mask at its spawn anchor
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = shape_of(kind);
        let (row, col) = spawn_position(&shape);
        Self {
            kind,
            shape,
            row,
            col,
        }
    }

    /// Board coordinates (row, col) of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .minos()
            .map(move |(dr, dc)| (self.row + dr, self.col + dc))
    }

    /// Same piece shifted by (d_row, d_col)
    pub fn shifted(&self, d_row: i8, d_col: i8) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
            ..*self
        }
    }
}
