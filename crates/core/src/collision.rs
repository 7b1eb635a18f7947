//! Collision & kick resolver - legality checks for moving and rotating
//!
//! Rotation uses a deliberately small kick search instead of SRS tables: the
//! rotated mask is tried at every combination of the row offsets
//! `[0, -1, +1, 0]` and column offsets `[0, 0, 0, -1, +1]`, rows outermost,
//! and the first legal combination wins. The repeated zeros are part of the
//! search order: (0,-1) and (0,+1) are tried before any row offset.

use crate::board::Board;
use crate::catalog::Shape;
use crate::piece::Piece;

/// Row offsets tried on rotation, outer loop
pub const KICK_ROW_OFFSETS: [i8; 4] = [0, -1, 1, 0];

/// Column offsets tried on rotation, inner loop
pub const KICK_COL_OFFSETS: [i8; 5] = [0, 0, 0, -1, 1];

/// Whether every filled cell of `shape`, anchored at (row, col), lands on a
/// free board cell. Cells above the well count as free.
pub fn can_occupy(board: &Board, shape: &Shape, row: i8, col: i8) -> bool {
    shape
        .minos()
        .all(|(dr, dc)| !board.is_occupied(row + dr, col + dc))
}

/// Whether `piece` could be shifted by (d_row, d_col)
pub fn can_move_by(board: &Board, piece: &Piece, d_row: i8, d_col: i8) -> bool {
    can_occupy(board, &piece.shape, piece.row + d_row, piece.col + d_col)
}

/// Every kick offset (d_row, d_col) in search order (4 x 5 = 20 entries)
pub fn kick_offsets() -> impl Iterator<Item = (i8, i8)> {
    KICK_ROW_OFFSETS
        .into_iter()
        .flat_map(|dr| KICK_COL_OFFSETS.into_iter().map(move |dc| (dr, dc)))
}

/// Rotate `piece` 90° clockwise, kicking it to the first legal offset.
///
/// Returns the rotated piece, or `None` when every offset is blocked (the
/// caller keeps the original piece untouched).
pub fn try_rotate(board: &Board, piece: &Piece) -> Option<Piece> {
    let rotated = piece.shape.rotated_cw();
    kick_offsets()
        .map(|(dr, dc)| (piece.row + dr, piece.col + dc))
        .find(|&(row, col)| can_occupy(board, &rotated, row, col))
        .map(|(row, col)| Piece {
            shape: rotated,
            row,
            col,
            ..*piece
        })
}

/// Lowest row the piece reaches by falling straight down
///
/// This is the hard drop target and the landing prediction shown under the
/// active piece.
pub fn drop_row(board: &Board, piece: &Piece) -> i8 {
    let mut distance: i8 = 0;
    while can_move_by(board, piece, distance + 1, 0) {
        distance += 1;
    }
    piece.row + distance
}
