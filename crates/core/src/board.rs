//! Board module - manages the well grid
//!
//! The board is a 21x12 grid whose outer columns and bottom row are permanent
//! walls. Cells live in a flat row-major array for cache locality and so the
//! board can be copied without allocation.
//!
//! Coordinates are (row, col): row 0 is the top visible row, row 20 the floor;
//! col 0 and col 11 are the side walls. Rows above the well (row < 0) do not
//! exist in storage but are legal positions for a piece that has not locked.

use arrayvec::ArrayVec;

use crate::catalog::Shape;
use crate::piece::Piece;
use crate::types::{Block, Cell, BOARD_COLS, BOARD_ROWS};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_ROWS as usize) * (BOARD_COLS as usize);

/// Number of rows that can ever be full (everything above the floor)
pub const INTERIOR_ROWS: usize = BOARD_ROWS as usize - 1;

/// Row indices removed by a line clear, bottom to top
pub type FullRows = ArrayVec<usize, INTERIOR_ROWS>;

/// The well - 21 rows x 12 columns, walls included
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * COLS + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new board with walls set and an empty interior
    pub fn new() -> Self {
        let mut board = Self {
            cells: [None; BOARD_SIZE],
        };
        board.initialize();
        board
    }

    /// Reset to walls + empty interior
    pub fn initialize(&mut self) {
        for row in 0..BOARD_ROWS as i8 {
            for col in 0..BOARD_COLS as i8 {
                let cell = if Self::is_border(row, col) {
                    Some(Block::Wall)
                } else {
                    None
                };
                self.set(row, col, cell);
            }
        }
    }

    /// Whether (row, col) is part of the permanent border
    pub fn is_border(row: i8, col: i8) -> bool {
        col == 0 || col == BOARD_COLS as i8 - 1 || row == BOARD_ROWS as i8 - 1
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= BOARD_ROWS as i8 || col < 0 || col >= BOARD_COLS as i8 {
            return None;
        }
        Some((row as usize) * (BOARD_COLS as usize) + (col as usize))
    }

    pub fn rows(&self) -> u8 {
        BOARD_ROWS
    }

    pub fn cols(&self) -> u8 {
        BOARD_COLS
    }

    /// Get cell at (row, col); None if out of bounds
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col); false if out of bounds
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether (row, col) blocks a piece.
    ///
    /// Columns outside the grid and rows at or below the grid block. Rows above
    /// the grid (row < 0) are open so pieces can overhang before locking.
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        if col < 0 || col >= BOARD_COLS as i8 || row >= BOARD_ROWS as i8 {
            return true;
        }
        if row < 0 {
            return false;
        }
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// Commit every mask cell of `piece` to the board, tagged with its kind.
    ///
    /// Cells above the well are dropped since there is nowhere to store them.
    pub fn place(&mut self, piece: &Piece) {
        self.place_shape(&piece.shape, piece.row, piece.col, Block::Piece(piece.kind));
    }

    /// Commit a raw mask at (row, col)
    pub fn place_shape(&mut self, shape: &Shape, row: i8, col: i8, block: Block) {
        for (dr, dc) in shape.minos() {
            self.set(row + dr, col + dc, Some(block));
        }
    }

    /// Check if an interior row is completely filled (the floor never is)
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= INTERIOR_ROWS {
            return false;
        }
        let start = row * BOARD_COLS as usize;
        self.cells[start + 1..start + BOARD_COLS as usize - 1]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Every full interior row, bottom to top
    pub fn find_full_rows(&self) -> FullRows {
        (0..INTERIOR_ROWS)
            .rev()
            .filter(|&row| self.is_row_full(row))
            .collect()
    }

    /// Remove the given rows, shifting everything above each one down.
    ///
    /// Rows are processed bottom to top; each removal moves the rows above it
    /// down by one, so the row index of a still-pending row is offset by the
    /// number of rows already removed beneath it. Duplicates and rows outside
    /// the interior are ignored. Returns the number of rows removed.
    pub fn collapse_rows(&mut self, rows: &[usize]) -> usize {
        let mut marked = [false; INTERIOR_ROWS];
        for &row in rows {
            if row < INTERIOR_ROWS {
                marked[row] = true;
            }
        }

        let mut removed = 0usize;
        for row in (0..INTERIOR_ROWS).rev() {
            if marked[row] {
                self.remove_row(row + removed);
                removed += 1;
            }
        }
        removed
    }

    /// Find and remove all full rows, returning the removed indices
    pub fn clear_full_rows(&mut self) -> FullRows {
        let full = self.find_full_rows();
        self.collapse_rows(&full);
        full
    }

    /// Shift the interior of every row above `row` down by one and empty the
    /// top row. Walls are left untouched.
    fn remove_row(&mut self, row: usize) {
        let width = BOARD_COLS as usize;
        let interior = 1..width - 1;

        for r in (1..=row).rev() {
            let src = (r - 1) * width;
            let dst = r * width;
            self.cells
                .copy_within(src + interior.start..src + interior.end, dst + interior.start);
        }

        for cell in &mut self.cells[interior] {
            *cell = None;
        }
    }

    /// Number of occupied interior cells
    pub fn filled_interior_cells(&self) -> usize {
        (0..INTERIOR_ROWS as i8)
            .flat_map(|row| (1..BOARD_COLS as i8 - 1).map(move |col| (row, col)))
            .filter(|&(row, col)| self.is_occupied(row, col))
            .count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write the grid into a 2D array (row-major), for snapshots
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_COLS as usize]; BOARD_ROWS as usize]) {
        for (row, chunk) in self.cells.chunks_exact(BOARD_COLS as usize).enumerate() {
            out[row].copy_from_slice(chunk);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
