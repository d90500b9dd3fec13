//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Rows above the top (y < 0) are open space: pieces may hang there while spawning.

use arrayvec::ArrayVec;

use crate::pieces::ActivePiece;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Row indices removed by a clear, bottom to top
pub type ClearedRows = ArrayVec<usize, HEIGHT>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_none()
    }

    /// Check if a mino may not occupy (x, y).
    ///
    /// Blocked means outside the side walls, at or below the floor, or on a
    /// filled cell. Cells above the top row are never blocked on their own.
    #[inline]
    pub fn is_blocked(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return true;
        }
        y >= 0 && self.is_occupied(x, y)
    }

    /// Check if any mino of `piece` is blocked at its position
    pub fn collides(&self, piece: &ActivePiece) -> bool {
        piece.cells().iter().any(|&(x, y)| self.is_blocked(x, y))
    }

    /// Write the piece's kind into every covered cell inside the board.
    /// Minos still above the top row are dropped.
    pub fn merge(&mut self, piece: &ActivePiece) {
        for (x, y) in piece.cells() {
            self.set(x, y, Some(piece.kind));
        }
    }

    /// Number of filled cells in row `y`
    pub fn row_fill_count(&self, y: usize) -> usize {
        if y >= HEIGHT {
            return 0;
        }
        self.row(y).iter().filter(|cell| cell.is_some()).count()
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < HEIGHT && self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Cells of row `y` (caller guarantees `y < BOARD_HEIGHT`)
    fn row(&self, y: usize) -> &[Cell] {
        let start = y * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Remove every complete row and return how many were removed
    pub fn scan_and_clear(&mut self) -> usize {
        self.clear_full_rows().len()
    }

    /// Remove every complete row and return their indices (bottom to top).
    ///
    /// Full rows are collected first, then a new grid is built from the
    /// surviving rows in order with empty rows prepended at the top.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let cleared: ClearedRows = (0..HEIGHT).rev().filter(|&y| self.is_row_full(y)).collect();
        if !cleared.is_empty() {
            self.rebuild_without(&cleared);
        }
        cleared
    }

    /// Remove a single row, shifting everything above it down by one
    pub fn remove_row(&mut self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        self.rebuild_without(&[y]);
        true
    }

    fn rebuild_without(&mut self, removed: &[usize]) {
        let mut next = [None; BOARD_SIZE];
        let mut write_y = HEIGHT;
        for read_y in (0..HEIGHT).rev() {
            if removed.contains(&read_y) {
                continue;
            }
            write_y -= 1;
            let src = read_y * WIDTH;
            let dst = write_y * WIDTH;
            next[dst..dst + WIDTH].copy_from_slice(&self.cells[src..src + WIDTH]);
        }
        // Rows 0..write_y stay empty.
        self.cells = next;
    }

    /// Row with the most filled cells; ties go to the lowest row index
    /// (the first row met scanning from the top).
    pub fn fullest_row(&self) -> usize {
        let mut best_row = 0;
        let mut best_count = 0;
        for y in 0..HEIGHT {
            let count = self.row_fill_count(y);
            if count > best_count {
                best_count = count;
                best_row = y;
            }
        }
        best_row
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the grid into a row-major 2D array
    pub fn write_grid(&self, out: &mut [[Cell; WIDTH]; HEIGHT]) {
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(self.row(y));
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
    }

    /// Fill a whole row with `kind`, optionally leaving one column open
    pub fn fill_row(&mut self, y: usize, kind: PieceKind, gap: Option<usize>) {
        if y >= HEIGHT {
            return;
        }
        for x in 0..WIDTH {
            let cell = if gap == Some(x) { None } else { Some(kind) };
            self.cells[y * WIDTH + x] = cell;
        }
    }

    /// Create from a 2D vector (converts to flat array)
    pub fn from_cells(cells_2d: Vec<Vec<Cell>>) -> Self {
        debug_assert_eq!(cells_2d.len(), HEIGHT);
        let mut flat = [None; BOARD_SIZE];
        for (y, row) in cells_2d.iter().enumerate().take(HEIGHT) {
            for (x, cell) in row.iter().enumerate().take(WIDTH) {
                flat[y * WIDTH + x] = *cell;
            }
        }
        Self { cells: flat }
    }

    /// Convert to 2D vector for testing/display
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        (0..HEIGHT).map(|y| self.row(y).to_vec()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
