//! Board module - the fixed-size grid of locked cells
//!
//! The grid is `rows x cols` cells, each empty or tagged with the kind of the
//! piece that locked there. Uses a flat array (row-major, `y * cols + x`) for
//! cache locality.
//!
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//! Rows above the top edge (y < 0) are open space: they never read as
//! occupied and cells merged there are dropped.

use crate::pieces::Shape;
use crate::types::{Cell, PieceKind};

/// The game grid; dimensions are fixed at creation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order (y * cols + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.cols || y as usize >= self.rows {
            return None;
        }
        Some(y as usize * self.cols + x as usize)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether (x, y) holds a locked cell
    ///
    /// Anything outside the grid, including the open space above it, is not
    /// occupied. Walls and floor are the collision check's concern.
    pub fn is_cell_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Borrow row `y`, `None` past the bottom
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.rows {
            return None;
        }
        let start = y * self.cols;
        self.cells.get(start..start + self.cols)
    }

    /// Iterate rows from top to bottom
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.cols.max(1))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Write every filled shape cell at `x, y` into the grid
    ///
    /// Cells above the top edge are dropped silently; a piece may lock while
    /// partly off-screen.
    pub fn merge_in_place(&mut self, shape: &Shape, x: i32, y: i32, kind: PieceKind) {
        for (dx, dy) in shape.filled_cells() {
            let gy = y + dy;
            if gy < 0 {
                continue;
            }
            let written = self.set(x + dx, gy, Some(kind));
            debug_assert!(written, "merge outside grid at ({}, {})", x + dx, gy);
        }
    }

    /// Return a copy of the grid with the shape merged at `x, y`
    pub fn merge(&self, shape: &Shape, x: i32, y: i32, kind: PieceKind) -> Grid {
        let mut out = self.clone();
        out.merge_in_place(shape, x, y, kind);
        out
    }

    /// Remove every full row and refill the top with empty rows
    ///
    /// Remaining rows keep their relative order. Uses a two-pointer
    /// compaction from the bottom up. Returns the number of rows removed.
    pub fn clear_full_rows_in_place(&mut self) -> usize {
        let width = self.cols;
        let mut write_y = self.rows;
        let mut cleared = 0usize;

        // Scan from bottom to top
        for read_y in (0..self.rows).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_y * width);
                }
            }
        }

        // Clear the remaining rows at the top
        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared
    }

    /// Return the compacted grid and the number of rows removed
    pub fn clear_full_rows(&self) -> (Grid, usize) {
        let mut out = self.clone();
        let cleared = out.clear_full_rows_in_place();
        (out, cleared)
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Rows as owned vectors
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.iter_rows().map(|row| row.to_vec()).collect()
    }

    /// One line per row, `X` for occupied and `.` for empty
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for (y, row) in self.iter_rows().enumerate() {
            if y > 0 {
                out.push('\n');
            }
            out.extend(row.iter().map(|c| if c.is_some() { 'X' } else { '.' }));
        }
        out
    }
}
