//! Grid module - the square 2048 board and its pure queries
//!
//! The grid is an N x N board where each cell is empty or holds a power of two.
//! Uses a flat vector in row-major order (`row * size + col`).
//! Coordinates: `(row, col)` with the origin at the top-left.
//!
//! Grids are plain values. Every transformation in this crate returns a new
//! grid and leaves its input untouched, so callers can diff the previous board
//! against the next one.

use std::fmt;

use thiserror::Error;

use crate::types::{Cell, Position, MAX_TILE, MIN_GRID_SIZE, TARGET_TILE};

/// Rejected input when building a grid from caller-supplied rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid size {0} is below the minimum of 2")]
    TooSmall(usize),
    #[error("row {row} has {len} cells, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("cell ({row}, {col}) holds {value}, which is not a power of two in 2..=2^30")]
    InvalidTile { row: usize, col: usize, value: u32 },
}

/// The game board - `size` x `size` cells using flat vector storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    /// Flat array of cells, row-major order (row * size + col)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty `size` x `size` grid.
    ///
    /// # Panics
    ///
    /// Panics if `size < 2`. A smaller board is a caller bug, not a runtime condition.
    pub fn new(size: usize) -> Self {
        assert!(
            size >= MIN_GRID_SIZE,
            "grid size must be at least {MIN_GRID_SIZE}, got {size}"
        );
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Build a grid from rows, validating shape and tile values.
    pub fn from_rows<R: AsRef<[Cell]>>(rows: &[R]) -> Result<Self, GridError> {
        let size = rows.len();
        if size < MIN_GRID_SIZE {
            return Err(GridError::TooSmall(size));
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != size {
                return Err(GridError::Ragged {
                    row,
                    len: r.len(),
                    expected: size,
                });
            }
            for (col, cell) in r.iter().enumerate() {
                if let Some(value) = *cell {
                    if value < 2 || value > MAX_TILE || !value.is_power_of_two() {
                        return Err(GridError::InvalidTile { row, col, value });
                    }
                }
                cells.push(*cell);
            }
        }

        Ok(Self { size, cells })
    }

    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if pos.row >= self.size || pos.col >= self.size {
            return None;
        }
        Some(pos.row * self.size + pos.col)
    }

    /// Side length of the board
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get cell at `pos`
    /// Returns None if out of bounds
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Set cell at `pos`
    /// Returns false if out of bounds
    pub(crate) fn set(&mut self, pos: Position, cell: Cell) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Borrow row `row`.
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.size;
        &self.cells[start..start + self.size]
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [Cell] {
        let start = row * self.size;
        &mut self.cells[start..start + self.size]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.size)
    }

    /// Flat row-major view of every cell.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy out as nested rows (handy for assertions and serialization).
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(<[Cell]>::to_vec).collect()
    }

    /// Empty positions in row-major scan order.
    pub fn empty_positions(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(idx, _)| Position::new(idx / self.size, idx % self.size))
            .collect()
    }

    pub fn has_empty_cell(&self) -> bool {
        self.cells.iter().any(Option::is_none)
    }

    /// True when no move can change the board: the grid is full and no
    /// horizontal or vertical neighbours share a value.
    pub fn is_terminal(&self) -> bool {
        if self.has_empty_cell() {
            return false;
        }

        let n = self.size;
        for row in 0..n {
            for col in 0..n {
                let current = self.cells[row * n + col];
                if col + 1 < n && self.cells[row * n + col + 1] == current {
                    return false;
                }
                if row + 1 < n && self.cells[(row + 1) * n + col] == current {
                    return false;
                }
            }
        }

        true
    }

    /// True if any tile equals `target`.
    pub fn has_reached_target(&self, target: u32) -> bool {
        self.cells.iter().any(|cell| *cell == Some(target))
    }

    /// [`Grid::has_reached_target`] with the standard 2048 target.
    pub fn has_won(&self) -> bool {
        self.has_reached_target(TARGET_TILE)
    }

    /// Return a copy rotated clockwise by `times` quarter turns.
    ///
    /// Cell `(r, c)` moves to `(c, size - 1 - r)` per turn, the same mapping as
    /// [`Position::rotate_cw`].
    pub fn rotate_cw(&self, times: usize) -> Grid {
        let n = self.size;
        let mut out = self.clone();
        for _ in 0..times % 4 {
            let src = out.cells.clone();
            for row in 0..n {
                for col in 0..n {
                    out.cells[col * n + (n - 1 - row)] = src[row * n + col];
                }
            }
        }
        out
    }

    /// Largest tile on the board (0 when empty).
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Sum of all tile values.
    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().flatten().map(|v| *v as u64).sum()
    }

    /// Number of occupied cells.
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                match cell {
                    Some(v) => write!(f, "{v:>5}")?,
                    None => write!(f, "{:>5}", ".")?,
                }
            }
        }
        Ok(())
    }
}
