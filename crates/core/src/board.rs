//! Board module - manages the game grid
//!
//! The board is a `width x height` grid where each cell is empty (`0`) or holds
//! one of `colors` palette entries (`1..=colors`).
//! Uses a flat row-major vector; dimensions are fixed at construction.
//! Coordinates: (x, y) where x is the column (left to right) and y the row
//! (top to bottom). Rows above the board (y < 0) are never stored.

use anyhow::{ensure, Result};

use crate::types::{Cell, Position, EMPTY};

/// The game board
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: u8,
    height: u8,
    colors: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: u8, height: u8, colors: u8) -> Self {
        Self {
            width,
            height,
            colors,
            cells: vec![EMPTY; width as usize * height as usize],
        }
    }

    /// Build a board from row-major data (row 0 first).
    ///
    /// Rejects empty or ragged input and any value above `colors`.
    pub fn from_rows<R: AsRef<[Cell]>>(rows: &[R], colors: u8) -> Result<Self> {
        ensure!(!rows.is_empty(), "board: no rows");
        ensure!(rows.len() <= i8::MAX as usize, "board: too many rows ({})", rows.len());
        let width = rows[0].as_ref().len();
        ensure!(width > 0, "board: empty first row");
        ensure!(width <= i8::MAX as usize, "board: too many columns ({})", width);

        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            ensure!(
                row.len() == width,
                "board: row {} has {} cells, expected {}",
                y,
                row.len(),
                width
            );
            for (x, &cell) in row.iter().enumerate() {
                ensure!(
                    cell <= colors,
                    "board: cell ({}, {}) has color {} outside 0..={}",
                    x,
                    y,
                    cell,
                    colors
                );
            }
            cells.extend_from_slice(row);
        }

        Ok(Self {
            width: width as u8,
            height: rows.len() as u8,
            colors,
            cells,
        })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Size of the palette; valid cell values are `0..=colors`
    pub fn colors(&self) -> u8 {
        self.colors
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    pub fn get_at(&self, pos: Position) -> Option<Cell> {
        self.get(pos.x, pos.y)
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub(crate) fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        debug_assert!(cell <= self.colors, "color {} outside palette", cell);
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Zero out every listed position that lies on the board
    pub(crate) fn clear_cells(&mut self, positions: &[Position]) {
        for pos in positions {
            self.set(pos.x, pos.y, EMPTY);
        }
    }

    /// Check if position is inside the grid
    pub fn in_bounds(&self, x: i8, y: i8) -> bool {
        x >= 0 && y >= 0 && (x as u8) < self.width && (y as u8) < self.height
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_empty(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(EMPTY))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(c) if c != EMPTY)
    }

    /// Number of non-empty cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width as usize)
    }

    /// Copy the grid into a reusable row buffer.
    pub fn write_rows(&self, out: &mut Vec<Vec<Cell>>) {
        out.resize_with(self.height as usize, Vec::new);
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.clear();
            dst.extend_from_slice(src);
        }
    }

    /// Convert to 2D vector for display/testing
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        let mut out = Vec::new();
        self.write_rows(&mut out);
        out
    }
}
