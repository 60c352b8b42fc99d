//! Board module - the cell grid
//!
//! A `height x width` grid addressed as `(row, col)`, row 0 at the top. The
//! first `margin_rows` rows are spawn headroom; the rest are playable.
//! Storage is a flat row-major vector whose length never changes.
//!
//! Cells carry two flags besides `occupied`: `placed` for locked blocks and
//! `current` for the projection of the falling piece. Only placed cells block
//! movement; the projection is rewritten by the session after every command.

use thiserror::Error;

use crate::types::{Coord, Rgb, BOARD_HEIGHT, BOARD_WIDTH, EMPTY_COLOR, MARGIN_ROWS};

/// One grid slot. Invariant: `placed` implies `occupied`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub occupied: bool,
    /// Belongs to the still-falling piece.
    pub current: bool,
    /// Locked; only line clears remove it.
    pub placed: bool,
    pub color: Rgb,
}

impl Cell {
    pub const fn empty(color: Rgb) -> Self {
        Self {
            occupied: false,
            current: false,
            placed: false,
            color,
        }
    }

    pub const fn placed(color: Rgb) -> Self {
        Self {
            occupied: true,
            current: false,
            placed: true,
            color,
        }
    }

    pub const fn current(color: Rgb) -> Self {
        Self {
            occupied: true,
            current: true,
            placed: false,
            color,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::empty(EMPTY_COLOR)
    }
}

/// Grid access outside `[0, height) x [0, width)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cell ({row}, {col}) is outside the {height}x{width} grid")]
pub struct BoundsError {
    pub row: i8,
    pub col: i8,
    pub height: u8,
    pub width: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: u8,
    height: u8,
    margin_rows: u8,
    empty: Cell,
    /// Row-major (row * width + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Standard 10x23 board with 3 margin rows
    pub fn new() -> Self {
        Self::with_dimensions(BOARD_WIDTH, BOARD_HEIGHT, MARGIN_ROWS, EMPTY_COLOR)
    }

    pub fn with_dimensions(width: u8, height: u8, margin_rows: u8, empty_color: Rgb) -> Self {
        let empty = Cell::empty(empty_color);
        Self {
            width,
            height,
            margin_rows: margin_rows.min(height),
            empty,
            cells: vec![empty; width as usize * height as usize],
        }
    }

    #[inline(always)]
    fn index(&self, row: i8, col: i8) -> Option<usize> {
        if self.contains(row, col) {
            Some(row as usize * self.width as usize + col as usize)
        } else {
            None
        }
    }

    fn bounds_error(&self, row: i8, col: i8) -> BoundsError {
        BoundsError {
            row,
            col,
            height: self.height,
            width: self.width,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn margin_rows(&self) -> u8 {
        self.margin_rows
    }

    pub fn playable_rows(&self) -> u8 {
        self.height - self.margin_rows
    }

    pub fn is_margin_row(&self, row: i8) -> bool {
        row >= 0 && (row as u8) < self.margin_rows
    }

    pub fn contains(&self, row: i8, col: i8) -> bool {
        row >= 0 && col >= 0 && (row as u8) < self.height && (col as u8) < self.width
    }

    pub fn get(&self, row: i8, col: i8) -> Result<&Cell, BoundsError> {
        match self.index(row, col) {
            Some(idx) => Ok(&self.cells[idx]),
            None => Err(self.bounds_error(row, col)),
        }
    }

    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> Result<(), BoundsError> {
        let idx = self
            .index(row, col)
            .ok_or_else(|| self.bounds_error(row, col))?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Lock a block at `(row, col)`.
    pub fn place(&mut self, row: i8, col: i8, color: Rgb) -> Result<(), BoundsError> {
        self.set(row, col, Cell::placed(color))
    }

    /// In bounds and holding a locked block
    pub fn is_placed(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Ok(cell) if cell.placed)
    }

    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Ok(cell) if cell.occupied)
    }

    /// Cells of one row, left to right
    pub fn row(&self, row: usize) -> &[Cell] {
        let width = self.width as usize;
        &self.cells[row * width..(row + 1) * width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width as usize)
    }

    pub fn is_row_full(&self, row: usize) -> bool {
        row < self.height as usize && self.row(row).iter().all(|cell| cell.occupied)
    }

    /// Remove every full playable row and refill from the margin boundary
    ///
    /// Scans bottom to top. Surviving rows slide down over the removed ones and
    /// the same number of empty rows appear just below the margin, so the row
    /// count is unchanged and margin rows never move. Returns the number of
    /// rows removed.
    pub fn scan_and_clear_full_rows(&mut self) -> usize {
        let width = self.width as usize;
        let top = self.margin_rows as usize;
        let mut write_row = self.height as usize;
        let mut cleared = 0;

        for read_row in (top..self.height as usize).rev() {
            if self.is_row_full(read_row) {
                cleared += 1;
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                let src = read_row * width;
                self.cells.copy_within(src..src + width, write_row * width);
            }
        }

        let empty = self.empty;
        self.cells[top * width..write_row * width].fill(empty);

        cleared
    }

    /// Lock a set of cells with one color
    ///
    /// Nothing is written unless every cell is inside the grid.
    pub fn lock_cells(&mut self, cells: &[Coord], color: Rgb) -> Result<(), BoundsError> {
        if let Some(&(row, col)) = cells.iter().find(|&&(r, c)| !self.contains(r, c)) {
            return Err(self.bounds_error(row, col));
        }
        for &(row, col) in cells {
            self.place(row, col, color)?;
        }
        Ok(())
    }

    /// Mark the falling piece's cells. Locked cells are left alone.
    pub fn project_current(&mut self, cells: &[Coord], color: Rgb) -> Result<(), BoundsError> {
        for &(row, col) in cells {
            let idx = self
                .index(row, col)
                .ok_or_else(|| self.bounds_error(row, col))?;
            if !self.cells[idx].placed {
                self.cells[idx] = Cell::current(color);
            }
        }
        Ok(())
    }

    /// Erase the falling piece's projection.
    pub fn clear_current(&mut self) {
        let empty = self.empty;
        for cell in self.cells.iter_mut().filter(|c| c.current && !c.placed) {
            *cell = empty;
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
