//! The cell grid backing the canvas.

use crate::color::PixelColor;

/// A `cols × rows` array of cell colors, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<PixelColor>,
}

impl Grid {
    /// Create a grid with every cell set to `fill`.
    pub fn new(cols: usize, rows: usize, fill: PixelColor) -> Self {
        Self {
            cols,
            rows,
            cells: vec![fill; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Dimensions as `(cols, rows)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// Check whether signed cell coordinates fall inside the grid.
    pub fn contains(&self, col: i64, row: i64) -> bool {
        col >= 0 && row >= 0 && (col as usize) < self.cols && (row as usize) < self.rows
    }

    #[inline]
    fn index(&self, col: usize, row: usize) -> Option<usize> {
        (col < self.cols && row < self.rows).then(|| row * self.cols + col)
    }

    /// Color of the cell at `(col, row)`, or `None` when out of bounds.
    pub fn get(&self, col: usize, row: usize) -> Option<PixelColor> {
        self.index(col, row).map(|i| self.cells[i])
    }

    /// Set a cell. Out-of-bounds writes are ignored.
    pub fn set(&mut self, col: usize, row: usize, color: PixelColor) {
        if let Some(i) = self.index(col, row) {
            self.cells[i] = color;
        }
    }

    /// Build a grid of new dimensions, copying the region shared with `self`
    /// (anchored at the origin) and filling the rest with `background`.
    pub fn resized(&self, cols: usize, rows: usize, background: PixelColor) -> Self {
        let mut grid = Self::new(cols, rows, background);
        let keep_cols = cols.min(self.cols);
        for row in 0..rows.min(self.rows) {
            let src = row * self.cols;
            let dst = row * cols;
            grid.cells[dst..dst + keep_cols].copy_from_slice(&self.cells[src..src + keep_cols]);
        }
        grid
    }

    /// Iterate over rows as slices, top to bottom.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[PixelColor]> {
        // chunks_exact panics on a zero chunk size
        self.cells.chunks_exact(self.cols.max(1)).take(self.rows)
    }

    /// Iterate over every cell as `(col, row, color)`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, PixelColor)> + '_ {
        self.rows_iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, &color)| (col, row, color))
        })
    }

    /// Number of cells that differ from `color`.
    pub fn count_not(&self, color: PixelColor) -> usize {
        self.cells.iter().filter(|&&c| c != color).count()
    }
}
