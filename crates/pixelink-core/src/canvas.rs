//! Canvas model: grid, brush, current color and history.

use crate::brush::BrushSize;
use crate::color::{PixelColor, palette_color};
use crate::grid::Grid;
use crate::history::History;
use crate::storage::PixelSampler;

/// Editable pixel-art canvas.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// Cell colors.
    grid: Grid,
    /// Current brush size.
    brush: BrushSize,
    /// Color applied by `paint`.
    current_color: PixelColor,
    /// Fill for newly exposed cells.
    background: PixelColor,
    /// Undo/redo snapshots.
    history: History,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Canvas {
    /// Create a blank canvas of `cols × rows` cells.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self::with_history(cols, rows, History::new())
    }

    /// Create a blank canvas with a custom history.
    pub fn with_history(cols: usize, rows: usize, history: History) -> Self {
        let background = PixelColor::WHITE;
        Self {
            grid: Grid::new(cols, rows, background),
            brush: BrushSize::default(),
            current_color: PixelColor::BLACK,
            background,
            history,
        }
    }

    /// Use a different background color. Repaints the whole grid.
    pub fn with_background(mut self, background: PixelColor) -> Self {
        self.background = background;
        self.grid = Grid::new(self.grid.cols(), self.grid.rows(), background);
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Grid dimensions as `(cols, rows)`.
    pub fn dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<PixelColor> {
        self.grid.get(col, row)
    }

    pub fn brush_size(&self) -> BrushSize {
        self.brush
    }

    pub fn current_color(&self) -> PixelColor {
        self.current_color
    }

    pub fn background(&self) -> PixelColor {
        self.background
    }

    /// Start a stroke: record an undo point and drop redo history.
    ///
    /// Call once per pointer-down, before the first `paint` of the stroke.
    pub fn begin_stroke(&mut self) {
        self.history.push_undo(&self.grid);
    }

    /// Paint the brush footprint centered on `(col, row)` with the current
    /// color. Cells outside the grid are skipped.
    pub fn paint(&mut self, col: i64, row: i64) {
        for (dx, dy) in self.brush.offsets() {
            let (c, r) = (col + dx, row + dy);
            if self.grid.contains(c, r) {
                self.grid.set(c as usize, r as usize, self.current_color);
            }
        }
    }

    /// Reallocate the grid, keeping the origin-aligned overlap.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        if self.grid.dimensions() == (cols, rows) {
            return;
        }
        log::debug!(
            "Resizing canvas {:?} -> {:?}",
            self.grid.dimensions(),
            (cols, rows)
        );
        self.grid = self.grid.resized(cols, rows, self.background);
    }

    /// Undo the last stroke.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.grid)
    }

    /// Redo the last undone stroke.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.grid)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Grow or shrink the brush by `delta`, clamped to the valid range.
    pub fn adjust_brush_size(&mut self, delta: i32) {
        self.brush = self.brush.adjusted(delta);
    }

    /// Select the palette color at `index`.
    /// Returns false and leaves the color unchanged if `index` is out of range.
    pub fn set_color(&mut self, index: usize) -> bool {
        match palette_color(index) {
            Some(color) => {
                self.current_color = color;
                true
            }
            None => false,
        }
    }

    /// Repopulate every cell from the pixel at the cell's top-left corner.
    ///
    /// Cells whose sample falls outside the image keep their color. Returns
    /// the number of such cells.
    pub fn sample_from<S: PixelSampler + ?Sized>(&mut self, sampler: &S, cell_size: u32) -> usize {
        let (cols, rows) = self.grid.dimensions();
        let mut missed = 0;
        for row in 0..rows {
            for col in 0..cols {
                let x = col as u64 * cell_size as u64;
                let y = row as u64 * cell_size as u64;
                let sample = u32::try_from(x)
                    .ok()
                    .zip(u32::try_from(y).ok())
                    .and_then(|(x, y)| sampler.sample(x, y));
                match sample {
                    Some(color) => self.grid.set(col, row, color),
                    None => missed += 1,
                }
            }
        }
        if missed > 0 {
            log::warn!("{} cells fell outside the loaded image", missed);
        }
        missed
    }
}
