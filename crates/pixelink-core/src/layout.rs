//! Window geometry: canvas cells and the sidebar controls.
//!
//! The window is split into the cell canvas on the left and a fixed-width
//! sidebar on the right. All sidebar positions are measured from the
//! sidebar's left edge (`width - sidebar_width`).

use kurbo::{Point, Rect};

/// Side length of one cell in pixels.
pub const CELL_SIZE: u32 = 20;
/// Width of the right-hand sidebar in pixels.
pub const SIDEBAR_WIDTH: u32 = 200;

/// Horizontal inset of buttons, label and swatches inside the sidebar.
const CONTROL_INSET: f64 = 20.0;
/// Width shared by the brush buttons and the palette swatches.
const CONTROL_WIDTH: f64 = 50.0;
const BUTTON_HEIGHT: f64 = 30.0;
const PLUS_BUTTON_Y: f64 = 20.0;
const MINUS_BUTTON_Y: f64 = 60.0;
const LABEL_Y: f64 = 100.0;
const PALETTE_ORIGIN_Y: u32 = 120;
const SWATCH_SIZE: u32 = 50;

/// Where a pointer position lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Over the canvas, at the given cell. The cell may lie past the last
    /// full row or column.
    Canvas { col: i64, row: i64 },
    /// Over the sidebar.
    Sidebar,
    /// Outside the window.
    Outside,
}

/// A clickable control in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarHit {
    BrushIncrease,
    BrushDecrease,
    Swatch(usize),
}

/// Geometry for a window of a given size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
    pub sidebar_width: u32,
}

impl Layout {
    /// Layout with the default cell size and sidebar width.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_metrics(width, height, CELL_SIZE, SIDEBAR_WIDTH)
    }

    pub fn with_metrics(width: u32, height: u32, cell_size: u32, sidebar_width: u32) -> Self {
        Self {
            width,
            height,
            cell_size: cell_size.max(1),
            sidebar_width,
        }
    }

    /// Same metrics, new window size.
    pub fn resized(self, width: u32, height: u32) -> Self {
        Self { width, height, ..self }
    }

    /// Width of the drawable canvas region.
    pub fn canvas_width(&self) -> u32 {
        self.width.saturating_sub(self.sidebar_width)
    }

    /// Grid dimensions `(cols, rows)` that fit the canvas region.
    pub fn grid_dimensions(&self) -> (usize, usize) {
        (
            (self.canvas_width() / self.cell_size) as usize,
            (self.height / self.cell_size) as usize,
        )
    }

    /// Left edge of the sidebar.
    fn sidebar_x(&self) -> f64 {
        self.canvas_width() as f64
    }

    /// Classify a pointer position.
    pub fn region_at(&self, point: Point) -> Region {
        if point.x < 0.0 || point.y < 0.0 {
            return Region::Outside;
        }
        let (x, y) = (point.x as u32, point.y as u32);
        if x >= self.width || y >= self.height {
            Region::Outside
        } else if x < self.canvas_width() {
            Region::Canvas {
                col: (x / self.cell_size) as i64,
                row: (y / self.cell_size) as i64,
            }
        } else {
            Region::Sidebar
        }
    }

    /// Which sidebar control, if any, lies under `point`.
    ///
    /// Controls are tested in order: "+" button, "-" button, palette swatch.
    pub fn sidebar_hit(&self, point: Point, palette_len: usize) -> Option<SidebarHit> {
        if self.region_at(point) != Region::Sidebar {
            return None;
        }
        if contains_inclusive(self.plus_button(), point) {
            return Some(SidebarHit::BrushIncrease);
        }
        if contains_inclusive(self.minus_button(), point) {
            return Some(SidebarHit::BrushDecrease);
        }
        let y = point.y as u32;
        if y < PALETTE_ORIGIN_Y {
            return None;
        }
        let index = ((y - PALETTE_ORIGIN_Y) / SWATCH_SIZE) as usize;
        (index < palette_len).then_some(SidebarHit::Swatch(index))
    }

    /// Pixel rectangle of a cell.
    pub fn cell_rect(&self, col: usize, row: usize) -> Rect {
        let size = self.cell_size as f64;
        let x = col as f64 * size;
        let y = row as f64 * size;
        Rect::new(x, y, x + size, y + size)
    }

    fn control_rect(&self, y: f64, height: f64) -> Rect {
        let x = self.sidebar_x() + CONTROL_INSET;
        Rect::new(x, y, x + CONTROL_WIDTH, y + height)
    }

    /// The brush "+" button.
    pub fn plus_button(&self) -> Rect {
        self.control_rect(PLUS_BUTTON_Y, BUTTON_HEIGHT)
    }

    /// The brush "-" button.
    pub fn minus_button(&self) -> Rect {
        self.control_rect(MINUS_BUTTON_Y, BUTTON_HEIGHT)
    }

    /// Top-left corner of the brush size label.
    pub fn label_origin(&self) -> Point {
        Point::new(self.sidebar_x() + CONTROL_INSET, LABEL_Y)
    }

    /// Rectangle of palette swatch `index`.
    pub fn swatch_rect(&self, index: usize) -> Rect {
        let y = (PALETTE_ORIGIN_Y + index as u32 * SWATCH_SIZE) as f64;
        self.control_rect(y, SWATCH_SIZE as f64)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(1000, 600)
    }
}

/// Point-in-rect test that includes the right and bottom edges.
fn contains_inclusive(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_dimensions() {
        let layout = Layout::new(1000, 600);
        assert_eq!(layout.grid_dimensions(), (40, 30));

        let layout = Layout::new(1019, 619);
        assert_eq!(layout.grid_dimensions(), (40, 30));

        let tiny = Layout::new(150, 10);
        assert_eq!(tiny.grid_dimensions(), (0, 0));
    }

    #[test]
    fn test_region_at() {
        let layout = Layout::new(1000, 600);
        assert_eq!(
            layout.region_at(Point::new(45.0, 21.0)),
            Region::Canvas { col: 2, row: 1 }
        );
        assert_eq!(layout.region_at(Point::new(799.9, 0.0)), Region::Canvas { col: 39, row: 0 });
        assert_eq!(layout.region_at(Point::new(800.0, 0.0)), Region::Sidebar);
        assert_eq!(layout.region_at(Point::new(-1.0, 10.0)), Region::Outside);
        assert_eq!(layout.region_at(Point::new(10.0, 600.0)), Region::Outside);
    }

    #[test]
    fn test_sidebar_buttons() {
        let layout = Layout::new(1000, 600);
        // Buttons span x in [820, 870].
        assert_eq!(
            layout.sidebar_hit(Point::new(820.0, 20.0), 14),
            Some(SidebarHit::BrushIncrease)
        );
        assert_eq!(
            layout.sidebar_hit(Point::new(870.0, 50.0), 14),
            Some(SidebarHit::BrushIncrease)
        );
        assert_eq!(
            layout.sidebar_hit(Point::new(845.0, 75.0), 14),
            Some(SidebarHit::BrushDecrease)
        );
        // Between the buttons and right of them.
        assert_eq!(layout.sidebar_hit(Point::new(845.0, 55.0), 14), None);
        assert_eq!(layout.sidebar_hit(Point::new(900.0, 30.0), 14), None);
    }

    #[test]
    fn test_sidebar_swatches() {
        let layout = Layout::new(1000, 600);
        assert_eq!(layout.sidebar_hit(Point::new(830.0, 120.0), 14), Some(SidebarHit::Swatch(0)));
        assert_eq!(layout.sidebar_hit(Point::new(830.0, 169.0), 14), Some(SidebarHit::Swatch(0)));
        assert_eq!(layout.sidebar_hit(Point::new(830.0, 170.0), 14), Some(SidebarHit::Swatch(1)));
        assert_eq!(layout.sidebar_hit(Point::new(830.0, 250.0), 14), Some(SidebarHit::Swatch(2)));
        // Gap between the "-" button and the palette.
        assert_eq!(layout.sidebar_hit(Point::new(830.0, 100.0), 14), None);
        // Below the last swatch.
        let tall = Layout::new(1000, 1000);
        assert_eq!(tall.sidebar_hit(Point::new(830.0, 819.0), 14), Some(SidebarHit::Swatch(13)));
        assert_eq!(tall.sidebar_hit(Point::new(830.0, 820.0), 14), None);
        // Canvas clicks never hit the sidebar.
        assert_eq!(layout.sidebar_hit(Point::new(10.0, 130.0), 14), None);
    }

    #[test]
    fn test_control_rects() {
        let layout = Layout::new(1000, 600);
        assert_eq!(layout.plus_button(), Rect::new(820.0, 20.0, 870.0, 50.0));
        assert_eq!(layout.minus_button(), Rect::new(820.0, 60.0, 870.0, 90.0));
        assert_eq!(layout.swatch_rect(2), Rect::new(820.0, 220.0, 870.0, 270.0));
        assert_eq!(layout.label_origin(), Point::new(820.0, 100.0));
        assert_eq!(layout.cell_rect(2, 1), Rect::new(40.0, 20.0, 60.0, 40.0));
    }
}
