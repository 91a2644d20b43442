//! Square brush footprint.

/// Brush size, always within `[BrushSize::MIN, BrushSize::MAX]`.
///
/// A brush of size `n` covers the `(2n-1) × (2n-1)` square of cells
/// centered on the cursor cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BrushSize(u8);

impl Default for BrushSize {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl BrushSize {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Create a brush size, clamped into range.
    pub fn new(size: i32) -> Self {
        Self(size.clamp(Self::MIN as i32, Self::MAX as i32) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Add `delta` and clamp into range.
    pub fn adjusted(self, delta: i32) -> Self {
        Self::new(self.0 as i32 + delta)
    }

    /// Distance from the center cell to the edge of the footprint.
    pub fn radius(self) -> i64 {
        self.0 as i64 - 1
    }

    /// Cell offsets `(dx, dy)` covered by the brush, relative to its center.
    pub fn offsets(self) -> impl Iterator<Item = (i64, i64)> {
        let r = self.radius();
        (-r..=r).flat_map(move |dx| (-r..=r).map(move |dy| (dx, dy)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_single_cell() {
        let brush = BrushSize::default();
        assert_eq!(brush.get(), 1);
        assert_eq!(brush.offsets().collect::<Vec<_>>(), vec![(0, 0)]);
    }

    #[test]
    fn test_clamping() {
        let mut brush = BrushSize::default();
        for _ in 0..10 {
            brush = brush.adjusted(-1);
        }
        assert_eq!(brush.get(), BrushSize::MIN);

        let mut brush = BrushSize::new(5);
        for _ in 0..10 {
            brush = brush.adjusted(1);
        }
        assert_eq!(brush.get(), BrushSize::MAX);

        assert_eq!(BrushSize::new(-3).get(), 1);
        assert_eq!(BrushSize::new(99).get(), 5);
    }

    #[test]
    fn test_footprint_size() {
        for size in 1..=5 {
            let brush = BrushSize::new(size);
            let side = (2 * size - 1) as usize;
            assert_eq!(brush.offsets().count(), side * side);
        }
    }
}
