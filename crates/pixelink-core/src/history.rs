//! Snapshot-based undo/redo history.

use crate::grid::Grid;

/// Default maximum number of snapshots kept on each stack.
pub const MAX_UNDO_HISTORY: usize = 50;

/// Undo/redo stacks of full grid snapshots.
///
/// Snapshots carry their own dimensions. A snapshot is only restored onto a
/// grid of the same dimensions; after a window resize the older entries stay
/// on the stack until the grid is back to a matching size.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: Vec<Grid>,
    redo_stack: Vec<Grid>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_limit(MAX_UNDO_HISTORY)
    }

    /// Create a history keeping at most `limit` snapshots per stack.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Record `grid` as an undo point and drop any redo history.
    pub fn push_undo(&mut self, grid: &Grid) {
        Self::push_bounded(&mut self.undo_stack, grid.clone(), self.limit);
        self.redo_stack.clear();
    }

    fn push_bounded(stack: &mut Vec<Grid>, grid: Grid, limit: usize) {
        stack.push(grid);
        if stack.len() > limit {
            stack.remove(0);
        }
    }

    /// Restore the most recent undo point into `current`.
    /// Returns true if undo was performed.
    pub fn undo(&mut self, current: &mut Grid) -> bool {
        let Some(snapshot) = Self::take_matching(&mut self.undo_stack, current, "undo") else {
            return false;
        };
        let previous = std::mem::replace(current, snapshot);
        Self::push_bounded(&mut self.redo_stack, previous, self.limit);
        true
    }

    /// Re-apply the most recently undone state into `current`.
    /// Returns true if redo was performed.
    pub fn redo(&mut self, current: &mut Grid) -> bool {
        let Some(snapshot) = Self::take_matching(&mut self.redo_stack, current, "redo") else {
            return false;
        };
        let previous = std::mem::replace(current, snapshot);
        Self::push_bounded(&mut self.undo_stack, previous, self.limit);
        true
    }

    fn take_matching(stack: &mut Vec<Grid>, current: &Grid, action: &str) -> Option<Grid> {
        let top = stack.last()?;
        if top.dimensions() != current.dimensions() {
            log::warn!(
                "Refusing {}: snapshot is {:?} but canvas is {:?}",
                action,
                top.dimensions(),
                current.dimensions()
            );
            return None;
        }
        stack.pop()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}
