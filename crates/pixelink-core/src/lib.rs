//! PixelInk Core Library
//!
//! Platform-agnostic canvas model, input routing and persistence for the
//! PixelInk pixel-art editor.

pub mod brush;
pub mod canvas;
pub mod color;
pub mod grid;
pub mod history;
pub mod input;
pub mod layout;
pub mod router;
pub mod shortcuts;
pub mod storage;

pub use brush::BrushSize;
pub use canvas::Canvas;
pub use color::{PALETTE, PixelColor, palette_color};
pub use grid::Grid;
pub use history::{History, MAX_UNDO_HISTORY};
pub use input::{InputState, KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use layout::{CELL_SIZE, Layout, Region, SIDEBAR_WIDTH, SidebarHit};
pub use router::{InputRouter, RouteOutcome};
pub use shortcuts::{Shortcut, ShortcutAction, ShortcutRegistry};
pub use storage::{DEFAULT_IMAGE_PATH, PixelSampler, StorageError, StorageResult};
