//! PixelInk Application
//!
//! The desktop shell: windowing, input dispatch, and the save/load hooks
//! around the core canvas.

mod app;

pub use app::{App, AppConfig, AppError};
