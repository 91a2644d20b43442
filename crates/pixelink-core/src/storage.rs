//! PNG persistence for the canvas.

use crate::color::PixelColor;
use image::RgbaImage;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use thiserror::Error;

/// Default file written by save and read by load.
pub const DEFAULT_IMAGE_PATH: &str = "pixel_art.png";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Image not found: {0}")]
    NotFound(String),
    #[error("Encode error: {0}")]
    Encode(String),
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Read access to pixel colors of a decoded image.
pub trait PixelSampler {
    /// Color of the pixel at `(x, y)`, or `None` outside the image.
    fn sample(&self, x: u32, y: u32) -> Option<PixelColor>;
}

impl PixelSampler for RgbaImage {
    fn sample(&self, x: u32, y: u32) -> Option<PixelColor> {
        self.get_pixel_checked(x, y)
            .map(|p| PixelColor::new(p[0], p[1], p[2], p[3]))
    }
}

/// Encode RGBA8 pixels as PNG and write them to `path`, replacing any
/// existing file.
pub fn save_png(path: &Path, rgba_data: &[u8], width: u32, height: u32) -> StorageResult<()> {
    let expected = width as usize * height as usize * 4;
    if rgba_data.len() != expected {
        return Err(StorageError::Encode(format!(
            "expected {} bytes for {}x{}, got {}",
            expected,
            width,
            height,
            rgba_data.len()
        )));
    }

    let file = File::create(path)
        .map_err(|e| StorageError::Io(format!("Failed to create {}: {}", path.display(), e)))?;

    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| StorageError::Encode(format!("Failed to write PNG header: {}", e)))?;
    writer
        .write_image_data(rgba_data)
        .map_err(|e| StorageError::Encode(format!("Failed to write PNG data: {}", e)))?;
    writer
        .finish()
        .map_err(|e| StorageError::Encode(format!("Failed to finish PNG: {}", e)))
}

/// Decode the image at `path` into RGBA8 pixels.
pub fn load_png(path: &Path) -> StorageResult<RgbaImage> {
    if !path.exists() {
        return Err(StorageError::NotFound(path.display().to_string()));
    }
    let image = image::open(path)
        .map_err(|e| StorageError::Decode(format!("Failed to decode {}: {}", path.display(), e)))?;
    Ok(image.to_rgba8())
}
