//! Core types for image decoding.

use image::DynamicImage;
use thiserror::Error;

/// Error types for image decoding operations.
///
/// The `Display` form is the diagnostic shown to the user, so each message
/// carries the underlying reason verbatim.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The byte content does not match any supported image format.
    #[error("Invalid or unsupported image format")]
    UnknownFormat,

    /// The format was recognized but the data is corrupted or incomplete.
    #[error("Corrupted or incomplete image data: {0}")]
    Corrupted(String),

    /// I/O error while reading the source.
    #[error("I/O error while reading image source: {0}")]
    Io(String),
}

/// A decoded image with interleaved 8-bit samples.
///
/// Rows are stored top-to-bottom in decode order and are never reordered or
/// mutated after decoding.
#[derive(Debug, Clone)]
pub struct Raster {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Samples per pixel: 1 = gray, 2 = gray+alpha, 3 = RGB, 4 = RGBA.
    pub channels: u8,
    /// Pixel data in row-major order, `channels` bytes per pixel.
    /// Length is width * height * channels.
    pub pixels: Vec<u8>,
}

impl Raster {
    /// Create a new Raster with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, channels: u8, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * channels as usize,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            channels,
            pixels,
        }
    }

    /// Convert a decoded `DynamicImage`, preserving the source channel count.
    ///
    /// Sample formats wider than 8 bits are narrowed to 8 bits per sample.
    pub fn from_dynamic_image(img: DynamicImage) -> Self {
        match img.color().channel_count() {
            1 => {
                let buf = img.into_luma8();
                let (width, height) = buf.dimensions();
                Self::new(width, height, 1, buf.into_raw())
            }
            2 => {
                let buf = img.into_luma_alpha8();
                let (width, height) = buf.dimensions();
                Self::new(width, height, 2, buf.into_raw())
            }
            3 => {
                let buf = img.into_rgb8();
                let (width, height) = buf.dimensions();
                Self::new(width, height, 3, buf.into_raw())
            }
            _ => {
                let buf = img.into_rgba8();
                let (width, height) = buf.dimensions();
                Self::new(width, height, 4, buf.into_raw())
            }
        }
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid raster.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
