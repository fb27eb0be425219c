//! Raster Core - image fitting and compositing engine
//!
//! This crate provides:
//! - Aspect-ratio preserving crop, crop-and-fill, resize and letterbox geometry
//! - Auto-fit font sizing and centered text layout
//! - Capability traits for a pluggable raster backend
//! - Compositing operations generic over that backend
//!
//! The geometry and font-fit engines are pure; anything that touches pixels
//! goes through [`DrawSurface`].
//!
//! # Example
//!
//! ```
//! use raster_core::{crop_and_fill, Point, Size};
//!
//! let fit = crop_and_fill(Size::new(800, 600), Size::new(400, 400)).unwrap();
//! assert_eq!(fit.dest, Size::new(533, 400));
//! assert_eq!(fit.offset, Point::new(-66, 0));
//! ```

pub mod compose;
mod geometry;
mod surface;
mod text;

pub use compose::TextOverlay;
pub use geometry::{
    crop_and_fill, letterbox, resize, resize_by_height, FitPolicy, Point, PointF, Rect,
    ScaleResult, Size, SizeF,
};
pub use surface::{DrawSurface, Raster, TextMeasure};
pub use text::{
    fit_font_size, grow_bounding_area, layout_centered_text, refine_font_size, FontFit,
    TextLayout, HEIGHT_COMPRESSION, PROBE_SIZE,
};

use thiserror::Error;

/// Errors that can occur during raster operations
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Invalid dimension: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    #[error("Region {rect} is out of bounds for a {width}x{height} image")]
    OutOfBounds { rect: Rect, width: u32, height: u32 },

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Corrupt image data: {0}")]
    CorruptData(String),

    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    #[error("Text measurement failed: {0}")]
    MeasurementFailure(String),

    #[error("Failed to parse font: {0}")]
    FontError(String),

    #[error("Network error: {0}")]
    NetworkFailure(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for raster operations
pub type Result<T> = std::result::Result<T, RasterError>;

/// RGBA color (8 bits per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color with explicit alpha
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Stroke color for debug bounding boxes
    pub const fn yellow() -> Self {
        Self::rgb(255, 255, 0)
    }

    /// Fully transparent black, the initial content of a new canvas
    pub const fn transparent() -> Self {
        Self::rgba(0, 0, 0, 0)
    }

    /// Channels in RGBA order
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}
