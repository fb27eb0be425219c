//! Raster Image - `image` and `ab_glyph` backend for raster-core
//!
//! This crate provides:
//! - [`RasterImage`], an owned RGBA8 pixel buffer
//! - [`ImageSurface`], a [`raster_core::DrawSurface`] with bicubic resampling
//! - [`FontData`], TrueType/OpenType measurement and glyph rasterization
//! - Codec helpers: decode/encode byte buffers and base64 strings
//! - URL loading (with the `fetch` feature)
//!
//! # Example
//!
//! ```ignore
//! use raster_core::{compose, Size};
//! use raster_image::{decode, encode, ImageSurface, OutputFormat};
//!
//! let surface = ImageSurface::new();
//! let image = decode(&std::fs::read("photo.jpg")?)?;
//! let thumb = compose::crop_and_fill(&surface, &image, Size::new(400, 400))?;
//! std::fs::write("thumb.png", encode(&thumb, OutputFormat::Png)?)?;
//! ```

mod codec;
#[cfg(feature = "fetch")]
mod fetch;
mod font;
mod surface;

pub use codec::{decode, decode_base64, encode, encode_base64, to_data_url, OutputFormat};
#[cfg(feature = "fetch")]
pub use fetch::{fetch, load_url, FetchOptions};
pub use font::FontData;
pub use surface::{ImageSurface, RasterImage};

/// Re-export of the underlying `image` crate
pub use image;
