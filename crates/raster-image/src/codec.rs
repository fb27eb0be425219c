//! Encoding and decoding of image byte buffers

use crate::surface::RasterImage;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{DynamicImage, ImageError, ImageFormat, ImageReader};
use raster_core::{RasterError, Result};
use std::io::Cursor;

/// Encoded output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    /// Alpha is discarded
    Jpeg,
    Bmp,
}

impl OutputFormat {
    /// Parse a format name or file extension
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "bmp" => Some(Self::Bmp),
            _ => None,
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Bmp => "image/bmp",
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Bmp => ImageFormat::Bmp,
        }
    }
}

/// Decoding reads from memory, so I/O errors mean truncated input
fn decode_error(err: ImageError) -> RasterError {
    match err {
        ImageError::Unsupported(e) => RasterError::UnsupportedFormat(e.to_string()),
        other => RasterError::CorruptData(other.to_string()),
    }
}

fn encode_error(err: ImageError) -> RasterError {
    match err {
        ImageError::IoError(e) => RasterError::IoError(e),
        other => RasterError::EncodeError(other.to_string()),
    }
}

/// Decode an image from bytes, guessing the format from its content
///
/// # Errors
/// `UnsupportedFormat` when the content is not a recognized image format,
/// `CorruptData` when it is but fails to decode.
pub fn decode(data: &[u8]) -> Result<RasterImage> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(RasterError::IoError)?;

    if reader.format().is_none() {
        return Err(RasterError::UnsupportedFormat(
            "unrecognized image data".to_string(),
        ));
    }

    let image = reader.decode().map_err(decode_error)?;
    Ok(RasterImage::from_rgba(image.into_rgba8()))
}

/// Encode an image to bytes
pub fn encode(image: &RasterImage, format: OutputFormat) -> Result<Vec<u8>> {
    let dynamic = DynamicImage::ImageRgba8(image.as_rgba().clone());
    let dynamic = match format {
        OutputFormat::Jpeg => DynamicImage::ImageRgb8(dynamic.into_rgb8()),
        OutputFormat::Png | OutputFormat::Bmp => dynamic,
    };

    let mut bytes = Vec::new();
    dynamic
        .write_to(&mut Cursor::new(&mut bytes), format.image_format())
        .map_err(encode_error)?;
    Ok(bytes)
}

/// Decode an image from a base64 string
///
/// Accepts bare base64 or a `data:<mime>;base64,` URL. Whitespace is ignored.
pub fn decode_base64(data: &str) -> Result<RasterImage> {
    let payload = match data.find(";base64,") {
        Some(pos) if data.starts_with("data:") => &data[pos + ";base64,".len()..],
        _ => data,
    };
    let payload: String = payload.chars().filter(|c| !c.is_whitespace()).collect();

    let bytes = STANDARD
        .decode(payload.as_bytes())
        .map_err(|e| RasterError::CorruptData(format!("invalid base64: {e}")))?;
    decode(&bytes)
}

/// Encode an image and return it as base64
pub fn encode_base64(image: &RasterImage, format: OutputFormat) -> Result<String> {
    Ok(STANDARD.encode(encode(image, format)?))
}

/// Encode an image as a `data:` URL
pub fn to_data_url(image: &RasterImage, format: OutputFormat) -> Result<String> {
    Ok(format!(
        "data:{};base64,{}",
        format.mime(),
        encode_base64(image, format)?
    ))
}
