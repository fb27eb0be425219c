//! RGBA8 draw surface backed by the `image` crate

use crate::font::FontData;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use log::trace;
use raster_core::{
    Color, DrawSurface, PointF, Raster, RasterError, Rect, Result, Size, SizeF, TextMeasure,
};
use std::borrow::Cow;

/// Owned RGBA8 image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pixels: RgbaImage,
}

impl RasterImage {
    /// Transparent image of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn as_rgba_mut(&mut self) -> &mut RgbaImage {
        &mut self.pixels
    }

    pub fn into_rgba(self) -> RgbaImage {
        self.pixels
    }

    /// Pixel at `(x, y)` as a color; `None` outside the image
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.pixels.get_pixel_checked(x, y).map(|p| {
            let [r, g, b, a] = p.0;
            Color::rgba(r, g, b, a)
        })
    }
}

impl From<RgbaImage> for RasterImage {
    fn from(pixels: RgbaImage) -> Self {
        Self::from_rgba(pixels)
    }
}

impl Raster for RasterImage {
    fn width(&self) -> u32 {
        self.pixels.width()
    }

    fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// Source-over blend of `color` at `coverage` (0.0 - 1.0) onto `dst`
fn blend(dst: &mut Rgba<u8>, color: Color, coverage: f32) {
    let src_a = (color.a as f32 / 255.0) * coverage.clamp(0.0, 1.0);
    if src_a <= 0.0 {
        return;
    }

    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    let channel = |src: u8, dst: u8| -> u8 {
        let value =
            (src as f32 * src_a + dst as f32 * dst_a * (1.0 - src_a)) / out_a.max(f32::EPSILON);
        value.round().clamp(0.0, 255.0) as u8
    };

    *dst = Rgba([
        channel(color.r, dst[0]),
        channel(color.g, dst[1]),
        channel(color.b, dst[2]),
        (out_a * 255.0).round() as u8,
    ]);
}

/// Blend one pixel, ignoring coordinates outside the canvas
fn blend_at(canvas: &mut RgbaImage, x: i64, y: i64, color: Color, coverage: f32) {
    if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return;
    }
    blend(canvas.get_pixel_mut(x as u32, y as u32), color, coverage);
}

/// [`DrawSurface`] over [`RasterImage`]
///
/// Scaling uses Catmull-Rom (bicubic) filtering unless configured otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSurface {
    filter: FilterType,
}

impl ImageSurface {
    pub fn new() -> Self {
        Self {
            filter: FilterType::CatmullRom,
        }
    }

    /// Use `filter` for all scaled draws
    pub fn with_filter(filter: FilterType) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> FilterType {
        self.filter
    }
}

impl Default for ImageSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasure for ImageSurface {
    type Font = FontData;

    fn measure(&self, text: &str, font: &FontData, size: f32) -> Result<SizeF> {
        if !(size.is_finite() && size > 0.0) {
            return Err(RasterError::MeasurementFailure(format!(
                "invalid font size {size} for '{}'",
                font.name
            )));
        }
        Ok(font.measure(text, size))
    }
}

impl DrawSurface for ImageSurface {
    type Image = RasterImage;

    fn new_canvas(&self, size: Size) -> Result<RasterImage> {
        if size.is_empty() {
            return Err(RasterError::InvalidDimension {
                width: size.width,
                height: size.height,
            });
        }
        Ok(RasterImage::new(size.width, size.height))
    }

    fn extract(&self, image: &RasterImage, rect: Rect) -> Result<RasterImage> {
        let bounds = image.size();
        if !rect.is_within(bounds) {
            return Err(RasterError::OutOfBounds {
                rect,
                width: bounds.width,
                height: bounds.height,
            });
        }

        let region = imageops::crop_imm(
            image.as_rgba(),
            rect.x as u32,
            rect.y as u32,
            rect.width,
            rect.height,
        );
        Ok(RasterImage::from_rgba(region.to_image()))
    }

    fn draw_image(&self, canvas: &mut RasterImage, source: &RasterImage, dest: Rect) -> Result<()> {
        if dest.size().is_empty() {
            return Ok(());
        }

        let scaled = if dest.size() == source.size() {
            Cow::Borrowed(source.as_rgba())
        } else {
            trace!(
                "Resampling {} to {} with {:?}",
                source.size(),
                dest.size(),
                self.filter
            );
            Cow::Owned(imageops::resize(
                source.as_rgba(),
                dest.width,
                dest.height,
                self.filter,
            ))
        };

        imageops::overlay(canvas.as_rgba_mut(), scaled.as_ref(), dest.x as i64, dest.y as i64);
        Ok(())
    }

    fn draw_text(
        &self,
        canvas: &mut RasterImage,
        text: &str,
        font: &FontData,
        size: f32,
        origin: PointF,
        color: Color,
    ) -> Result<()> {
        if !(size.is_finite() && size > 0.0) {
            return Err(RasterError::MeasurementFailure(format!(
                "invalid font size {size} for '{}'",
                font.name
            )));
        }

        let pixels = canvas.as_rgba_mut();
        for glyph in font.layout(text, size, origin) {
            let Some(outlined) = font.outline(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            let (left, top) = (bounds.min.x as i64, bounds.min.y as i64);
            outlined.draw(|x, y, coverage| {
                blend_at(pixels, left + x as i64, top + y as i64, color, coverage);
            });
        }

        Ok(())
    }

    fn draw_rect(&self, canvas: &mut RasterImage, rect: Rect, stroke: Color) -> Result<()> {
        if rect.size().is_empty() {
            return Ok(());
        }

        let pixels = canvas.as_rgba_mut();
        let (left, top) = (rect.x as i64, rect.y as i64);
        let right = left + rect.width as i64 - 1;
        let bottom = top + rect.height as i64 - 1;

        for x in left..=right {
            blend_at(pixels, x, top, stroke, 1.0);
            if bottom != top {
                blend_at(pixels, x, bottom, stroke, 1.0);
            }
        }
        for y in (top + 1)..bottom {
            blend_at(pixels, left, y, stroke, 1.0);
            if right != left {
                blend_at(pixels, right, y, stroke, 1.0);
            }
        }

        Ok(())
    }

    fn fill(&self, canvas: &mut RasterImage, color: Color) -> Result<()> {
        let value = Rgba(color.to_array());
        for pixel in canvas.as_rgba_mut().pixels_mut() {
            *pixel = value;
        }
        Ok(())
    }
}
