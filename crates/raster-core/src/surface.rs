//! Capability traits implemented by a raster backend

use crate::geometry::{PointF, Rect, Size, SizeF};
use crate::{Color, Result};

/// Pixel buffer with known dimensions
pub trait Raster {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}

/// Text measurement
///
/// Implementations report the extent of `text` laid out on a single line at
/// `size` pixels. The font-fit engine assumes the result scales roughly
/// linearly with `size`.
pub trait TextMeasure {
    type Font;

    fn measure(&self, text: &str, font: &Self::Font, size: f32) -> Result<SizeF>;
}

/// Drawing primitives the compositor is built on
///
/// Drawing calls borrow the canvas mutably for their duration; nothing is held
/// across calls.
pub trait DrawSurface: TextMeasure {
    type Image: Raster;

    /// Allocate a transparent canvas
    fn new_canvas(&self, size: Size) -> Result<Self::Image>;

    /// Copy the `rect` region of `image` into a new image
    ///
    /// Fails with `OutOfBounds` when `rect` leaves the image.
    fn extract(&self, image: &Self::Image, rect: Rect) -> Result<Self::Image>;

    /// Draw `source` scaled to `dest.size()` with its top-left at
    /// `dest.origin()`
    ///
    /// The origin may be negative and the scaled source may extend past the
    /// canvas; the surface clips. Scaling uses bicubic-equivalent filtering.
    fn draw_image(&self, canvas: &mut Self::Image, source: &Self::Image, dest: Rect)
        -> Result<()>;

    /// Draw a single line of `text` whose layout box has its top-left at
    /// `origin`
    fn draw_text(
        &self,
        canvas: &mut Self::Image,
        text: &str,
        font: &Self::Font,
        size: f32,
        origin: PointF,
        color: Color,
    ) -> Result<()>;

    /// Stroke a one pixel outline of `rect`
    fn draw_rect(&self, canvas: &mut Self::Image, rect: Rect, stroke: Color) -> Result<()>;

    /// Fill the whole canvas with `color`
    fn fill(&self, canvas: &mut Self::Image, color: Color) -> Result<()>;
}
