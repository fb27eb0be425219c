//! Fit geometry for crop, resize and letterbox operations
//!
//! Every function here is pure: it takes a source size and a target size and
//! returns where the scaled source lands on the output canvas. Scale factors
//! are computed in `f64` and destination extents are rounded to the nearest
//! pixel.

use crate::{RasterError, Result};
use std::fmt;

/// Integer extent in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width divided by height
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    fn validate(self) -> Result<Self> {
        if self.is_empty() {
            return Err(RasterError::InvalidDimension {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Fractional extent, as reported by text measurement
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeF {
    pub width: f32,
    pub height: f32,
}

impl SizeF {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when the extent fits inside `area` on both axes
    pub fn fits_within(&self, area: Size) -> bool {
        self.width <= area.width as f32 && self.height <= area.height as f32
    }
}

/// Integer position; may be negative when content overflows the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Fractional position
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Rectangle with a signed origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of `size` placed at `origin`
    pub const fn at(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// True when the rectangle lies entirely inside a `bounds` sized image
    /// anchored at the origin
    pub fn is_within(&self, bounds: Size) -> bool {
        let right = self.x as i64 + self.width as i64;
        let bottom = self.y as i64 + self.height as i64;
        self.x >= 0 && self.y >= 0 && right <= bounds.width as i64 && bottom <= bounds.height as i64
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}{:+}{:+}", self.width, self.height, self.x, self.y)
    }
}

/// Which axis ratio drives the scale factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FitPolicy {
    /// Scale by the smaller ratio: the whole source fits, nothing is cropped
    #[default]
    FillSmallest,
    /// Scale by the larger ratio: the target is covered, overflow is cropped
    FillLargest,
}

/// Placement of a scaled source on an output canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScaleResult {
    /// Size of the scaled source
    pub dest: Size,
    /// Top-left of the scaled source on the canvas
    pub offset: Point,
    /// Size of the canvas to allocate
    pub canvas: Size,
}

impl ScaleResult {
    /// Where the scaled source is drawn on the canvas
    pub const fn dest_rect(&self) -> Rect {
        Rect::at(self.offset, self.dest)
    }

    /// True when the scaled source extends past the canvas on some side
    pub fn overflows(&self) -> bool {
        !self.dest_rect().is_within(self.canvas)
    }
}

/// Per-axis ratios `(target / source)`
fn ratios(source: Size, target: Size) -> (f64, f64) {
    (
        target.width as f64 / source.width as f64,
        target.height as f64 / source.height as f64,
    )
}

/// Scale `source` uniformly; each side is rounded and never drops below one
/// pixel
fn scale_size(source: Size, scale: f64) -> Size {
    let scale_side = |side: u32| (side as f64 * scale).round().max(1.0) as u32;
    Size::new(scale_side(source.width), scale_side(source.height))
}

/// Centering offset applied only when the content overflows the canvas
fn overflow_offset(canvas: u32, dest: u32) -> i32 {
    let slack = canvas as i64 - dest as i64;
    if slack < 0 {
        // Integer division truncates toward zero
        (slack / 2) as i32
    } else {
        0
    }
}

/// Centering offset for content that fits inside the canvas
fn inset_offset(canvas: u32, dest: u32) -> i32 {
    let slack = canvas as i64 - dest as i64;
    (slack.max(0) / 2) as i32
}

/// Scale `source` so it covers `target`, centering the overflow
///
/// The scale factor is the larger of the two axis ratios, so the output always
/// crops and never letterboxes. The canvas is exactly `target`; the offset is
/// negative on the overflowing axis and zero otherwise.
///
/// # Errors
/// [`RasterError::InvalidDimension`] if either size has a zero side.
///
/// # Example
/// ```
/// use raster_core::{crop_and_fill, Point, Size};
///
/// let fit = crop_and_fill(Size::new(800, 600), Size::new(400, 400)).unwrap();
/// assert_eq!(fit.canvas, Size::new(400, 400));
/// assert_eq!(fit.offset, Point::new(-66, 0));
/// ```
pub fn crop_and_fill(source: Size, target: Size) -> Result<ScaleResult> {
    let source = source.validate()?;
    let target = target.validate()?;

    let (ratio_w, ratio_h) = ratios(source, target);
    let dest = scale_size(source, ratio_w.max(ratio_h));

    Ok(ScaleResult {
        dest,
        offset: Point::new(
            overflow_offset(target.width, dest.width),
            overflow_offset(target.height, dest.height),
        ),
        canvas: target,
    })
}

/// Scale `source` towards `target` according to `policy`
///
/// - [`FitPolicy::FillSmallest`]: the source fits entirely inside `target` and
///   the canvas shrinks to the scaled size. Padding to a fixed canvas is the
///   caller's job, see [`letterbox`].
/// - [`FitPolicy::FillLargest`]: the source covers `target`; the canvas is
///   `target` and overflow is centered as in [`crop_and_fill`].
pub fn resize(source: Size, target: Size, policy: FitPolicy) -> Result<ScaleResult> {
    let source = source.validate()?;
    let target = target.validate()?;

    match policy {
        FitPolicy::FillSmallest => {
            let (ratio_w, ratio_h) = ratios(source, target);
            let dest = scale_size(source, ratio_w.min(ratio_h));
            Ok(ScaleResult {
                dest,
                offset: Point::default(),
                canvas: dest,
            })
        }
        FitPolicy::FillLargest => crop_and_fill(source, target),
    }
}

/// Fit `source` inside `target` and center it on a `target` sized canvas
///
/// The scaled size matches [`FitPolicy::FillSmallest`]; the remaining space is
/// split evenly on both sides of the short axis.
pub fn letterbox(source: Size, target: Size) -> Result<ScaleResult> {
    let fit = resize(source, target, FitPolicy::FillSmallest)?;

    Ok(ScaleResult {
        dest: fit.dest,
        offset: Point::new(
            inset_offset(target.width, fit.dest.width),
            inset_offset(target.height, fit.dest.height),
        ),
        canvas: target,
    })
}

/// Scale `source` to `target_height`, preserving aspect ratio
pub fn resize_by_height(source: Size, target_height: u32) -> Result<Size> {
    let source = source.validate()?;
    if target_height == 0 {
        return Err(RasterError::InvalidDimension {
            width: source.width,
            height: target_height,
        });
    }

    let scale = target_height as f64 / source.height as f64;
    let width = (source.width as f64 * scale).round().max(1.0) as u32;

    Ok(Size::new(width, target_height))
}
