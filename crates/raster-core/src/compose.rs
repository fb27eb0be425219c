//! Compositing operations over a [`DrawSurface`]
//!
//! Functions that produce a differently sized image allocate a new canvas and
//! leave the source untouched. [`overlay_text`] and [`layer`] draw onto the
//! image they are given: they take it by value and hand the same image back,
//! so callers that still need the original must clone it first.

use crate::geometry::{self, FitPolicy, Point, PointF, Rect, ScaleResult, Size};
use crate::surface::{DrawSurface, Raster};
use crate::text::{centered_rect, layout_centered_text, FontFit};
use crate::{Color, RasterError, Result};
use log::{debug, trace};

/// Text to draw centered in a bounding area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextOverlay<'a> {
    /// Single line of text
    pub text: &'a str,
    /// Center of the bounding area in canvas pixels
    pub center: PointF,
    /// Bounding area the text is fitted to
    pub area: Size,
    /// Fill color
    pub color: Color,
    /// Font size strategy
    pub fit: FontFit,
    /// Stroke the bounding area in yellow
    pub debug_bounds: bool,
}

impl<'a> TextOverlay<'a> {
    pub fn new(text: &'a str, center: PointF, area: Size) -> Self {
        Self {
            text,
            center,
            area,
            color: Color::default(),
            fit: FontFit::default(),
            debug_bounds: false,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_fit(mut self, fit: FontFit) -> Self {
        self.fit = fit;
        self
    }

    pub fn with_debug_bounds(mut self, debug_bounds: bool) -> Self {
        self.debug_bounds = debug_bounds;
        self
    }
}

/// Allocate `fit.canvas`, optionally fill it, and draw `image` at its
/// destination rectangle
fn render<S: DrawSurface>(
    surface: &S,
    image: &S::Image,
    fit: ScaleResult,
    background: Option<Color>,
) -> Result<S::Image> {
    debug!(
        "Drawing {} source as {} at ({}, {}) on {} canvas",
        image.size(),
        fit.dest,
        fit.offset.x,
        fit.offset.y,
        fit.canvas
    );

    let mut canvas = surface.new_canvas(fit.canvas)?;
    if let Some(color) = background {
        surface.fill(&mut canvas, color)?;
    }
    surface.draw_image(&mut canvas, image, fit.dest_rect())?;
    Ok(canvas)
}

/// Copy the `rect` region of `image` without scaling
///
/// # Errors
/// `InvalidDimension` for an empty rect and `OutOfBounds` when any part of
/// `rect` lies outside `image`. The rect is never clamped.
pub fn crop<S: DrawSurface>(surface: &S, image: &S::Image, rect: Rect) -> Result<S::Image> {
    if rect.size().is_empty() {
        return Err(RasterError::InvalidDimension {
            width: rect.width,
            height: rect.height,
        });
    }

    let bounds = image.size();
    if !rect.is_within(bounds) {
        return Err(RasterError::OutOfBounds {
            rect,
            width: bounds.width,
            height: bounds.height,
        });
    }

    trace!("Cropping {} from {} image", rect, bounds);
    surface.extract(image, rect)
}

/// Scale `image` to cover `target` and crop the centered overflow
pub fn crop_and_fill<S: DrawSurface>(
    surface: &S,
    image: &S::Image,
    target: Size,
) -> Result<S::Image> {
    let fit = geometry::crop_and_fill(image.size(), target)?;
    render(surface, image, fit, None)
}

/// Scale `image` towards `target` according to `policy`
///
/// With [`FitPolicy::FillSmallest`] the result is only as large as the scaled
/// image; use [`letterbox`] for a fixed canvas.
pub fn resize<S: DrawSurface>(
    surface: &S,
    image: &S::Image,
    target: Size,
    policy: FitPolicy,
) -> Result<S::Image> {
    let fit = geometry::resize(image.size(), target, policy)?;
    render(surface, image, fit, None)
}

/// Scale `image` to `height`, preserving aspect ratio
pub fn resize_by_height<S: DrawSurface>(
    surface: &S,
    image: &S::Image,
    height: u32,
) -> Result<S::Image> {
    let dest = geometry::resize_by_height(image.size(), height)?;
    let fit = ScaleResult {
        dest,
        offset: Point::default(),
        canvas: dest,
    };
    render(surface, image, fit, None)
}

/// Fit `image` inside `target` and center it on a `background` filled canvas
pub fn letterbox<S: DrawSurface>(
    surface: &S,
    image: &S::Image,
    target: Size,
    background: Color,
) -> Result<S::Image> {
    let fit = geometry::letterbox(image.size(), target)?;
    let fill = (background != Color::transparent()).then_some(background);
    render(surface, image, fit, fill)
}

/// Draw auto-fitted text centered in `overlay.area` directly onto `image`
///
/// Takes `image` by value and returns the same image with the text drawn.
pub fn overlay_text<S: DrawSurface>(
    surface: &S,
    mut image: S::Image,
    font: &S::Font,
    overlay: &TextOverlay<'_>,
) -> Result<S::Image> {
    let layout = layout_centered_text(
        surface,
        overlay.center,
        overlay.area,
        overlay.text,
        font,
        overlay.fit,
    )?;

    if overlay.debug_bounds {
        let bounds = centered_rect(overlay.center, overlay.area);
        surface.draw_rect(&mut image, bounds, Color::yellow())?;
    }

    surface.draw_text(
        &mut image,
        overlay.text,
        font,
        layout.font_size,
        layout.origin,
        overlay.color,
    )?;

    Ok(image)
}

/// Draw `foreground` at native size with its top-left at `(x, y)`
///
/// Takes `background` by value and returns it with the foreground drawn.
/// Parts of the foreground outside the background are clipped by the surface.
pub fn layer<S: DrawSurface>(
    surface: &S,
    mut background: S::Image,
    foreground: &S::Image,
    x: i32,
    y: i32,
) -> Result<S::Image> {
    let dest = Rect::at(Point::new(x, y), foreground.size());
    trace!("Layering {} image at {}", foreground.size(), dest);
    surface.draw_image(&mut background, foreground, dest)?;
    Ok(background)
}
