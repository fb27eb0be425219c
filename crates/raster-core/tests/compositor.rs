//! Integration tests for the compositor
//!
//! A recording surface stands in for a real raster backend so the tests can
//! assert on the exact draw calls each operation makes.

use pretty_assertions::assert_eq;
use raster_core::compose::{self, TextOverlay};
use raster_core::{
    Color, DrawSurface, FitPolicy, FontFit, PointF, Raster, RasterError, Rect, Result, Size,
    SizeF, TextMeasure,
};

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Fill(Color),
    Image { source: Size, dest: Rect },
    Text { text: String, origin: PointF, color: Color },
    Outline { rect: Rect, stroke: Color },
}

#[derive(Debug, Clone, PartialEq)]
struct FakeImage {
    size: Size,
    /// Region of the parent this image was extracted from, if any
    region: Option<Rect>,
    ops: Vec<Op>,
}

impl FakeImage {
    fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            region: None,
            ops: Vec::new(),
        }
    }
}

impl Raster for FakeImage {
    fn width(&self) -> u32 {
        self.size.width
    }

    fn height(&self) -> u32 {
        self.size.height
    }
}

/// Monospace metrics: 0.5 advance per char, 1.0 line height
struct RecordingSurface;

impl TextMeasure for RecordingSurface {
    type Font = ();

    fn measure(&self, text: &str, _font: &(), size: f32) -> Result<SizeF> {
        Ok(SizeF::new(text.chars().count() as f32 * 0.5 * size, size))
    }
}

impl DrawSurface for RecordingSurface {
    type Image = FakeImage;

    fn new_canvas(&self, size: Size) -> Result<FakeImage> {
        Ok(FakeImage::new(size.width, size.height))
    }

    fn extract(&self, image: &FakeImage, rect: Rect) -> Result<FakeImage> {
        if !rect.is_within(image.size) {
            return Err(RasterError::OutOfBounds {
                rect,
                width: image.size.width,
                height: image.size.height,
            });
        }
        Ok(FakeImage {
            size: rect.size(),
            region: Some(rect),
            ops: Vec::new(),
        })
    }

    fn draw_image(&self, canvas: &mut FakeImage, source: &FakeImage, dest: Rect) -> Result<()> {
        canvas.ops.push(Op::Image {
            source: source.size,
            dest,
        });
        Ok(())
    }

    fn draw_text(
        &self,
        canvas: &mut FakeImage,
        text: &str,
        _font: &(),
        _size: f32,
        origin: PointF,
        color: Color,
    ) -> Result<()> {
        canvas.ops.push(Op::Text {
            text: text.to_string(),
            origin,
            color,
        });
        Ok(())
    }

    fn draw_rect(&self, canvas: &mut FakeImage, rect: Rect, stroke: Color) -> Result<()> {
        canvas.ops.push(Op::Outline { rect, stroke });
        Ok(())
    }

    fn fill(&self, canvas: &mut FakeImage, color: Color) -> Result<()> {
        canvas.ops.push(Op::Fill(color));
        Ok(())
    }
}

#[test]
fn test_crop_extracts_region() {
    let image = FakeImage::new(100, 80);
    let cropped = compose::crop(&RecordingSurface, &image, Rect::new(10, 20, 30, 40)).unwrap();

    assert_eq!(cropped.size, Size::new(30, 40));
    assert_eq!(cropped.region, Some(Rect::new(10, 20, 30, 40)));
}

#[test]
fn test_crop_out_of_bounds_is_rejected() {
    let image = FakeImage::new(100, 80);
    for rect in [
        Rect::new(90, 0, 20, 10),
        Rect::new(0, 75, 10, 10),
        Rect::new(-5, 0, 10, 10),
        Rect::new(0, 0, 101, 80),
    ] {
        let result = compose::crop(&RecordingSurface, &image, rect);
        assert!(
            matches!(result, Err(RasterError::OutOfBounds { .. })),
            "{rect} was not rejected"
        );
    }
}

#[test]
fn test_crop_empty_rect_is_invalid() {
    let image = FakeImage::new(100, 80);
    let result = compose::crop(&RecordingSurface, &image, Rect::new(0, 0, 0, 10));
    assert!(matches!(result, Err(RasterError::InvalidDimension { .. })));
}

#[test]
fn test_crop_and_fill_draws_centered_overflow() {
    let image = FakeImage::new(800, 600);
    let canvas = compose::crop_and_fill(&RecordingSurface, &image, Size::new(400, 400)).unwrap();

    assert_eq!(canvas.size, Size::new(400, 400));
    assert_eq!(
        canvas.ops,
        vec![Op::Image {
            source: Size::new(800, 600),
            dest: Rect::new(-66, 0, 533, 400),
        }]
    );
}

#[test]
fn test_resize_fill_smallest_shrinks_canvas() {
    let image = FakeImage::new(400, 300);
    let canvas = compose::resize(
        &RecordingSurface,
        &image,
        Size::new(800, 800),
        FitPolicy::FillSmallest,
    )
    .unwrap();

    assert_eq!(canvas.size, Size::new(800, 600));
    assert_eq!(
        canvas.ops,
        vec![Op::Image {
            source: Size::new(400, 300),
            dest: Rect::new(0, 0, 800, 600),
        }]
    );
}

#[test]
fn test_resize_fill_largest_uses_target_canvas() {
    let image = FakeImage::new(400, 300);
    let canvas = compose::resize(
        &RecordingSurface,
        &image,
        Size::new(800, 800),
        FitPolicy::FillLargest,
    )
    .unwrap();

    assert_eq!(canvas.size, Size::new(800, 800));
    // Scale 800/300: 1067x800, centered horizontally
    assert_eq!(
        canvas.ops,
        vec![Op::Image {
            source: Size::new(400, 300),
            dest: Rect::new(-133, 0, 1067, 800),
        }]
    );
}

#[test]
fn test_resize_by_height() {
    let image = FakeImage::new(800, 600);
    let canvas = compose::resize_by_height(&RecordingSurface, &image, 300).unwrap();

    assert_eq!(canvas.size, Size::new(400, 300));
    assert_eq!(
        canvas.ops,
        vec![Op::Image {
            source: Size::new(800, 600),
            dest: Rect::new(0, 0, 400, 300),
        }]
    );
}

#[test]
fn test_letterbox_fills_background_first() {
    let image = FakeImage::new(400, 300);
    let canvas =
        compose::letterbox(&RecordingSurface, &image, Size::new(800, 800), Color::white()).unwrap();

    assert_eq!(canvas.size, Size::new(800, 800));
    assert_eq!(
        canvas.ops,
        vec![
            Op::Fill(Color::white()),
            Op::Image {
                source: Size::new(400, 300),
                dest: Rect::new(0, 100, 800, 600),
            },
        ]
    );
}

#[test]
fn test_letterbox_transparent_skips_fill() {
    let image = FakeImage::new(300, 400);
    let canvas = compose::letterbox(
        &RecordingSurface,
        &image,
        Size::new(800, 800),
        Color::transparent(),
    )
    .unwrap();

    assert_eq!(
        canvas.ops,
        vec![Op::Image {
            source: Size::new(300, 400),
            dest: Rect::new(100, 0, 600, 800),
        }]
    );
}

#[test]
fn test_zero_sized_source_is_invalid() {
    let image = FakeImage::new(0, 600);
    let result = compose::crop_and_fill(&RecordingSurface, &image, Size::new(400, 400));
    assert!(matches!(result, Err(RasterError::InvalidDimension { .. })));
}

#[test]
fn test_overlay_text_draws_on_same_image() {
    let image = FakeImage::new(400, 200);
    let overlay = TextOverlay::new("Hi", PointF::new(200.0, 100.0), Size::new(100, 50))
        .with_color(Color::white());

    let result = compose::overlay_text(&RecordingSurface, image, &(), &overlay).unwrap();

    // Probe at 10: 10x10. Ratios h 5, w 10 -> size 50 -> 50x50.
    // Origin: (200 - 25, 100 - 37.5 / 2)
    assert_eq!(result.size, Size::new(400, 200));
    assert_eq!(
        result.ops,
        vec![Op::Text {
            text: "Hi".to_string(),
            origin: PointF::new(175.0, 81.25),
            color: Color::white(),
        }]
    );
}

#[test]
fn test_overlay_text_debug_bounds() {
    let image = FakeImage::new(400, 200);
    let overlay = TextOverlay::new("Hi", PointF::new(200.0, 100.0), Size::new(100, 50))
        .with_fit(FontFit::Refine)
        .with_debug_bounds(true);

    let result = compose::overlay_text(&RecordingSurface, image, &(), &overlay).unwrap();

    assert_eq!(result.ops.len(), 2);
    assert_eq!(
        result.ops[0],
        Op::Outline {
            rect: Rect::new(150, 75, 100, 50),
            stroke: Color::yellow(),
        }
    );
    assert!(matches!(result.ops[1], Op::Text { .. }));
}

#[test]
fn test_overlay_text_empty_text_fails() {
    let image = FakeImage::new(400, 200);
    let overlay = TextOverlay::new("", PointF::new(200.0, 100.0), Size::new(100, 50));
    let result = compose::overlay_text(&RecordingSurface, image, &(), &overlay);
    assert!(matches!(result, Err(RasterError::MeasurementFailure(_))));
}

#[test]
fn test_layer_draws_foreground_at_native_size() {
    let background = FakeImage::new(400, 300);
    let foreground = FakeImage::new(50, 40);

    let result = compose::layer(&RecordingSurface, background, &foreground, 380, -10).unwrap();

    assert_eq!(result.size, Size::new(400, 300));
    assert_eq!(
        result.ops,
        vec![Op::Image {
            source: Size::new(50, 40),
            dest: Rect::new(380, -10, 50, 40),
        }]
    );
}

#[test]
fn test_layer_accumulates_on_background() {
    let background = FakeImage::new(400, 300);
    let badge = FakeImage::new(10, 10);

    let once = compose::layer(&RecordingSurface, background, &badge, 0, 0).unwrap();
    let twice = compose::layer(&RecordingSurface, once, &badge, 20, 20).unwrap();

    assert_eq!(twice.ops.len(), 2);
}
