//! Auto-fit font sizing and centered text layout

use crate::geometry::{PointF, Rect, Size, SizeF};
use crate::surface::TextMeasure;
use crate::{RasterError, Result};
use log::debug;

/// Reference size used for the single measurement in [`fit_font_size`]
pub const PROBE_SIZE: f32 = 10.0;

/// Share of the measured line height treated as visible glyph height when
/// centering vertically
///
/// Empirical: measured line boxes carry ascender/descender whitespace that
/// makes text look low when centered on the full height. There is no
/// calibration beyond visual inspection.
pub const HEIGHT_COMPRESSION: f32 = 0.75;

/// Bisection stops once the bracket is narrower than this
const REFINE_TOLERANCE: f32 = 0.05;

/// Upper bound on bracket doublings or halvings in [`refine_font_size`]
const MAX_SEARCH_STEPS: u32 = 16;

/// How the font size for a bounding area is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFit {
    /// One measurement at [`PROBE_SIZE`], scaled linearly
    #[default]
    Probe,
    /// Bisection against real measurements, seeded by the probe estimate
    Refine,
}

/// Result of laying out a line of text in a bounding area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextLayout {
    /// Fitted font size in pixels
    pub font_size: f32,
    /// Top-left of the text's layout box
    pub origin: PointF,
    /// Uncompressed extent of the text at `font_size`
    pub measured: SizeF,
}

/// Largest font size at which `text` fits `area`, estimated from one probe
///
/// Measures at [`PROBE_SIZE`] and scales by the limiting axis ratio. This
/// assumes metrics grow linearly with the nominal size, which is only
/// approximately true for hinted fonts; use [`refine_font_size`] when the
/// result must be exact.
///
/// # Errors
/// `InvalidDimension` for an empty area, `MeasurementFailure` when the text
/// measures empty at the probe size.
pub fn fit_font_size<M: TextMeasure>(
    measurer: &M,
    area: Size,
    text: &str,
    font: &M::Font,
) -> Result<f32> {
    if area.is_empty() {
        return Err(RasterError::InvalidDimension {
            width: area.width,
            height: area.height,
        });
    }

    let probe = measurer.measure(text, font, PROBE_SIZE)?;
    if !(probe.width > 0.0 && probe.height > 0.0) {
        return Err(RasterError::MeasurementFailure(format!(
            "'{text}' has an empty extent at size {PROBE_SIZE}"
        )));
    }

    let h_ratio = area.height as f32 / probe.height;
    let w_ratio = area.width as f32 / probe.width;

    Ok(PROBE_SIZE * h_ratio.min(w_ratio))
}

/// Largest font size at which `text` fits `area`, found by bisection
///
/// The result always fits: when the probe estimate overshoots, the lower
/// bound is found by halving it.
pub fn refine_font_size<M: TextMeasure>(
    measurer: &M,
    area: Size,
    text: &str,
    font: &M::Font,
) -> Result<f32> {
    let estimate = fit_font_size(measurer, area, text, font)?;
    let fits = |size: f32| -> Result<bool> {
        Ok(measurer.measure(text, font, size)?.fits_within(area))
    };

    let (mut low, mut high) = if fits(estimate)? {
        (estimate, estimate * 2.0)
    } else {
        // Halve until a size fits so the bracket always has a valid floor
        let mut low = estimate / 2.0;
        let mut steps = 0;
        while !fits(low)? {
            steps += 1;
            if steps >= MAX_SEARCH_STEPS {
                return Err(RasterError::MeasurementFailure(format!(
                    "'{text}' does not fit {area} at any size"
                )));
            }
            low /= 2.0;
        }
        (low, estimate)
    };

    let mut steps = 0;
    while steps < MAX_SEARCH_STEPS && fits(high)? {
        low = high;
        high *= 2.0;
        steps += 1;
    }

    while high - low > REFINE_TOLERANCE {
        let mid = (low + high) / 2.0;
        if fits(mid)? {
            low = mid;
        } else {
            high = mid;
        }
    }

    Ok(low)
}

/// Fit `text` to `area` and center it on `center`
///
/// The vertical centering uses the measured height scaled by
/// [`HEIGHT_COMPRESSION`]. The returned `measured` size is the uncompressed
/// one so callers can adjust their own layout, see [`grow_bounding_area`].
pub fn layout_centered_text<M: TextMeasure>(
    measurer: &M,
    center: PointF,
    area: Size,
    text: &str,
    font: &M::Font,
    fit: FontFit,
) -> Result<TextLayout> {
    let font_size = match fit {
        FontFit::Probe => fit_font_size(measurer, area, text, font)?,
        FontFit::Refine => refine_font_size(measurer, area, text, font)?,
    };

    let measured = measurer.measure(text, font, font_size)?;
    let visible_height = measured.height * HEIGHT_COMPRESSION;
    let origin = PointF::new(
        center.x - measured.width / 2.0,
        center.y - visible_height / 2.0,
    );

    debug!(
        "Laid out '{}' in {} at size {:.2}: {:.1}x{:.1} from ({:.1}, {:.1})",
        text, area, font_size, measured.width, measured.height, origin.x, origin.y
    );

    Ok(TextLayout {
        font_size,
        origin,
        measured,
    })
}

/// Grow `area` by half of the vertical slack left by `measured`
///
/// Leaves `area` untouched when the text already fills its height.
pub fn grow_bounding_area(area: Size, measured: SizeF) -> Size {
    let height = area.height as f32;
    if measured.height < height {
        Size::new(area.width, (height + (height - measured.height) / 2.0) as u32)
    } else {
        area
    }
}

/// Integer rectangle of `area` centered on `center`
pub(crate) fn centered_rect(center: PointF, area: Size) -> Rect {
    Rect::new(
        (center.x - area.width as f32 / 2.0).floor() as i32,
        (center.y - area.height as f32 / 2.0).floor() as i32,
        area.width,
        area.height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Metrics proportional to size: 0.6 advance per char, 1.2 line height
    struct LinearMeasure;

    impl TextMeasure for LinearMeasure {
        type Font = ();

        fn measure(&self, text: &str, _font: &(), size: f32) -> Result<SizeF> {
            let chars = text.chars().count() as f32;
            Ok(SizeF::new(chars * 0.6 * size, 1.2 * size))
        }
    }

    /// Like `LinearMeasure` plus a fixed 4px side bearing
    struct PaddedMeasure;

    impl TextMeasure for PaddedMeasure {
        type Font = ();

        fn measure(&self, text: &str, _font: &(), size: f32) -> Result<SizeF> {
            let chars = text.chars().count() as f32;
            Ok(SizeF::new(chars * 0.6 * size + 4.0, 1.2 * size))
        }
    }

    /// Linear metrics that run 10% wider below size 1
    struct SmallSizeMeasure;

    impl TextMeasure for SmallSizeMeasure {
        type Font = ();

        fn measure(&self, _text: &str, _font: &(), size: f32) -> Result<SizeF> {
            let stretch = if size < 1.0 { 1.1 } else { 1.0 };
            Ok(SizeF::new(400.0 * size * stretch, 0.1 * size))
        }
    }

    #[test]
    fn test_fit_font_size_height_limited() {
        // Probe: 30x12. Ratios: h 60/12 = 5, w 300/30 = 10.
        let size = fit_font_size(&LinearMeasure, Size::new(300, 60), "Hello", &()).unwrap();
        assert!((size - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_fit_font_size_width_limited() {
        // Probe: 30x12. Ratios: h 120/12 = 10, w 90/30 = 3.
        let size = fit_font_size(&LinearMeasure, Size::new(90, 120), "Hello", &()).unwrap();
        assert!((size - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_fit_font_size_fits_limiting_dimension() {
        let areas = [(300, 60), (90, 120), (17, 5), (1000, 1000)];
        for (w, h) in areas {
            let area = Size::new(w, h);
            let size = fit_font_size(&LinearMeasure, area, "Caption", &()).unwrap();
            let measured = LinearMeasure.measure("Caption", &(), size).unwrap();
            assert!(measured.width <= w as f32 + 1e-2);
            assert!(measured.height <= h as f32 + 1e-2);
            // The limiting side is filled
            let fill = (measured.width / w as f32).max(measured.height / h as f32);
            assert!((fill - 1.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_fit_font_size_empty_text_fails() {
        let result = fit_font_size(&LinearMeasure, Size::new(100, 100), "", &());
        assert!(matches!(result, Err(RasterError::MeasurementFailure(_))));
    }

    #[test]
    fn test_fit_font_size_empty_area_fails() {
        let result = fit_font_size(&LinearMeasure, Size::new(0, 100), "A", &());
        assert!(matches!(result, Err(RasterError::InvalidDimension { .. })));
    }

    #[test]
    fn test_probe_leaves_slack_with_nonlinear_metrics() {
        let area = Size::new(100, 200);
        let size = fit_font_size(&PaddedMeasure, area, "Hello", &()).unwrap();
        let measured = PaddedMeasure.measure("Hello", &(), size).unwrap();
        assert!(measured.fits_within(area));
        assert!(measured.width < area.width as f32 - 5.0);
    }

    #[test]
    fn test_refine_font_size_fits_nonlinear_metrics() {
        let area = Size::new(100, 200);
        let size = refine_font_size(&PaddedMeasure, area, "Hello", &()).unwrap();
        let measured = PaddedMeasure.measure("Hello", &(), size).unwrap();
        assert!(measured.fits_within(area));
        // (100 - 4) / 3 = 32
        assert!((size - 32.0).abs() < 0.1, "got {size}");
    }

    #[test]
    fn test_refine_font_size_matches_probe_for_linear_metrics() {
        let area = Size::new(300, 60);
        let size = refine_font_size(&LinearMeasure, area, "Hello", &()).unwrap();
        assert!((size - 50.0).abs() < 0.1, "got {size}");
    }

    #[test]
    fn test_refine_font_size_recovers_from_tiny_overshooting_estimate() {
        let area = Size::new(10, 100);
        // Probe estimate is 0.025, which measures 11 px wide
        let estimate = fit_font_size(&SmallSizeMeasure, area, "x", &()).unwrap();
        assert!(estimate < REFINE_TOLERANCE);
        assert!(!SmallSizeMeasure
            .measure("x", &(), estimate)
            .unwrap()
            .fits_within(area));

        let size = refine_font_size(&SmallSizeMeasure, area, "x", &()).unwrap();
        assert!(size > 0.0);
        assert!(SmallSizeMeasure
            .measure("x", &(), size)
            .unwrap()
            .fits_within(area));
    }

    #[test]
    fn test_layout_centered_text() {
        let layout = layout_centered_text(
            &LinearMeasure,
            PointF::new(200.0, 100.0),
            Size::new(300, 60),
            "Hello",
            &(),
            FontFit::Probe,
        )
        .unwrap();

        assert!((layout.font_size - 50.0).abs() < 1e-4);
        assert!((layout.measured.width - 150.0).abs() < 1e-3);
        assert!((layout.measured.height - 60.0).abs() < 1e-3);
        // Horizontal: 200 - 150/2. Vertical: 100 - (60 * 0.75)/2.
        assert!((layout.origin.x - 125.0).abs() < 1e-3);
        assert!((layout.origin.y - 77.5).abs() < 1e-3);
    }

    #[test]
    fn test_grow_bounding_area() {
        let area = Size::new(300, 60);
        assert_eq!(
            grow_bounding_area(area, SizeF::new(100.0, 40.0)),
            Size::new(300, 70)
        );
        assert_eq!(grow_bounding_area(area, SizeF::new(100.0, 60.0)), area);
        assert_eq!(grow_bounding_area(area, SizeF::new(100.0, 80.0)), area);
    }

    #[test]
    fn test_centered_rect() {
        let rect = centered_rect(PointF::new(200.0, 100.0), Size::new(300, 60));
        assert_eq!(rect, Rect::new(50, 70, 300, 60));
    }

    #[test]
    fn test_centered_rect_floors_negative_edges() {
        let rect = centered_rect(PointF::new(3.5, 2.0), Size::new(12, 9));
        assert_eq!(rect, Rect::new(-3, -3, 12, 9));
    }
}
