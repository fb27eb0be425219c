//! Font loading, measurement and glyph layout

use ab_glyph::{point, Font, FontVec, Glyph, GlyphId, OutlinedGlyph, PxScale, ScaleFont};
use raster_core::{PointF, RasterError, Result, SizeF};
use std::fmt;
use std::path::Path;

/// Parsed font used for measuring and drawing text
///
/// Sizes passed to this type are em sizes in pixels: at size 10 one em spans
/// 10 pixels, independent of the font's own ascent/descent ratio.
pub struct FontData {
    /// Font identifier
    pub name: String,
    font: FontVec,
}

impl fmt::Debug for FontData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontData")
            .field("name", &self.name)
            .field("glyphs", &self.font.glyph_count())
            .finish()
    }
}

impl FontData {
    /// Create font data from TrueType/OpenType bytes
    ///
    /// # Arguments
    /// * `name` - Font identifier
    /// * `data` - Font file bytes
    pub fn from_bytes(name: &str, data: Vec<u8>) -> Result<Self> {
        let font = FontVec::try_from_vec(data)
            .map_err(|e| RasterError::FontError(format!("{name}: {e}")))?;

        Ok(Self {
            name: name.to_string(),
            font,
        })
    }

    /// Load font data from a file
    pub fn from_file<P: AsRef<Path>>(name: &str, path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(name, data)
    }

    /// Font units per em
    pub fn units_per_em(&self) -> f32 {
        self.font.units_per_em().unwrap_or(1000.0)
    }

    /// Scale that makes one em span `size` pixels
    fn px_scale(&self, size: f32) -> PxScale {
        PxScale::from(size * self.font.height_unscaled() / self.units_per_em())
    }

    /// Height of one line (ascent, descent and line gap) at `size`
    pub fn line_height(&self, size: f32) -> f32 {
        let scaled = self.font.as_scaled(self.px_scale(size));
        scaled.height() + scaled.line_gap()
    }

    /// Advance width of `text` including kerning at `size`
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let scaled = self.font.as_scaled(self.px_scale(size));
        let mut width = 0.0;
        let mut previous: Option<GlyphId> = None;

        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }

        width
    }

    /// Extent of `text` on a single line at `size`
    pub fn measure(&self, text: &str, size: f32) -> SizeF {
        SizeF::new(self.text_width(text, size), self.line_height(size))
    }

    /// Position glyphs for `text` with the line box's top-left at `origin`
    pub fn layout(&self, text: &str, size: f32, origin: PointF) -> Vec<Glyph> {
        let scale = self.px_scale(size);
        let scaled = self.font.as_scaled(scale);
        let baseline = origin.y + scaled.ascent();

        let mut glyphs = Vec::with_capacity(text.len());
        let mut caret = origin.x;
        let mut previous: Option<GlyphId> = None;

        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            glyphs.push(id.with_scale_and_position(scale, point(caret, baseline)));
            caret += scaled.h_advance(id);
            previous = Some(id);
        }

        glyphs
    }

    /// Outline a positioned glyph; `None` for glyphs without contours
    pub fn outline(&self, glyph: Glyph) -> Option<OutlinedGlyph> {
        self.font.outline_glyph(glyph)
    }
}
