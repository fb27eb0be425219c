//! Recipe JSON schema types

use raster_core::{FitPolicy, FontFit, PointF, Rect, Size};
use serde::{Deserialize, Serialize};

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Alpha, opaque when omitted
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Color {
    /// Create an opaque color
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    /// White color
    pub fn white() -> Self {
        Self::rgb(255, 255, 255)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

impl From<Color> for raster_core::Color {
    fn from(c: Color) -> Self {
        raster_core::Color::rgba(c.r, c.g, c.b, c.a)
    }
}

/// Root recipe structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Schema version
    pub version: String,

    /// Font definitions
    #[serde(default)]
    pub fonts: Vec<FontDef>,

    /// Steps applied in order
    pub steps: Vec<Step>,
}

impl Default for Recipe {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            fonts: Vec::new(),
            steps: Vec::new(),
        }
    }
}

impl Recipe {
    /// Register a font under `id`
    pub fn add_font(&mut self, id: &str, source: &str) -> &mut Self {
        self.fonts.push(FontDef {
            id: id.to_string(),
            source: source.to_string(),
        });
        self
    }

    /// Append a step
    pub fn add_step(&mut self, step: Step) -> &mut Self {
        self.steps.push(step);
        self
    }

    /// Append a crop-and-fill step
    pub fn crop_and_fill(&mut self, width: u32, height: u32) -> &mut Self {
        self.add_step(Step::CropAndFill(Dimensions { width, height }))
    }

    /// Append a resize step
    pub fn resize(&mut self, width: u32, height: u32, policy: Policy) -> &mut Self {
        self.add_step(Step::Resize(ResizeStep {
            width,
            height,
            policy,
        }))
    }

    /// Append a layer step drawing `source` at `(x, y)`
    pub fn layer(&mut self, source: &str, x: i32, y: i32) -> &mut Self {
        self.add_step(Step::Layer(LayerStep {
            id: None,
            source: source.to_string(),
            x,
            y,
            enable: None,
        }))
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Font definition
///
/// `source` is a file path or `base64:` followed by the font bytes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FontDef {
    /// Font ID referenced by text steps
    pub id: String,

    /// Font source
    pub source: String,
}

/// Image transformation step (tagged union)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Step {
    /// Extract a region without scaling
    Crop(CropStep),

    /// Scale to cover and crop the centered overflow
    CropAndFill(Dimensions),

    /// Scale towards a target size
    Resize(ResizeStep),

    /// Scale to a height, preserving aspect ratio
    ResizeByHeight(HeightStep),

    /// Fit inside a canvas padded with a background color
    Letterbox(LetterboxStep),

    /// Auto-fitted centered text
    Text(TextStep),

    /// Draw another image on top
    Layer(LayerStep),
}

impl Step {
    /// Step type name as written in JSON
    pub fn name(&self) -> &'static str {
        match self {
            Step::Crop(_) => "crop",
            Step::CropAndFill(_) => "cropAndFill",
            Step::Resize(_) => "resize",
            Step::ResizeByHeight(_) => "resizeByHeight",
            Step::Letterbox(_) => "letterbox",
            Step::Text(_) => "text",
            Step::Layer(_) => "layer",
        }
    }

    /// Get the step ID if present
    pub fn id(&self) -> Option<&str> {
        match self {
            Step::Text(s) => s.id.as_deref(),
            Step::Layer(s) => s.id.as_deref(),
            _ => None,
        }
    }

    /// Get the enable binding if present
    pub fn enable(&self) -> Option<&str> {
        match self {
            Step::Text(s) => s.enable.as_deref(),
            Step::Layer(s) => s.enable.as_deref(),
            _ => None,
        }
    }
}

/// Width and height in pixels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl From<Dimensions> for Size {
    fn from(d: Dimensions) -> Self {
        Size::new(d.width, d.height)
    }
}

/// Point in canvas pixels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl From<Position> for PointF {
    fn from(p: Position) -> Self {
        PointF::new(p.x, p.y)
    }
}

/// Crop region
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CropStep {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl From<CropStep> for Rect {
    fn from(s: CropStep) -> Self {
        Rect::new(s.x, s.y, s.width, s.height)
    }
}

/// Scale policy
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Policy {
    #[default]
    FillSmallest,
    FillLargest,
}

impl From<Policy> for FitPolicy {
    fn from(p: Policy) -> Self {
        match p {
            Policy::FillSmallest => FitPolicy::FillSmallest,
            Policy::FillLargest => FitPolicy::FillLargest,
        }
    }
}

/// Resize step
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResizeStep {
    pub width: u32,
    pub height: u32,

    #[serde(default)]
    pub policy: Policy,
}

/// Resize-by-height step
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeightStep {
    pub height: u32,
}

/// Letterbox step
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LetterboxStep {
    pub width: u32,
    pub height: u32,

    /// Padding color, transparent when omitted
    #[serde(default)]
    pub background: Option<Color>,
}

/// Font size strategy
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Fit {
    #[default]
    Probe,
    Refine,
}

impl From<Fit> for FontFit {
    fn from(f: Fit) -> Self {
        match f {
            Fit::Probe => FontFit::Probe,
            Fit::Refine => FontFit::Refine,
        }
    }
}

/// Text step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStep {
    /// Step identifier
    #[serde(default)]
    pub id: Option<String>,

    /// Data binding path (JSONPath-like)
    #[serde(default)]
    pub bind: Option<String>,

    /// Static text (used if bind is not specified)
    #[serde(default)]
    pub text: Option<String>,

    /// Center of the bounding area
    pub center: Position,

    /// Bounding area the text is fitted to
    pub area: Dimensions,

    /// Font ID
    pub font: String,

    /// Text color, black when omitted
    #[serde(default)]
    pub color: Option<Color>,

    #[serde(default)]
    pub fit: Fit,

    /// Stroke the bounding area in yellow
    #[serde(rename = "debugBounds")]
    #[serde(default)]
    pub debug_bounds: bool,

    /// Optional enable flag - if set, evaluates binding to determine if step is applied
    /// If the bound value is falsy (null, false, 0, empty string), step is skipped
    #[serde(default)]
    pub enable: Option<String>,
}

/// Layer step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerStep {
    /// Step identifier
    #[serde(default)]
    pub id: Option<String>,

    /// Image source: `base64:` prefix, `data:` URL, `http(s)://` URL or file path
    pub source: String,

    /// Left edge on the background
    #[serde(default)]
    pub x: i32,

    /// Top edge on the background
    #[serde(default)]
    pub y: i32,

    /// Optional enable flag, same semantics as [`TextStep::enable`]
    #[serde(default)]
    pub enable: Option<String>,
}
