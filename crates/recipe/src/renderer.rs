//! Recipe rendering

use crate::parser::{is_truthy, resolve_binding, value_to_string};
use crate::schema::*;
use crate::{RecipeError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::debug;
use raster_core::compose::{self, TextOverlay};
use raster_image::{decode, decode_base64, FontData, ImageSurface, RasterImage};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[cfg(feature = "fetch")]
use raster_image::FetchOptions;

/// Recipe renderer
pub struct RecipeRenderer<'a> {
    /// The recipe to render
    recipe: &'a Recipe,
    /// Surface all steps draw with
    surface: ImageSurface,
    /// Loaded fonts by ID
    fonts: HashMap<String, FontData>,
    /// Directory relative file sources are resolved against
    base_dir: Option<PathBuf>,
    #[cfg(feature = "fetch")]
    fetch_options: FetchOptions,
}

impl<'a> RecipeRenderer<'a> {
    /// Create a new renderer for a recipe
    pub fn new(recipe: &'a Recipe) -> Self {
        Self {
            recipe,
            surface: ImageSurface::new(),
            fonts: HashMap::new(),
            base_dir: None,
            #[cfg(feature = "fetch")]
            fetch_options: FetchOptions::default(),
        }
    }

    /// Draw with a custom surface (e.g. a different resampling filter)
    pub fn with_surface(mut self, surface: ImageSurface) -> Self {
        self.surface = surface;
        self
    }

    /// Resolve relative font and image paths against `dir`
    pub fn with_base_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Set request options for `http(s)://` layer sources
    #[cfg(feature = "fetch")]
    pub fn with_fetch_options(mut self, options: FetchOptions) -> Self {
        self.fetch_options = options;
        self
    }

    /// Register an already parsed font, replacing any font with the same name
    pub fn with_font(mut self, font: FontData) -> Self {
        self.fonts.insert(font.name.clone(), font);
        self
    }

    /// Load all fonts defined in the recipe
    pub fn load_fonts(mut self) -> Result<Self> {
        for font_def in &self.recipe.fonts {
            let font = self.load_font(font_def)?;
            debug!("Loaded font '{}'", font_def.id);
            self.fonts.insert(font_def.id.clone(), font);
        }
        Ok(self)
    }

    fn load_font(&self, font_def: &FontDef) -> Result<FontData> {
        let data = match font_def.source.strip_prefix("base64:") {
            Some(payload) => STANDARD.decode(payload.trim()).map_err(|e| {
                RecipeError::FontError(format!("Invalid base64 for font {}: {}", font_def.id, e))
            })?,
            None => {
                let path = self.resolve_path(&font_def.source);
                std::fs::read(&path).map_err(|e| {
                    RecipeError::FontError(format!(
                        "Failed to read font {}: {}",
                        path.display(),
                        e
                    ))
                })?
            }
        };

        Ok(FontData::from_bytes(&font_def.id, data)?)
    }

    fn resolve_path(&self, path: &str) -> PathBuf {
        match &self.base_dir {
            Some(dir) if Path::new(path).is_relative() => dir.join(path),
            _ => PathBuf::from(path),
        }
    }

    /// Render the recipe onto an image
    ///
    /// # Arguments
    /// * `image` - Input image, consumed by the pipeline
    /// * `data` - Data for binding
    pub fn render(&self, image: RasterImage, data: &serde_json::Value) -> Result<RasterImage> {
        self.recipe
            .steps
            .iter()
            .try_fold(image, |image, step| self.apply_step(image, step, data))
    }

    /// Apply a single step
    fn apply_step(
        &self,
        image: RasterImage,
        step: &Step,
        data: &serde_json::Value,
    ) -> Result<RasterImage> {
        let label = match step.id() {
            Some(id) => format!("{} step '{}'", step.name(), id),
            None => format!("{} step", step.name()),
        };
        if !self.is_step_enabled(step, data) {
            debug!("Skipping disabled {}", label);
            return Ok(image);
        }

        debug!("Applying {}", label);
        let surface = &self.surface;
        let output = match step {
            Step::Crop(s) => compose::crop(surface, &image, (*s).into())?,
            Step::CropAndFill(s) => compose::crop_and_fill(surface, &image, (*s).into())?,
            Step::Resize(s) => compose::resize(
                surface,
                &image,
                raster_core::Size::new(s.width, s.height),
                s.policy.into(),
            )?,
            Step::ResizeByHeight(s) => compose::resize_by_height(surface, &image, s.height)?,
            Step::Letterbox(s) => {
                let background = s
                    .background
                    .map(raster_core::Color::from)
                    .unwrap_or_else(raster_core::Color::transparent);
                compose::letterbox(
                    surface,
                    &image,
                    raster_core::Size::new(s.width, s.height),
                    background,
                )?
            }
            Step::Text(s) => self.render_text_step(image, s, data)?,
            Step::Layer(s) => {
                let foreground = self.load_source(&s.source)?;
                compose::layer(surface, image, &foreground, s.x, s.y)?
            }
        };

        Ok(output)
    }

    /// Check if a step is enabled based on its enable binding
    fn is_step_enabled(&self, step: &Step, data: &serde_json::Value) -> bool {
        match step.enable() {
            None => true,
            Some(bind) => resolve_binding(bind, data).is_some_and(is_truthy),
        }
    }

    /// Render a text step
    fn render_text_step(
        &self,
        image: RasterImage,
        step: &TextStep,
        data: &serde_json::Value,
    ) -> Result<RasterImage> {
        let text = match &step.bind {
            Some(bind) => {
                if !bind.starts_with("$.") {
                    return Err(RecipeError::BindingError(format!(
                        "'{bind}' must start with '$.'"
                    )));
                }
                resolve_binding(bind, data)
                    .map(value_to_string)
                    .unwrap_or_default()
            }
            None => step.text.clone().unwrap_or_default(),
        };

        if text.is_empty() {
            return Ok(image);
        }

        let font = self.fonts.get(&step.font).ok_or_else(|| {
            RecipeError::FontError(format!("Font '{}' is not loaded", step.font))
        })?;

        let overlay = TextOverlay::new(&text, step.center.into(), step.area.into())
            .with_color(step.color.unwrap_or_default().into())
            .with_fit(step.fit.into())
            .with_debug_bounds(step.debug_bounds);

        Ok(compose::overlay_text(&self.surface, image, font, &overlay)?)
    }

    /// Load a layer image from its source string
    fn load_source(&self, source: &str) -> Result<RasterImage> {
        if let Some(payload) = source.strip_prefix("base64:") {
            return Ok(decode_base64(payload)?);
        }
        if source.starts_with("data:") {
            return Ok(decode_base64(source)?);
        }
        if source.starts_with("http://") || source.starts_with("https://") {
            return self.load_remote(source);
        }

        let path = self.resolve_path(source);
        let data = std::fs::read(&path).map_err(|e| {
            RecipeError::RenderError(format!("Failed to read image {}: {}", path.display(), e))
        })?;
        Ok(decode(&data)?)
    }

    #[cfg(feature = "fetch")]
    fn load_remote(&self, url: &str) -> Result<RasterImage> {
        Ok(raster_image::load_url(url, &self.fetch_options)?)
    }

    #[cfg(not(feature = "fetch"))]
    fn load_remote(&self, url: &str) -> Result<RasterImage> {
        Err(RecipeError::RenderError(format!(
            "Cannot load {url}: built without the `fetch` feature"
        )))
    }
}
