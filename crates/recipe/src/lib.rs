//! Recipe - JSON image transformation pipelines
//!
//! This crate provides:
//! - Recipe JSON schema types
//! - Recipe parsing from JSON
//! - Step rendering (crop, resize, letterbox, text, layer)
//! - Data binding via JSONPath-like expressions
//!
//! # Example
//!
//! ```ignore
//! use raster_image::{decode, encode, OutputFormat};
//! use recipe::{parse_recipe, RecipeRenderer};
//!
//! let recipe = parse_recipe(recipe_json)?;
//! let data: serde_json::Value = serde_json::from_str(data_json)?;
//! let image = decode(&std::fs::read("photo.jpg")?)?;
//! let output = RecipeRenderer::new(&recipe).load_fonts()?.render(image, &data)?;
//! std::fs::write("card.png", encode(&output, OutputFormat::Png)?)?;
//! ```

pub mod parser;
mod renderer;
mod schema;

pub use parser::{parse_recipe, resolve_binding};
pub use renderer::RecipeRenderer;
pub use schema::*;

use thiserror::Error;

/// Errors that can occur during recipe processing
#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("Failed to parse recipe: {0}")]
    ParseError(String),

    #[error("Invalid data binding: {0}")]
    BindingError(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Font error: {0}")]
    FontError(String),

    #[error("Raster error: {0}")]
    Raster(#[from] raster_core::RasterError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for recipe operations
pub type Result<T> = std::result::Result<T, RecipeError>;
