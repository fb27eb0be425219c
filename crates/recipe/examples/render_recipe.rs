//! Recipe Renderer
//!
//! Applies a recipe JSON to an image, binding text steps to input data.
//! Relative font and image paths in the recipe resolve against the recipe's
//! directory.
//!
//! Usage:
//!   cargo run --example render_recipe -- <recipe.json> <image> [data.json] [output.png]

use raster_image::{decode, encode, OutputFormat};
use recipe::{parse_recipe, RecipeRenderer};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!(
            "Usage: {} <recipe.json> <image> [data.json] [output.png]",
            args[0]
        );
        std::process::exit(1);
    }

    let recipe_path = &args[1];
    let image_path = &args[2];

    let recipe_json = std::fs::read_to_string(recipe_path)
        .map_err(|e| format!("Failed to read recipe '{}': {}", recipe_path, e))?;
    let recipe = parse_recipe(&recipe_json)?;

    let data: serde_json::Value = match args.get(3) {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => serde_json::Value::Null,
    };
    let output_path = args.get(4).map(String::as_str).unwrap_or("output.png");

    let base_dir = Path::new(recipe_path)
        .parent()
        .unwrap_or_else(|| Path::new("."));
    let renderer = RecipeRenderer::new(&recipe)
        .with_base_dir(base_dir)
        .load_fonts()?;

    let image = decode(&std::fs::read(image_path)?)?;
    let output = renderer.render(image, &data)?;

    std::fs::write(output_path, encode(&output, OutputFormat::Png)?)?;
    println!("Applied {} steps, wrote {}", recipe.steps.len(), output_path);

    Ok(())
}
