//! Thumbnail with Caption
//!
//! Crops an image to a square thumbnail and writes a caption across the
//! bottom of it.
//!
//! Usage:
//!   cargo run --example thumbnail -- <input> <caption> [output.png] [font.ttf]
//!
//! Examples:
//!   cargo run --example thumbnail -- photo.jpg "Summer 2024"
//!   cargo run --example thumbnail -- photo.jpg "Summer 2024" thumb.png fonts/Title.ttf

use raster_core::compose::{self, TextOverlay};
use raster_core::{Color, FontFit, PointF, Size};
use raster_image::{decode, encode, FontData, ImageSurface, OutputFormat};

const THUMBNAIL_SIZE: u32 = 400;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!(
            "Usage: {} <input> <caption> [output.png] [font.ttf]",
            args[0]
        );
        std::process::exit(1);
    }

    let input_path = &args[1];
    let caption = &args[2];
    let output_path = args.get(3).map(String::as_str).unwrap_or("thumbnail.png");
    let font_path = args.get(4).cloned().unwrap_or_else(|| {
        concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fonts/DejaVuSerif.ttf").to_string()
    });

    let surface = ImageSurface::new();
    let font = FontData::from_file("caption", &font_path)?;

    let source = decode(&std::fs::read(input_path)?)?;
    let side = THUMBNAIL_SIZE;
    let thumbnail = compose::crop_and_fill(&surface, &source, Size::new(side, side))?;

    // Caption band: full width minus margins, bottom sixth of the image
    let band = Size::new(side - 40, side / 6);
    let center = PointF::new(side as f32 / 2.0, side as f32 - band.height as f32);
    let overlay = TextOverlay::new(caption, center, band)
        .with_color(Color::white())
        .with_fit(FontFit::Refine);
    let thumbnail = compose::overlay_text(&surface, thumbnail, &font, &overlay)?;

    std::fs::write(output_path, encode(&thumbnail, OutputFormat::Png)?)?;
    println!("Wrote {}x{} thumbnail to {}", side, side, output_path);

    Ok(())
}
