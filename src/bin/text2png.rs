// text2png - Render the text particle effect headlessly
//
// Pipeline:
//   1. Load font bytes, build the rasterizer for the requested surface
//   2. Rasterize the string into particle seeds, populate the field
//   3. Run N ticks while the pointer sweeps across the surface
//   4. Write the final framebuffer as PNG
//
// Usage: cargo run --bin text2png -- <font.ttf> <text>
//          [--width N] [--height N] [--frames N] [--seed N] [--out PATH]

use glyphdust_engine::{ParticleField, Surface, TextRasterizer};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!(
            "Usage: {} <font.ttf> <text> [--width N] [--height N] [--frames N] [--seed N] [--out PATH]",
            args[0]
        );
        std::process::exit(1);
    }

    // Parse arguments
    let font_path = &args[1];
    let text = &args[2];
    let mut width = 800u32;
    let mut height = 600u32;
    let mut frames = 120u32;
    let mut seed = 0xDEADBEEFu32;
    let mut out = String::from("glyphdust.png");

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--width" => { width = args.get(i + 1).and_then(|s| s.parse().ok()).unwrap_or(800); i += 2; }
            "--height" => { height = args.get(i + 1).and_then(|s| s.parse().ok()).unwrap_or(600); i += 2; }
            "--frames" => { frames = args.get(i + 1).and_then(|s| s.parse().ok()).unwrap_or(120); i += 2; }
            "--seed" => { seed = args.get(i + 1).and_then(|s| s.parse().ok()).unwrap_or(0xDEADBEEF); i += 2; }
            "--out" => { if let Some(path) = args.get(i + 1) { out = path.clone(); } i += 2; }
            _ => i += 1,
        }
    }

    println!("Rendering {:?} at {}x{} ({} frames)...", text, width, height, frames);

    let font_data = std::fs::read(font_path).expect("Failed to read font file");
    let mut raster =
        TextRasterizer::new(width, height, &font_data).expect("Failed to build rasterizer");
    let mut field = ParticleField::new(width, height, seed);
    let mut surface = Surface::new(width, height).expect("Failed to create surface");

    let seeds = raster.render(text);
    println!("  {} particles", seeds.len());
    field.repopulate(&seeds);

    // Pointer sweeps left to right through the vertical middle, so the
    // exported frame shows the scatter in progress.
    for frame in 0..frames {
        let t = frame as f32 / frames.max(1) as f32;
        field.set_pointer(t * width as f32, height as f32 / 2.0);
        field.update();
    }

    surface.clear();
    surface.encode_particles(&field.particles, raster.gap());

    let img = image::RgbaImage::from_raw(width, height, surface.as_rgba().to_vec())
        .expect("Framebuffer size mismatch");
    img.save(&out).expect("Failed to write PNG");

    println!("Wrote {out}");
}
