// Render a JSON scene to a PNG.
// Run with: cargo run --release --bin glint -- <scene.json> [output.png]

use std::path::PathBuf;

use anyhow::{Context, Result};
use glint_core::load_scene;
use glint_renderer::{render, Camera};

const DEFAULT_OUTPUT: &str = "output.png";

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut args = std::env::args().skip(1);
    let Some(scene_path) = args.next().map(PathBuf::from) else {
        eprintln!("Usage: glint <scene.json> [output.png]");
        std::process::exit(1);
    };
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    log::info!("Starting Glint");

    let loaded = load_scene(&scene_path)
        .with_context(|| format!("Failed to load scene {}", scene_path.display()))?;

    let camera = Camera::new(&loaded.camera);
    let image = render(&camera, &loaded.scene, &loaded.trace);

    image
        .to_image()
        .save(&output)
        .with_context(|| format!("Failed to save {}", output.display()))?;
    log::info!("Saved to {}", output.display());

    Ok(())
}
