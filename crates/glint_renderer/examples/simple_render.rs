//! Simple ray tracer example.
//!
//! Builds a mirror-ball scene in code and saves it as a PNG.

use std::sync::Arc;

use glint_core::{
    CameraSettings, GradientEnvironment, Light, Material, Scene, SceneResult, Sphere,
    TraceSettings,
};
use glint_renderer::{render, Camera, Color, Vec3};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Glint Ray Tracer - Simple Example");
    println!("=================================");

    let start = std::time::Instant::now();
    let scene = build_scene()?;
    println!("Scene built in {:?}", start.elapsed());

    let camera = Camera::new(&CameraSettings {
        width: 640,
        height: 360,
        look_from: Vec3::new(6.0, 2.5, 6.0),
        look_at: Vec3::new(0.0, 0.7, 0.0),
        vup: Vec3::Y,
        vfov: 35.0,
    });
    let settings = TraceSettings::default().with_bounce_limit(8);

    println!(
        "Rendering {}x{} with up to {} bounces...",
        camera.image_width, camera.image_height, settings.bounce_limit
    );

    let start = std::time::Instant::now();
    let image = render(&camera, &scene, &settings);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.png";
    image.to_image().save(filename)?;
    println!("Saved to {}", filename);

    Ok(())
}

fn build_scene() -> SceneResult<Scene> {
    let mut scene = Scene::new(Arc::new(GradientEnvironment::sky()));

    // Ground
    scene.add_sphere(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Material::new(Color::splat(0.5), Color::splat(0.05), 4.0)?,
    )?);

    // Mirror ball in the middle, colored balls around it
    scene.add_sphere(Sphere::new(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        Material::new(Color::splat(0.02), Color::splat(0.95), 500.0)?,
    )?);

    let colors = [
        Color::new(0.8, 0.2, 0.1),
        Color::new(0.1, 0.6, 0.2),
        Color::new(0.2, 0.3, 0.9),
        Color::new(0.9, 0.8, 0.2),
    ];
    for (i, color) in colors.into_iter().enumerate() {
        let angle = i as f32 * std::f32::consts::FRAC_PI_2 + 0.4;
        let center = Vec3::new(2.2 * angle.cos(), 0.4, 2.2 * angle.sin());
        scene.add_sphere(Sphere::new(
            center,
            0.4,
            Material::new(color, Color::splat(0.3), 80.0)?,
        )?);
    }

    scene.add_light(Light::new(Vec3::new(4.0, 7.0, 3.0), Color::splat(0.9))?);
    scene.add_light(Light::new(Vec3::new(-5.0, 4.0, -2.0), Color::splat(0.3))?);

    println!("Created {} spheres", scene.sphere_count());
    Ok(scene)
}
