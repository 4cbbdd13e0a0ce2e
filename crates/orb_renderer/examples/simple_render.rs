//! Simple path tracer example.
//!
//! Renders a small scene with a few extra spheres and saves it as PPM.

use orb_renderer::{render, Color, Material, RenderConfig, Scene, Sphere, Vec3};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let scene = build_scene();
    log::info!("Created {} spheres", scene.len());

    let config = RenderConfig {
        width: 400,
        height: 200,
        samples_per_pixel: 50,
        max_depth: 20,
        ..RenderConfig::default()
    };
    let camera = config.camera()?;

    let image = render(&camera, &scene, &config)?;
    image.save("simple_render.ppm")?;
    Ok(())
}

fn build_scene() -> Scene {
    let mut scene = Scene::demo();

    // A row of small spheres in front of the ground
    for i in 0..5 {
        let x = -1.2 + 0.6 * i as f32;
        let material = if i % 2 == 0 {
            Material::metal(Color::rgb(0.9, 0.9, 0.9))
        } else {
            Material::lambertian(Color::rgb(0.2, 0.4, 0.8))
        };
        scene.push(Sphere::new(Vec3::new(x, -0.35, -0.8), 0.15, material));
    }

    scene
}
