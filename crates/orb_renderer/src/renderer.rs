//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing capped at a maximum bounce depth
//! - A procedural sky as the only light source
//! - Anti-aliasing via jittered multi-sampling
//! - Square-root display transform

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::sampling::gen_f32;
use crate::{Camera, Framebuffer, Ray, RenderError, RenderResult, Scene};
use orb_math::Color;
use rand::RngCore;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Sky color straight up.
const SKY_ZENITH: Color = Color::rgb(0.5, 0.7, 1.0);

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output image width in pixels
    pub width: u32,
    /// Output image height in pixels
    pub height: u32,
    /// Width of the camera's viewport plane in world units
    pub viewport_width: f32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Minimum hit distance, guards against shadow acne
    pub t_min: f32,
    /// Base seed; every bucket derives its own generator from it
    pub seed: u64,
    /// Edge length of a render bucket in pixels
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 480,
            height: 240,
            viewport_width: 4.0,
            samples_per_pixel: 100,
            max_depth: 100,
            t_min: 0.001,
            seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> RenderResult<Self> {
        let config: RenderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: RenderConfig =
            serde_json::from_str(&contents).map_err(|source| RenderError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        log::debug!("Loaded render config from {}", path.display());
        Ok(config)
    }

    /// Check that the settings describe a renderable image.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.viewport_width > 0.0) || !self.viewport_width.is_finite() {
            return Err(RenderError::InvalidViewport(self.viewport_width));
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidConfig(
                "samples_per_pixel must be at least 1".into(),
            ));
        }
        if self.bucket_size == 0 {
            return Err(RenderError::InvalidConfig(
                "bucket_size must be at least 1".into(),
            ));
        }
        if !(self.t_min >= 0.0) || !self.t_min.is_finite() {
            return Err(RenderError::InvalidConfig(format!(
                "t_min must be a non-negative number, got {}",
                self.t_min
            )));
        }
        Ok(())
    }

    /// Build an initialized camera matching this config.
    pub fn camera(&self) -> RenderResult<Camera> {
        let mut camera = Camera::new()
            .with_resolution(self.width, self.height)
            .with_viewport_width(self.viewport_width);
        camera.initialize()?;
        Ok(camera)
    }
}

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. Each bounce multiplies the
/// material's attenuation into the light returned by the next bounce. Once
/// `depth` reaches `config.max_depth` the ray is treated as escaping to the
/// sky.
pub fn trace(
    ray: &Ray,
    scene: &Scene,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    if depth >= config.max_depth {
        return sky_color(ray);
    }

    let Some(hit) = scene.find_nearest_hit(ray, config.t_min) else {
        return sky_color(ray);
    };

    match hit.material.scatter(ray, &hit, rng) {
        Some(result) => result.attenuation * trace(&result.scattered, scene, depth + 1, config, rng),
        // Absorbed
        None => Color::BLACK,
    }
}

/// Vertical white-to-blue sky gradient.
pub fn sky_color(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    Color::WHITE.lerp(SKY_ZENITH, a)
}

/// Estimate the color of pixel `(x, y)` by averaging jittered samples.
///
/// `y = 0` is the bottom row. The mean is passed through the square-root
/// display transform and returned opaque. A sample whose camera ray cannot
/// be built counts as black; the mean still divides by
/// `config.samples_per_pixel`.
pub fn integrate_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let width = camera.image_width as f32;
    let height = camera.image_height as f32;
    let mut pixel_color = Color::new(0.0, 0.0, 0.0, 0.0);

    for _ in 0..config.samples_per_pixel {
        let u = (x as f32 + gen_f32(rng)) / width;
        let v = (y as f32 + gen_f32(rng)) / height;

        match camera.generate_ray(u, v) {
            Ok(ray) => pixel_color += trace(&ray, scene, 0, config, rng),
            Err(err) => log::warn!("Dropping sample for pixel ({}, {}): {}", x, y, err),
        }
    }

    // Average the samples
    (pixel_color / config.samples_per_pixel as f32)
        .sqrt()
        .with_alpha(1.0)
}

/// Render the entire scene to a framebuffer.
///
/// Buckets are rendered in parallel on the current rayon pool. The result
/// depends only on `config.seed`, not on scheduling. The camera must be
/// initialized at the config's resolution.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> RenderResult<Framebuffer> {
    config.validate()?;
    if !camera.is_initialized() {
        return Err(RenderError::CameraNotInitialized);
    }
    if (camera.image_width, camera.image_height) != (config.width, config.height) {
        return Err(RenderError::CameraMismatch {
            camera_width: camera.image_width,
            camera_height: camera.image_height,
            width: config.width,
            height: config.height,
        });
    }

    let width = camera.image_width;
    let height = camera.image_height;
    let buckets = generate_buckets(width, height, config.bucket_size);
    let total = buckets.len();

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}, {} spheres, {} buckets on {} threads",
        width,
        height,
        config.samples_per_pixel,
        config.max_depth,
        scene.len(),
        total,
        rayon::current_num_threads()
    );

    let start = Instant::now();
    let finished = AtomicUsize::new(0);
    let report_every = (total / 10).max(1);

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let result = render_bucket(bucket, camera, scene, config);

            let done = finished.fetch_add(1, Ordering::Relaxed) + 1;
            log::debug!(
                "Bucket {} at ({}, {}) done ({}/{})",
                bucket.index,
                bucket.x,
                bucket.y,
                done,
                total
            );
            if done % report_every == 0 || done == total {
                log::info!("Progress: {}% ({}/{} buckets)", done * 100 / total, done, total);
            }

            result
        })
        .collect();

    let mut image = Framebuffer::new(width, height);
    for result in &results {
        image.write_bucket(result);
    }

    log::info!("Rendered in {:?}", start.elapsed());
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Sphere};
    use orb_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_config(width: u32, height: u32, samples: u32) -> RenderConfig {
        RenderConfig {
            width,
            height,
            samples_per_pixel: samples,
            bucket_size: 8,
            ..RenderConfig::default()
        }
    }

    fn closed_form_sky(direction: Vec3) -> Color {
        let t = 0.5 * (direction.normalize().y + 1.0);
        Color::rgb(
            (1.0 - t) + 0.5 * t,
            (1.0 - t) + 0.7 * t,
            (1.0 - t) + 1.0 * t,
        )
    }

    fn assert_color_close(a: Color, b: Color, tol: f32) {
        assert!(
            (a.r - b.r).abs() < tol && (a.g - b.g).abs() < tol && (a.b - b.b).abs() < tol,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn test_sky_gradient() {
        let up = Ray::new(Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0)).unwrap();
        assert_color_close(sky_color(&up), Color::rgb(0.5, 0.7, 1.0), 1e-6);

        let down = Ray::new(Vec3::ZERO, Vec3::NEG_Y).unwrap();
        assert_color_close(sky_color(&down), Color::WHITE, 1e-6);

        let horizon = Ray::new(Vec3::ZERO, Vec3::NEG_Z).unwrap();
        assert_color_close(sky_color(&horizon), Color::rgb(0.75, 0.85, 1.0), 1e-6);
    }

    #[test]
    fn test_trace_miss_matches_closed_form() {
        let scene = Scene::demo();
        let config = RenderConfig::default();
        let mut rng = StdRng::seed_from_u64(5);

        for direction in [
            Vec3::new(0.0, 1.0, 0.2),
            Vec3::new(0.3, 0.4, 1.0),
            Vec3::new(-2.0, 0.1, 5.0),
        ] {
            let ray = Ray::new(Vec3::ZERO, direction).unwrap();
            let color = trace(&ray, &scene, 0, &config, &mut rng);
            assert_color_close(color, closed_form_sky(direction), 1e-6);
            assert_eq!(color.a, 1.0);
        }
    }

    #[test]
    fn test_trace_at_max_depth_skips_intersection() {
        let scene = Scene::new().with_sphere(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Material::metal(Color::BLACK),
        ));
        let config = RenderConfig::default();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z).unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        // Would be black if the sphere were consulted
        let color = trace(&ray, &scene, config.max_depth, &config, &mut rng);
        assert_color_close(color, closed_form_sky(Vec3::NEG_Z), 1e-6);

        let color = trace(&ray, &scene, 0, &config, &mut rng);
        assert_color_close(color, Color::BLACK, 1e-6);
    }

    #[test]
    fn test_trace_terminates_between_facing_mirrors() {
        let mirror = Material::metal(Color::WHITE);
        let scene = Scene::new()
            .with_sphere(Sphere::new(Vec3::new(0.0, 0.0, -2.0), 1.0, mirror))
            .with_sphere(Sphere::new(Vec3::new(0.0, 0.0, 2.0), 1.0, mirror));
        let config = RenderConfig {
            max_depth: 100,
            ..RenderConfig::default()
        };
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z).unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        // The ray bounces along the z axis until the depth cap sends it to the sky
        let color = trace(&ray, &scene, 0, &config, &mut rng);
        assert_color_close(color, Color::rgb(0.75, 0.85, 1.0), 1e-5);
    }

    #[test]
    fn test_metal_absorption_is_black() {
        let scene = Scene::new().with_sphere(Sphere::new(
            Vec3::ZERO,
            1.0,
            Material::metal(Color::WHITE),
        ));
        let config = RenderConfig::default();
        let mut rng = StdRng::seed_from_u64(5);

        // From inside, the reflection points back inward
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.3, 0.5, -1.0)).unwrap();
        assert_eq!(trace(&ray, &scene, 0, &config, &mut rng), Color::BLACK);
    }

    #[test]
    fn test_diffuse_attenuates() {
        let scene = Scene::new().with_sphere(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Material::lambertian(Color::rgb(0.5, 0.5, 0.5)),
        ));
        let config = RenderConfig::default();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z).unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..50 {
            let color = trace(&ray, &scene, 0, &config, &mut rng);
            // One bounce at least: half of some sky color
            assert!(color.r <= 0.5 + 1e-6 && color.r >= 0.25 - 1e-6, "{color:?}");
            assert!(color.b <= 0.5 + 1e-6);
        }
    }

    #[test]
    fn test_integrate_pixel_hits_sphere() {
        let scene = Scene::new().with_sphere(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Material::lambertian(Color::rgb(0.5, 0.5, 0.5)),
        ));
        let config = small_config(10, 10, 8);
        let camera = config.camera().unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        // Center pixel looks straight at the sphere
        let color = integrate_pixel(&camera, &scene, 5, 5, &config, &mut rng);
        assert_eq!(color.a, 1.0);
        // sqrt of at most half the brightest sky
        assert!(color.b > 0.0 && color.b <= 0.5f32.sqrt() + 1e-5, "{color:?}");
    }

    #[test]
    fn test_empty_scene_is_pure_gradient() {
        let config = small_config(32, 16, 16);
        let camera = config.camera().unwrap();
        let image = render(&camera, &Scene::new(), &config).unwrap();

        for y in 0..config.height {
            for x in 0..config.width {
                let u = (x as f32 + 0.5) / config.width as f32;
                let v = (y as f32 + 0.5) / config.height as f32;
                let center = camera.generate_ray(u, v).unwrap();
                let expected = closed_form_sky(center.direction()).sqrt();

                let pixel = image.get(x, y).unwrap();
                assert_color_close(pixel, expected, 0.02);
                assert_eq!(pixel.a, 1.0);
            }
        }

        // Bluer toward the top
        let mid = config.width / 2;
        for y in 1..config.height {
            let below = image.get(mid, y - 1).unwrap();
            let above = image.get(mid, y).unwrap();
            assert!(above.r < below.r, "row {y}: {above:?} vs {below:?}");
        }
    }

    #[test]
    fn test_render_is_deterministic_across_thread_counts() {
        let config = small_config(24, 12, 4);
        let camera = config.camera().unwrap();
        let scene = Scene::demo();

        let parallel = render(&camera, &scene, &config).unwrap();
        let single = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .build()
            .unwrap()
            .install(|| render(&camera, &scene, &config).unwrap());

        assert_eq!(parallel.pixels(), single.pixels());

        let reseeded = render(&camera, &scene, &RenderConfig { seed: 1, ..config.clone() }).unwrap();
        assert_ne!(parallel.pixels(), reseeded.pixels());
    }

    #[test]
    fn test_more_samples_reduce_variance() {
        let scene = Scene::demo();
        let camera = small_config(16, 16, 1).camera().unwrap();

        let variance = |samples: u32| {
            let config = small_config(16, 16, samples);
            let values: Vec<f32> = (0..24)
                .map(|seed| {
                    let mut rng = StdRng::seed_from_u64(seed);
                    integrate_pixel(&camera, &scene, 7, 5, &config, &mut rng).r
                })
                .collect();
            let mean = values.iter().sum::<f32>() / values.len() as f32;
            values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / values.len() as f32
        };

        let few = variance(2);
        let many = variance(64);
        assert!(many < few, "variance with 64 spp ({many}) not below 2 spp ({few})");
    }

    #[test]
    fn test_render_rejects_invalid_config() {
        let config = RenderConfig {
            samples_per_pixel: 0,
            ..RenderConfig::default()
        };
        let camera = Camera::new();
        assert!(matches!(
            render(&camera, &Scene::new(), &config),
            Err(RenderError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_render_rejects_uninitialized_camera() {
        let config = small_config(8, 4, 2);
        let camera = Camera::new().with_resolution(8, 4);
        assert!(matches!(
            render(&camera, &Scene::new(), &config),
            Err(RenderError::CameraNotInitialized)
        ));
    }

    #[test]
    fn test_render_rejects_camera_resolution_mismatch() {
        let config = small_config(8, 4, 2);
        let camera = small_config(2, 2, 2).camera().unwrap();
        assert!(matches!(
            render(&camera, &Scene::new(), &config),
            Err(RenderError::CameraMismatch {
                camera_width: 2,
                camera_height: 2,
                width: 8,
                height: 4,
            })
        ));

        let image = render(&config.camera().unwrap(), &Scene::new(), &config).unwrap();
        assert_eq!((image.width(), image.height()), (8, 4));
    }

    #[test]
    fn test_failed_camera_rays_count_as_black() {
        let config = small_config(8, 4, 4);
        // Never initialized, so every viewport direction is zero
        let camera = Camera::new().with_resolution(8, 4);
        let mut rng = StdRng::seed_from_u64(3);

        let color = integrate_pixel(&camera, &Scene::new(), 2, 1, &config, &mut rng);
        assert_eq!(color, Color::BLACK);
    }

    #[test]
    fn test_config_json() {
        let config = RenderConfig::from_json_str(r#"{ "width": 64, "samples_per_pixel": 9 }"#).unwrap();
        assert_eq!(config.width, 64);
        assert_eq!(config.samples_per_pixel, 9);
        // Unspecified fields keep their defaults
        assert_eq!(config.height, 240);
        assert_eq!(config.max_depth, 100);
        assert_eq!(config.t_min, 0.001);

        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(RenderConfig::from_json_str(&json).unwrap(), config);

        assert!(matches!(
            RenderConfig::from_json_str(r#"{ "bucket_size": 0 }"#),
            Err(RenderError::InvalidConfig(_))
        ));
        assert!(matches!(
            RenderConfig::from_json_str("{ not json"),
            Err(RenderError::Json(_))
        ));
    }

    #[test]
    fn test_config_camera_uses_resolution() {
        let config = small_config(20, 10, 1);
        let camera = config.camera().unwrap();
        assert_eq!(camera.image_width, 20);
        assert_eq!(camera.image_height, 10);
    }
}
