//! The sphere list and nearest-hit queries against it.

use crate::{Hit, Material, Ray, Sphere};
use orb_math::{Color, Interval, Vec3};

/// An ordered, render-time immutable list of spheres.
///
/// Every query scans all spheres; there is no acceleration structure.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    spheres: Vec<Sphere>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in scene: a large ground sphere with a diffuse and a metal
    /// sphere resting near the camera's line of sight.
    pub fn demo() -> Self {
        Self::new()
            .with_sphere(Sphere::new(
                Vec3::new(0.0, -7.5, -1.5),
                7.0,
                Material::lambertian(Color::rgb(0.5, 0.5, 0.5)),
            ))
            .with_sphere(Sphere::new(
                Vec3::new(0.0, 0.0, -1.0),
                0.5,
                Material::lambertian(Color::rgb(0.7, 0.3, 0.3)),
            ))
            .with_sphere(Sphere::new(
                Vec3::new(0.5, 0.0, -1.5),
                0.5,
                Material::metal(Color::rgb(0.8, 0.6, 0.2)),
            ))
    }

    /// Add a sphere, builder style.
    pub fn with_sphere(mut self, sphere: Sphere) -> Self {
        self.spheres.push(sphere);
        self
    }

    /// Add a sphere to the list.
    pub fn push(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    /// Get the number of spheres.
    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    /// Find the closest intersection with `t > t_min` across all spheres.
    pub fn find_nearest_hit(&self, ray: &Ray, t_min: f32) -> Option<Hit> {
        let mut ray_t = Interval::above(t_min);
        let mut closest: Option<(f32, &Sphere)> = None;

        for sphere in &self.spheres {
            if let Some(t) = sphere.intersect(ray, ray_t) {
                ray_t = ray_t.with_max(t);
                closest = Some((t, sphere));
            }
        }

        closest.map(|(t, sphere)| sphere.hit_at(ray, t))
    }
}

impl FromIterator<Sphere> for Scene {
    fn from_iter<I: IntoIterator<Item = Sphere>>(iter: I) -> Self {
        Self {
            spheres: iter.into_iter().collect(),
        }
    }
}
