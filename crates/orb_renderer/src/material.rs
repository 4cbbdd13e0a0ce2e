//! Surface materials and scattering.
//!
//! The set of materials is closed: a sphere is either diffuse (Lambertian)
//! or a perfect mirror (Metal).

use crate::sampling::random_in_unit_sphere;
use crate::{Hit, Ray};
use orb_math::{Color, Vec3};
use rand::RngCore;

/// Scatter directions shorter than this are treated as degenerate.
const DEGENERATE_DIRECTION_SQ: f32 = 1e-8;

/// Outcome of a ray scattering off a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    /// Color filter applied to light arriving along `scattered`
    pub attenuation: Color,
    /// The outgoing ray
    pub scattered: Ray,
}

/// Material attached to a sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Diffuse surface; bounces toward a random point around the normal.
    Lambertian { albedo: Color },
    /// Mirror surface; reflects about the normal.
    Metal { albedo: Color },
}

impl Material {
    /// Create a Lambertian material with the given albedo color.
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian { albedo }
    }

    /// Create a Metal material with the given albedo color.
    pub fn metal(albedo: Color) -> Self {
        Material::Metal { albedo }
    }

    /// The material's albedo.
    pub fn albedo(&self) -> Color {
        match *self {
            Material::Lambertian { albedo } | Material::Metal { albedo } => albedo,
        }
    }

    /// Scatter an incoming ray.
    ///
    /// Returns the attenuation and scattered ray, or `None` if the ray is
    /// absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        hit: &Hit,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match *self {
            Material::Lambertian { albedo } => {
                let mut direction = hit.normal + random_in_unit_sphere(rng);

                // Catch degenerate scatter direction
                if direction.length_squared() < DEGENERATE_DIRECTION_SQ {
                    direction = hit.normal;
                }

                let scattered = Ray::new(hit.point, direction).ok()?;
                Some(ScatterResult {
                    attenuation: albedo,
                    scattered,
                })
            }
            Material::Metal { albedo } => {
                let direction = reflect(ray_in.direction(), hit.normal);

                // Only scatter if the reflected ray leaves on the normal's side
                if direction.dot(hit.normal) <= 0.0 {
                    return None;
                }

                let scattered = Ray::new(hit.point, direction).ok()?;
                Some(ScatterResult {
                    attenuation: albedo,
                    scattered,
                })
            }
        }
    }
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}
