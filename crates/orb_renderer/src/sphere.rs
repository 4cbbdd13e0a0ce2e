//! Sphere primitive for ray tracing.

use crate::{Hit, Material, Ray};
use orb_math::{Interval, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> Material {
        self.material
    }

    /// Find the smallest root of `|O + tD - C|^2 = r^2` strictly inside `ray_t`.
    ///
    /// Returns `None` when the ray misses, when both roots fall outside the
    /// interval, or when the sphere itself is degenerate (non-positive or
    /// non-finite radius).
    pub fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        if !(self.radius > 0.0) || !self.radius.is_finite() {
            return None;
        }

        let oc = ray.origin() - self.center;
        let d = ray.direction();
        let a = d.dot(d);
        // Ray::new rules this out; keep 0/0 out of the solve regardless
        if !(a > 0.0) || !a.is_finite() {
            log::trace!("Skipping sphere test for degenerate direction {}", d);
            return None;
        }
        let b = 2.0 * d.dot(oc);
        let c = oc.dot(oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let near = (-b - sqrtd) / (2.0 * a);
        if ray_t.surrounds(near) {
            return Some(near);
        }
        let far = (-b + sqrtd) / (2.0 * a);
        if ray_t.surrounds(far) {
            return Some(far);
        }

        None
    }

    /// Build the hit record for a root returned by [`Sphere::intersect`].
    pub fn hit_at(&self, ray: &Ray, t: f32) -> Hit {
        let point = ray.at(t);
        Hit {
            t,
            point,
            normal: (point - self.center).normalize(),
            material: self.material,
        }
    }
}
