//! Ray type for path tracing.
//!
//! A ray is a half-line `origin + t * direction`. The direction is not
//! normalized, but it is never zero: intersection solves a quadratic whose
//! leading coefficient is `direction · direction`.

use crate::{RenderError, RenderResult};
use orb_math::Vec3;

/// A ray with origin and a non-degenerate direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Origin point of the ray
    origin: Vec3,
    /// Direction vector (not necessarily normalized, never zero)
    direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    ///
    /// Fails with [`RenderError::DegenerateRay`] when the direction has zero
    /// length or non-finite components.
    pub fn new(origin: Vec3, direction: Vec3) -> RenderResult<Self> {
        let len_sq = direction.length_squared();
        if !direction.is_finite() || !(len_sq > 0.0) || !len_sq.is_finite() {
            return Err(RenderError::DegenerateRay { direction });
        }

        Ok(Self { origin, direction })
    }

    /// Get the ray's origin point.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the ray's direction vector.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Compute a point along the ray at parameter t.
    /// P(t) = origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}
