//! Hit record for ray-sphere intersection.

use crate::Material;
use orb_math::Vec3;

/// Record of a ray-object intersection.
///
/// Produced fresh for every query and consumed right away by the tracer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Unit surface normal, pointing from the sphere center to `point`
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: Material,
}
