// Re-export glam for convenience
pub use glam::*;

// Orb math types
mod color;
mod interval;

pub use color::{color_to_vec3, vec3_to_color, Color};
pub use interval::Interval;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec3_color_bridge() {
        let v = Vec3::new(0.25, 0.5, 0.75);
        assert_eq!(color_to_vec3(vec3_to_color(v)), v);
    }
}
