//! Camera for ray generation.
//!
//! A planar viewport one unit in front of the camera along -Z. The viewport
//! width is configurable and its height follows the image aspect ratio.

use crate::{Ray, RenderError, RenderResult};
use orb_math::Vec3;

/// Camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning
    origin: Vec3,
    viewport_width: f32,

    // Cached computed values (set by initialize())
    bottom_left: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    initialized: bool,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            image_width: 480,
            image_height: 240,
            origin: Vec3::ZERO,
            viewport_width: 4.0,
            // Cached values (initialized to defaults)
            bottom_left: Vec3::ZERO,
            horizontal: Vec3::ZERO,
            vertical: Vec3::ZERO,
            initialized: false,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self.initialized = false;
        self
    }

    /// Set the width of the viewport plane in world units.
    pub fn with_viewport_width(mut self, viewport_width: f32) -> Self {
        self.viewport_width = viewport_width;
        self.initialized = false;
        self
    }

    /// Set camera position.
    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self.initialized = false;
        self
    }

    /// Initialize the camera (must be called before generating rays).
    pub fn initialize(&mut self) -> RenderResult<()> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(RenderError::InvalidResolution {
                width: self.image_width,
                height: self.image_height,
            });
        }
        if !(self.viewport_width > 0.0) || !self.viewport_width.is_finite() {
            return Err(RenderError::InvalidViewport(self.viewport_width));
        }

        let aspect_ratio = self.image_width as f32 / self.image_height as f32;
        let viewport_height = self.viewport_width / aspect_ratio;

        self.horizontal = Vec3::new(self.viewport_width, 0.0, 0.0);
        self.vertical = Vec3::new(0.0, viewport_height, 0.0);
        self.bottom_left = self.origin - self.horizontal / 2.0 - self.vertical / 2.0 - Vec3::Z;
        self.initialized = true;

        Ok(())
    }

    /// True once `initialize()` has succeeded for the current settings.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Generate a ray through the normalized viewport coordinate `(u, v)`.
    ///
    /// `(0, 0)` is the bottom-left corner of the viewport, `(1, 1)` the top
    /// right.
    pub fn generate_ray(&self, u: f32, v: f32) -> RenderResult<Ray> {
        let target = self.bottom_left + u * self.horizontal + v * self.vertical;
        Ray::new(self.origin, target - self.origin)
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
