//! Orb Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for scenes made of spheres lit by a sky
//! gradient. Diffuse and mirror materials, jittered supersampling and
//! bucketed parallel rendering.

mod error;
mod ray;
mod hittable;
mod material;
mod sphere;
mod scene;
mod camera;
mod renderer;
mod bucket;
mod framebuffer;
pub mod sampling;

pub use error::{RenderError, RenderResult};
pub use ray::Ray;
pub use hittable::Hit;
pub use material::{reflect, Material, ScatterResult};
pub use sphere::Sphere;
pub use scene::Scene;
pub use camera::Camera;
pub use renderer::{integrate_pixel, render, sky_color, trace, RenderConfig};
pub use bucket::{bucket_rng, generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use framebuffer::Framebuffer;

/// Re-export Vec3 and common math types from orb_math
pub use orb_math::{color_to_vec3, vec3_to_color, Color, Interval, Vec3};
