//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that can be rendered
//! independently and in parallel using rayon. Each bucket seeds its own
//! generator from its position, so a render is reproducible no matter which
//! thread picks up which bucket.

use crate::renderer::integrate_pixel;
use crate::{Camera, RenderConfig, Scene};
use orb_math::Color;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of the bucket's bottom-left pixel
    pub x: u32,
    /// Y coordinate of the bucket's bottom-left pixel
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { x, y, width, height, index }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// Generate buckets for an image, sorted in spiral order from center.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let mut buckets = Vec::new();
    if bucket_size == 0 {
        return buckets;
    }
    let mut index = 0;

    // Generate grid of buckets
    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    // Sort by distance from center (spiral order)
    sort_spiral(&mut buckets, width, height);

    // Update indices after sorting
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from image center, nearest first.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;

    let dist = |b: &Bucket| {
        let bx = b.x as f32 + b.width as f32 / 2.0;
        let by = b.y as f32 + b.height as f32 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    buckets.sort_by(|a, b| dist(a).total_cmp(&dist(b)));
}

/// Generator for the bucket whose corner is `(x, y)`.
///
/// The base seed and the position fill the generator's key directly, so
/// each bucket gets its own stream and two different positions never share
/// a key.
pub fn bucket_rng(seed: u64, x: u32, y: u32) -> StdRng {
    let mut key = <StdRng as SeedableRng>::Seed::default();
    key[..8].copy_from_slice(&seed.to_le_bytes());
    key[8..12].copy_from_slice(&x.to_le_bytes());
    key[12..16].copy_from_slice(&y.to_le_bytes());
    StdRng::from_seed(key)
}

/// Render a single bucket to a vector of colors.
///
/// Returns pixels in row-major order within the bucket, bottom row first.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
) -> BucketResult {
    let mut rng = bucket_rng(config.seed, bucket.x, bucket.y);
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let global_x = bucket.x + local_x;
            let global_y = bucket.y + local_y;
            let color = integrate_pixel(camera, scene, global_x, global_y, config, &mut rng);
            pixels.push(color);
        }
    }

    BucketResult::new(*bucket, pixels)
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }
}
