//! Random sampling helpers.
//!
//! Every function takes the caller's generator. Each render bucket owns its
//! own `StdRng`, so nothing here touches shared state.

use orb_math::Vec3;
use rand::{Rng, RngCore};

/// Upper bound on rejection-sampling draws before falling back.
///
/// A draw is accepted with probability pi/6 (about 0.52), so 64 failures in a
/// row only happen with a broken generator.
pub const MAX_REJECTION_ATTEMPTS: usize = 64;

/// Uniform sample in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform point inside the unit ball, by rejection sampling.
///
/// Returns the origin if no candidate is accepted within
/// [`MAX_REJECTION_ATTEMPTS`] draws.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    for _ in 0..MAX_REJECTION_ATTEMPTS {
        let p = Vec3::new(
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }

    log::warn!(
        "Unit sphere rejection sampling gave up after {} attempts",
        MAX_REJECTION_ATTEMPTS
    );
    Vec3::ZERO
}
