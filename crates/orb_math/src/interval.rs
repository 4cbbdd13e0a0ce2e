/// A closed range of ray parameters `[min, max]`.
///
/// Intersection code uses [`Interval::surrounds`] so that both ends are
/// excluded: `min` acts as the self-intersection guard and `max` as the
/// closest hit found so far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Everything strictly greater than `min`.
    pub fn above(min: f32) -> Self {
        Self::new(min, f32::INFINITY)
    }

    /// The same lower bound with a tighter upper bound.
    pub fn with_max(&self, max: f32) -> Self {
        Self::new(self.min, max)
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }
}
