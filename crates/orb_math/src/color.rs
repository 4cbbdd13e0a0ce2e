//! RGBA radiance color.
//!
//! `Color` is numerically close to `Vec3` but kept as its own type: values are
//! unnormalized radiance and carry an alpha channel. Conversions to and from
//! `Vec3` copy fields explicitly.

use std::ops::{Add, AddAssign, Div, Mul};

use crate::{Interval, Vec3};

/// Linear RGBA color with unbounded float channels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    /// Opaque white.
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    /// Create a color from all four channels.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Opaque color from a vector's components.
    #[inline]
    pub fn from_vec3(v: Vec3) -> Self {
        Self::rgb(v.x, v.y, v.z)
    }

    /// RGB channels as a vector. Alpha is dropped.
    #[inline]
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    /// Component-wise square root of the RGB channels.
    ///
    /// Used as the display transform (gamma 2). Negative channels map to 0.
    pub fn sqrt(self) -> Self {
        Self::new(
            self.r.max(0.0).sqrt(),
            self.g.max(0.0).sqrt(),
            self.b.max(0.0).sqrt(),
            self.a,
        )
    }

    /// The same color with the given alpha.
    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Linear interpolation of the RGB channels, alpha taken from `self`.
    pub fn lerp(self, other: Color, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a,
        )
    }

    /// Quantize to 8-bit RGBA, clamping each channel to [0, 1].
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(self.a),
        ]
    }
}

/// Channel range written to 8-bit output.
const DISPLAY_RANGE: Interval = Interval { min: 0.0, max: 1.0 };

#[inline]
fn quantize(c: f32) -> u8 {
    (DISPLAY_RANGE.clamp(c) * 255.0) as u8
}

/// Copy a color's RGB channels into a vector.
#[inline]
pub fn color_to_vec3(c: Color) -> Vec3 {
    c.to_vec3()
}

/// Build an opaque color from a vector.
#[inline]
pub fn vec3_to_color(v: Vec3) -> Color {
    Color::from_vec3(v)
}

impl From<Vec3> for Color {
    fn from(v: Vec3) -> Self {
        Color::from_vec3(v)
    }
}

impl From<Color> for Vec3 {
    fn from(c: Color) -> Self {
        c.to_vec3()
    }
}

// Arithmetic acts on RGB; alpha follows the left-hand operand.

impl Add for Color {
    type Output = Color;

    #[inline]
    fn add(self, rhs: Color) -> Color {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b, self.a)
    }
}

impl AddAssign for Color {
    #[inline]
    fn add_assign(&mut self, rhs: Color) {
        *self = *self + rhs;
    }
}

impl Mul for Color {
    type Output = Color;

    #[inline]
    fn mul(self, rhs: Color) -> Color {
        Color::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b, self.a)
    }
}

impl Mul<f32> for Color {
    type Output = Color;

    #[inline]
    fn mul(self, rhs: f32) -> Color {
        Color::new(self.r * rhs, self.g * rhs, self.b * rhs, self.a)
    }
}

impl Mul<Color> for f32 {
    type Output = Color;

    #[inline]
    fn mul(self, rhs: Color) -> Color {
        rhs * self
    }
}

impl Div<f32> for Color {
    type Output = Color;

    #[inline]
    fn div(self, rhs: f32) -> Color {
        Color::new(self.r / rhs, self.g / rhs, self.b / rhs, self.a)
    }
}
