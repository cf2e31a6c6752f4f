//! Small vector and easing helpers used by the wind update.

use std::ops::{Add, Div, DivAssign, Mul, MulAssign, Sub};

/// A wind vector in the consumer's coordinate system.
///
/// Wind lives on the horizontal plane, so `y` stays at zero during a
/// simulation. It is kept so the vector maps directly onto a 3D consumer.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct WindVector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WindVector {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// Canonical reference axis, used as the calm direction.
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    /// Returns the unit vector, or the zero vector when the length is zero.
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len == 0.0 { Self::ZERO } else { *self / len }
    }
}

impl Add for WindVector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for WindVector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for WindVector {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f32> for WindVector {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl MulAssign<f32> for WindVector {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl DivAssign<f32> for WindVector {
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}

/// Linear interpolation `a + (b - a) * t`, component-wise for vectors.
pub fn mix<T, A>(a: T, b: T, t: A) -> T
where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<A, Output = T>,
{
    a + (b - a) * t
}

/// Saturates `value` into `[lo, hi]`.
///
/// Unlike [`f32::clamp`] this never panics on inverted or NaN bounds; the
/// upper bound wins when `lo > hi`.
pub fn saturate(value: f32, lo: f32, hi: f32) -> f32 {
    value.max(lo).min(hi)
}

/// Cubic ease `3x² - 2x³` over `x` clamped to `[0, 1]`.
///
/// First derivative is zero at both ends, so blends start and stop without
/// a visible snap.
pub fn smoothstep(x: f32) -> f32 {
    let t = x.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Edge form of [`smoothstep`]: maps `value` from `[edge0, edge1]` onto the
/// ease curve. Requires `edge0 < edge1`.
pub fn smoothstep_between(edge0: f32, edge1: f32, value: f32) -> f32 {
    let v = saturate(value, edge0, edge1);
    smoothstep((v - edge0) / (edge1 - edge0))
}
