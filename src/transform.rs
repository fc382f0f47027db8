//! Affine transforms: a 3x3 linear part plus a translation.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `T * v`
//! - `apply` multiplies by the linear part, then adds the translation
//! - Transforms chain **right-to-left**: `a.compose(b)` (or `a * b`) applies
//!   `b` first, then `a`
//!
//! # Example
//! ```ignore
//! let t = Transform::rotation_x(0.3).compose(&Transform::rotation_y(0.2));
//! let v = t.apply(vertex); // rotated about Y first, then about X
//! ```

use std::ops::Mul;

use crate::math::vec3::Vec3;

/// An affine map stored as `linear[row][col]` plus a translation column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    linear: [[f32; 3]; 3],
    translation: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn new(linear: [[f32; 3]; 3], translation: Vec3) -> Self {
        Self {
            linear,
            translation,
        }
    }

    pub fn identity() -> Self {
        Self::new(
            [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            Vec3::ZERO,
        )
    }

    /// Creates a translation.
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Self::new(Self::identity().linear, Vec3::new(x, y, z))
    }

    /// Creates a scale about the origin.
    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        Self::new([[x, 0.0, 0.0], [0.0, y, 0.0], [0.0, 0.0, z]], Vec3::ZERO)
    }

    /// Creates a rotation about the X axis (radians).
    pub fn rotation_x(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self::new([[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]], Vec3::ZERO)
    }

    /// Creates a rotation about the Y axis (radians).
    pub fn rotation_y(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self::new([[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]], Vec3::ZERO)
    }

    /// Returns the transform equivalent to applying `other` first, then `self`.
    pub fn compose(&self, other: &Transform) -> Transform {
        let mut linear = [[0.0f32; 3]; 3];
        for (row, out) in linear.iter_mut().enumerate() {
            for (col, cell) in out.iter_mut().enumerate() {
                *cell = self.linear[row][0] * other.linear[0][col]
                    + self.linear[row][1] * other.linear[1][col]
                    + self.linear[row][2] * other.linear[2][col];
            }
        }
        // self(other(v)) = L_s (L_o v + t_o) + t_s
        let translation = self.apply_linear(other.translation) + self.translation;
        Transform::new(linear, translation)
    }

    /// Applies the linear part, then adds the translation.
    pub fn apply(&self, v: Vec3) -> Vec3 {
        self.apply_linear(v) + self.translation
    }

    /// Applies the linear part only.
    fn apply_linear(&self, v: Vec3) -> Vec3 {
        let m = &self.linear;
        Vec3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }
}

/// Composition: `a * b` applies `b` first, then `a`.
impl Mul<Transform> for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Self::Output {
        self.compose(&rhs)
    }
}

/// Transform a point.
impl Mul<Vec3> for Transform {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Self::Output {
        self.apply(v)
    }
}
