use glam::{DMat3, DQuat, DVec3};
use psurf_core::error::ensure_len;
use psurf_core::Result;
use serde::{Deserialize, Serialize};

use crate::{Euler, EulerOrder, Matrix3, Matrix4, Vector3};

/// A rotation quaternion `(x, y, z, w)` with `w` the scalar part.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quaternion {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn set(&mut self, x: f64, y: f64, z: f64, w: f64) -> &mut Self {
        *self = Self::new(x, y, z, w);
        self
    }

    /// Rotation of `angle` radians about `axis`. A zero axis yields identity.
    pub fn from_axis_angle(axis: &Vector3, angle: f64) -> Self {
        let axis = axis.normalized();
        if axis.length_squared() == 0.0 {
            return Self::IDENTITY;
        }
        DQuat::from_axis_angle(axis.into(), angle).into()
    }

    /// Rotation taking direction `from` onto direction `to`.
    pub fn from_unit_vectors(from: &Vector3, to: &Vector3) -> Self {
        let from: DVec3 = from.normalized().into();
        let to: DVec3 = to.normalized().into();
        if from == DVec3::ZERO || to == DVec3::ZERO {
            return Self::IDENTITY;
        }
        DQuat::from_rotation_arc(from, to).into()
    }

    /// Rotation part of `m`; the upper 3x3 is assumed to be unscaled.
    pub fn from_rotation_matrix(m: &Matrix4) -> Self {
        let upper: DMat3 = Matrix3::from_matrix4(m).into();
        DQuat::from_mat3(&upper).into()
    }

    /// Intrinsic rotation for every [`EulerOrder`].
    pub fn from_euler(euler: &Euler) -> Self {
        let (s1, c1) = (euler.x / 2.0).sin_cos();
        let (s2, c2) = (euler.y / 2.0).sin_cos();
        let (s3, c3) = (euler.z / 2.0).sin_cos();

        let (x, y, z, w) = match euler.order {
            EulerOrder::XYZ => (
                s1 * c2 * c3 + c1 * s2 * s3,
                c1 * s2 * c3 - s1 * c2 * s3,
                c1 * c2 * s3 + s1 * s2 * c3,
                c1 * c2 * c3 - s1 * s2 * s3,
            ),
            EulerOrder::YXZ => (
                s1 * c2 * c3 + c1 * s2 * s3,
                c1 * s2 * c3 - s1 * c2 * s3,
                c1 * c2 * s3 - s1 * s2 * c3,
                c1 * c2 * c3 + s1 * s2 * s3,
            ),
            EulerOrder::ZXY => (
                s1 * c2 * c3 - c1 * s2 * s3,
                c1 * s2 * c3 + s1 * c2 * s3,
                c1 * c2 * s3 + s1 * s2 * c3,
                c1 * c2 * c3 - s1 * s2 * s3,
            ),
            EulerOrder::ZYX => (
                s1 * c2 * c3 - c1 * s2 * s3,
                c1 * s2 * c3 + s1 * c2 * s3,
                c1 * c2 * s3 - s1 * s2 * c3,
                c1 * c2 * c3 + s1 * s2 * s3,
            ),
            EulerOrder::YZX => (
                s1 * c2 * c3 + c1 * s2 * s3,
                c1 * s2 * c3 + s1 * c2 * s3,
                c1 * c2 * s3 - s1 * s2 * c3,
                c1 * c2 * c3 - s1 * s2 * s3,
            ),
            EulerOrder::XZY => (
                s1 * c2 * c3 - c1 * s2 * s3,
                c1 * s2 * c3 - s1 * c2 * s3,
                c1 * c2 * s3 + s1 * s2 * c3,
                c1 * c2 * c3 + s1 * s2 * s3,
            ),
        };
        Self::new(x, y, z, w)
    }

    pub fn set_from_axis_angle(&mut self, axis: &Vector3, angle: f64) -> &mut Self {
        *self = Self::from_axis_angle(axis, angle);
        self
    }

    pub fn set_from_euler(&mut self, euler: &Euler) -> &mut Self {
        *self = Self::from_euler(euler);
        self
    }

    pub fn set_from_rotation_matrix(&mut self, m: &Matrix4) -> &mut Self {
        *self = Self::from_rotation_matrix(m);
        self
    }

    pub fn set_from_unit_vectors(&mut self, from: &Vector3, to: &Vector3) -> &mut Self {
        *self = Self::from_unit_vectors(from, to);
        self
    }

    /// `self = self * q`
    pub fn multiply(&mut self, q: &Self) -> &mut Self {
        *self = (DQuat::from(*self) * DQuat::from(*q)).into();
        self
    }

    /// `self = q * self`
    pub fn premultiply(&mut self, q: &Self) -> &mut Self {
        *self = (DQuat::from(*q) * DQuat::from(*self)).into();
        self
    }

    pub fn conjugate(&mut self) -> &mut Self {
        self.x = -self.x;
        self.y = -self.y;
        self.z = -self.z;
        self
    }

    /// Inverse of a unit quaternion.
    pub fn invert(&mut self) -> &mut Self {
        self.conjugate()
    }

    pub fn dot(&self, q: &Self) -> f64 {
        self.x * q.x + self.y * q.y + self.z * q.z + self.w * q.w
    }

    pub fn length_squared(&self) -> f64 {
        self.dot(self)
    }

    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Scale to unit length. A zero quaternion becomes identity.
    pub fn normalize(&mut self) -> &mut Self {
        let len = self.length();
        if len == 0.0 {
            *self = Self::IDENTITY;
            return self;
        }
        let inv = 1.0 / len;
        self.set(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
    }

    /// Angle in radians of the rotation between `self` and `q`.
    pub fn angle_to(&self, q: &Self) -> f64 {
        2.0 * self.dot(q).abs().clamp(-1.0, 1.0).acos()
    }

    /// Rotate towards `q` by at most `step` radians.
    pub fn rotate_towards(&mut self, q: &Self, step: f64) -> &mut Self {
        let angle = self.angle_to(q);
        if angle == 0.0 {
            return self;
        }
        let t = (step / angle).min(1.0);
        self.slerp(q, t)
    }

    pub fn slerp(&mut self, q: &Self, t: f64) -> &mut Self {
        if t == 0.0 {
            return self;
        }
        if t == 1.0 {
            *self = *q;
            return self;
        }
        *self = DQuat::from(*self).slerp(DQuat::from(*q), t).into();
        self
    }

    pub fn equals(&self, q: &Self, eps: f64) -> bool {
        use psurf_core::tolerance::equals;
        equals(self.x, q.x, eps)
            && equals(self.y, q.y, eps)
            && equals(self.z, q.z, eps)
            && equals(self.w, q.w, eps)
    }

    /// `q` and `-q` describe the same rotation.
    pub fn equals_rotation(&self, q: &Self, eps: f64) -> bool {
        let negated = Self::new(-q.x, -q.y, -q.z, -q.w);
        self.equals(q, eps) || self.equals(&negated, eps)
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    pub fn from_array(array: &[f64], offset: usize) -> Result<Self> {
        ensure_len(array.len(), offset + 4)?;
        Ok(Self::new(
            array[offset],
            array[offset + 1],
            array[offset + 2],
            array[offset + 3],
        ))
    }

    pub fn dump(&self) -> serde_json::Value {
        crate::serial::dump(self)
    }

    pub fn load(value: &serde_json::Value) -> Result<Self> {
        crate::serial::load(value)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for Quaternion {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, psurf_core::EPSILON)
    }
}

impl From<DQuat> for Quaternion {
    fn from(q: DQuat) -> Self {
        Self::new(q.x, q.y, q.z, q.w)
    }
}

impl From<Quaternion> for DQuat {
    fn from(q: Quaternion) -> Self {
        DQuat::from_xyzw(q.x, q.y, q.z, q.w)
    }
}

impl approx::AbsDiffEq for Quaternion {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        psurf_core::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.equals(other, epsilon)
    }
}
