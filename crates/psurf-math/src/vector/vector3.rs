use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::{Matrix3, Matrix4, Quaternion};

/// A 3D vector or point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl_vector_common!(Vector3, 3, [x, y, z]);

impl Vector3 {
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn set(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    /// Replace `self` with `self x other`.
    pub fn cross(&mut self, other: &Self) -> &mut Self {
        *self = self.crossed(other);
        self
    }

    pub fn crossed(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn apply_matrix3(&mut self, m: &Matrix3) -> &mut Self {
        let e = &m.elements;
        let (x, y, z) = (self.x, self.y, self.z);
        self.set(
            e[0] * x + e[3] * y + e[6] * z,
            e[1] * x + e[4] * y + e[7] * z,
            e[2] * x + e[5] * y + e[8] * z,
        )
    }

    /// Transform as a point (w = 1) with perspective divide.
    pub fn apply_matrix4(&mut self, m: &Matrix4) -> &mut Self {
        let e = &m.elements;
        let (x, y, z) = (self.x, self.y, self.z);
        let w = e[3] * x + e[7] * y + e[11] * z + e[15];
        let w = if w == 0.0 { 1.0 } else { 1.0 / w };
        self.set(
            (e[0] * x + e[4] * y + e[8] * z + e[12]) * w,
            (e[1] * x + e[5] * y + e[9] * z + e[13]) * w,
            (e[2] * x + e[6] * y + e[10] * z + e[14]) * w,
        )
    }

    /// Transform as a direction (w = 0) by the upper 3x3 of `m`, then normalize.
    pub fn transform_direction(&mut self, m: &Matrix4) -> &mut Self {
        let e = &m.elements;
        let (x, y, z) = (self.x, self.y, self.z);
        self.set(
            e[0] * x + e[4] * y + e[8] * z,
            e[1] * x + e[5] * y + e[9] * z,
            e[2] * x + e[6] * y + e[10] * z,
        )
        .normalize()
    }

    pub fn apply_quaternion(&mut self, q: &Quaternion) -> &mut Self {
        let rotated = glam::DQuat::from(*q) * DVec3::from(*self);
        *self = rotated.into();
        self
    }

    /// Angle in radians between `self` and `other`; zero if either is zero-length.
    pub fn angle_to(&self, other: &Self) -> f64 {
        let denominator = (self.length_squared() * other.length_squared()).sqrt();
        if denominator == 0.0 {
            return 0.0;
        }
        (self.dot(other) / denominator).clamp(-1.0, 1.0).acos()
    }

    pub fn project_on_vector(&mut self, v: &Self) -> &mut Self {
        let denominator = v.length_squared();
        if denominator == 0.0 {
            return self.set(0.0, 0.0, 0.0);
        }
        let scalar = v.dot(self) / denominator;
        *self = *v * scalar;
        self
    }

    pub fn project_on_plane(&mut self, plane_normal: &Self) -> &mut Self {
        let mut along = *self;
        along.project_on_vector(plane_normal);
        self.sub_vector(&along)
    }

    /// Reflect off the plane orthogonal to the unit `normal`.
    pub fn reflect(&mut self, normal: &Self) -> &mut Self {
        let d = 2.0 * self.dot(normal);
        self.add_scaled_vector(normal, -d)
    }
}

impl From<DVec3> for Vector3 {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for DVec3 {
    fn from(v: Vector3) -> Self {
        DVec3::new(v.x, v.y, v.z)
    }
}
