use std::f64::consts::TAU;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::Matrix3;

/// A 2D vector, also used for `(u, v)` surface parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl_vector_common!(Vector2, 2, [x, y]);

impl Vector2 {
    pub const X: Self = Self::new(1.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn set(&mut self, x: f64, y: f64) -> &mut Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Scalar (z-component) cross product.
    pub fn cross(&self, other: &Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Angle of the vector against +X, in `[0, 2*PI)`.
    pub fn angle(&self) -> f64 {
        let a = self.y.atan2(self.x);
        if a < 0.0 {
            a + TAU
        } else {
            a
        }
    }

    pub fn rotate_around(&mut self, center: &Self, angle: f64) -> &mut Self {
        let (s, c) = angle.sin_cos();
        let x = self.x - center.x;
        let y = self.y - center.y;
        self.set(x * c - y * s + center.x, x * s + y * c + center.y)
    }

    /// Transform as a homogeneous 2D point.
    pub fn apply_matrix3(&mut self, m: &Matrix3) -> &mut Self {
        let e = &m.elements;
        let (x, y) = (self.x, self.y);
        self.set(e[0] * x + e[3] * y + e[6], e[1] * x + e[4] * y + e[7])
    }
}

impl From<DVec2> for Vector2 {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector2> for DVec2 {
    fn from(v: Vector2) -> Self {
        DVec2::new(v.x, v.y)
    }
}
