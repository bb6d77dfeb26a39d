use glam::DVec4;
use serde::{Deserialize, Serialize};

use crate::Matrix4;

/// A 4D vector (homogeneous coordinates).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vector4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl_vector_common!(Vector4, 4, [x, y, z, w]);

impl Vector4 {
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    pub fn set(&mut self, x: f64, y: f64, z: f64, w: f64) -> &mut Self {
        *self = Self::new(x, y, z, w);
        self
    }

    pub fn apply_matrix4(&mut self, m: &Matrix4) -> &mut Self {
        let e = &m.elements;
        let (x, y, z, w) = (self.x, self.y, self.z, self.w);
        self.set(
            e[0] * x + e[4] * y + e[8] * z + e[12] * w,
            e[1] * x + e[5] * y + e[9] * z + e[13] * w,
            e[2] * x + e[6] * y + e[10] * z + e[14] * w,
            e[3] * x + e[7] * y + e[11] * z + e[15] * w,
        )
    }
}

impl From<DVec4> for Vector4 {
    fn from(v: DVec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Vector4> for DVec4 {
    fn from(v: Vector4) -> Self {
        DVec4::new(v.x, v.y, v.z, v.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vector3;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_apply_matrix4_keeps_w() {
        let m = Matrix4::from_translation(&Vector3::new(1.0, 0.0, 0.0));
        let mut point = Vector4::new(1.0, 1.0, 1.0, 1.0);
        point.apply_matrix4(&m);
        assert_abs_diff_eq!(point, Vector4::new(2.0, 1.0, 1.0, 1.0));

        let mut direction = Vector4::new(1.0, 1.0, 1.0, 0.0);
        direction.apply_matrix4(&m);
        assert_abs_diff_eq!(direction, Vector4::new(1.0, 1.0, 1.0, 0.0));
    }

    #[test]
    fn test_length_and_normalize() {
        let mut v = Vector4::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(v.length(), 2.0);
        v.normalize();
        assert_abs_diff_eq!(v.length(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_glam_round_trip() {
        let v = Vector4::new(1.0, 2.0, 3.0, 4.0);
        let g: DVec4 = v.into();
        assert_eq!(g, DVec4::new(1.0, 2.0, 3.0, 4.0));
        assert_abs_diff_eq!(Vector4::from(g), v);
    }
}
