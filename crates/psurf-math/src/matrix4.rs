use glam::{DMat3, DMat4, DQuat, DVec3};
use psurf_core::error::ensure_len;
use psurf_core::Result;
use serde::{Deserialize, Serialize};

use crate::matrix3::SINGULAR_EPSILON;
use crate::{Euler, Quaternion, Vector3};

/// A 4x4 affine/projective matrix stored column-major.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Matrix4 {
    pub elements: [f64; 16],
}

impl Matrix4 {
    pub const IDENTITY: Self = Self {
        elements: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Set from row-major arguments.
    #[allow(clippy::too_many_arguments)]
    pub fn set(
        &mut self,
        n11: f64,
        n12: f64,
        n13: f64,
        n14: f64,
        n21: f64,
        n22: f64,
        n23: f64,
        n24: f64,
        n31: f64,
        n32: f64,
        n33: f64,
        n34: f64,
        n41: f64,
        n42: f64,
        n43: f64,
        n44: f64,
    ) -> &mut Self {
        self.elements = [
            n11, n21, n31, n41, n12, n22, n32, n42, n13, n23, n33, n43, n14, n24, n34, n44,
        ];
        self
    }

    pub fn from_translation(t: &Vector3) -> Self {
        DMat4::from_translation((*t).into()).into()
    }

    fn to_glam(self) -> DMat4 {
        DMat4::from_cols_array(&self.elements)
    }

    pub fn make_translation(&mut self, t: &Vector3) -> &mut Self {
        *self = Self::from_translation(t);
        self
    }

    pub fn make_scale(&mut self, s: &Vector3) -> &mut Self {
        *self = DMat4::from_scale((*s).into()).into();
        self
    }

    /// Rotation of `angle` radians about `axis`; a zero axis yields identity.
    pub fn make_rotation_axis(&mut self, axis: &Vector3, angle: f64) -> &mut Self {
        let q = Quaternion::from_axis_angle(axis, angle);
        self.make_rotation_from_quaternion(&q)
    }

    pub fn make_rotation_from_quaternion(&mut self, q: &Quaternion) -> &mut Self {
        *self = DMat4::from_quat(DQuat::from(*q)).into();
        self
    }

    pub fn make_rotation_from_euler(&mut self, euler: &Euler) -> &mut Self {
        self.make_rotation_from_quaternion(&Quaternion::from_euler(euler))
    }

    /// Build `T * R * S`.
    pub fn compose(&mut self, position: &Vector3, rotation: &Quaternion, scale: &Vector3) -> &mut Self {
        *self = DMat4::from_scale_rotation_translation(
            (*scale).into(),
            DQuat::from(*rotation),
            (*position).into(),
        )
        .into();
        self
    }

    /// Split into `(position, rotation, scale)`.
    ///
    /// A negative determinant is folded into `scale.x`. When any axis has zero
    /// scale the rotation cannot be recovered and identity is returned for it.
    pub fn decompose(&self) -> (Vector3, Quaternion, Vector3) {
        let e = &self.elements;
        let col = |i: usize| DVec3::new(e[i * 4], e[i * 4 + 1], e[i * 4 + 2]);
        let (c0, c1, c2) = (col(0), col(1), col(2));
        let position = Vector3::new(e[12], e[13], e[14]);

        let mut sx = c0.length();
        let sy = c1.length();
        let sz = c2.length();
        if self.determinant() < 0.0 {
            sx = -sx;
        }
        let scale = Vector3::new(sx, sy, sz);

        if sx == 0.0 || sy == 0.0 || sz == 0.0 {
            log::warn!("Matrix4::decompose with zero scale axis; rotation set to identity");
            return (position, Quaternion::identity(), scale);
        }

        let rotation = DMat3::from_cols(c0 / sx, c1 / sy, c2 / sz);
        (position, DQuat::from_mat3(&rotation).normalize().into(), scale)
    }

    pub fn position(&self) -> Vector3 {
        Vector3::new(self.elements[12], self.elements[13], self.elements[14])
    }

    pub fn max_scale_on_axis(&self) -> f64 {
        let e = &self.elements;
        let sx = e[0] * e[0] + e[1] * e[1] + e[2] * e[2];
        let sy = e[4] * e[4] + e[5] * e[5] + e[6] * e[6];
        let sz = e[8] * e[8] + e[9] * e[9] + e[10] * e[10];
        sx.max(sy).max(sz).sqrt()
    }

    /// `self = self * m`
    pub fn multiply(&mut self, m: &Self) -> &mut Self {
        *self = (self.to_glam() * m.to_glam()).into();
        self
    }

    /// `self = m * self`
    pub fn premultiply(&mut self, m: &Self) -> &mut Self {
        *self = (m.to_glam() * self.to_glam()).into();
        self
    }

    pub fn multiply_scalar(&mut self, s: f64) -> &mut Self {
        for e in &mut self.elements {
            *e *= s;
        }
        self
    }

    pub fn transpose(&mut self) -> &mut Self {
        *self = self.to_glam().transpose().into();
        self
    }

    pub fn determinant(&self) -> f64 {
        self.to_glam().determinant()
    }

    /// The inverse, or `None` when the matrix is singular.
    pub fn try_inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
            return None;
        }
        Some(self.to_glam().inverse().into())
    }

    /// Invert in place. A singular matrix is left unchanged and `false` is returned.
    pub fn invert(&mut self) -> bool {
        match self.try_inverse() {
            Some(inv) => {
                *self = inv;
                true
            }
            None => {
                log::warn!("Matrix4::invert on singular matrix; left unchanged");
                false
            }
        }
    }

    pub fn equals(&self, other: &Self, eps: f64) -> bool {
        self.elements
            .iter()
            .zip(other.elements.iter())
            .all(|(a, b)| psurf_core::tolerance::equals(*a, *b, eps))
    }

    pub fn to_array(&self) -> [f64; 16] {
        self.elements
    }

    pub fn from_array(array: &[f64], offset: usize) -> Result<Self> {
        ensure_len(array.len(), offset + 16)?;
        let mut elements = [0.0; 16];
        elements.copy_from_slice(&array[offset..offset + 16]);
        Ok(Self { elements })
    }

    pub fn dump(&self) -> serde_json::Value {
        crate::serial::dump(self)
    }

    pub fn load(value: &serde_json::Value) -> Result<Self> {
        crate::serial::load(value)
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for Matrix4 {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, psurf_core::EPSILON)
    }
}

impl From<DMat4> for Matrix4 {
    fn from(m: DMat4) -> Self {
        Self {
            elements: m.to_cols_array(),
        }
    }
}

impl From<Matrix4> for DMat4 {
    fn from(m: Matrix4) -> Self {
        m.to_glam()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_3;

    #[test]
    fn test_compose_decompose_round_trip() {
        let position = Vector3::new(1.0, -2.0, 3.5);
        let rotation = Quaternion::from_axis_angle(&Vector3::new(1.0, 1.0, 0.0), FRAC_PI_3);
        let scale = Vector3::new(2.0, 0.5, 3.0);

        let mut m = Matrix4::identity();
        m.compose(&position, &rotation, &scale);
        let (p, q, s) = m.decompose();

        assert_abs_diff_eq!(p, position, epsilon = 1e-12);
        assert_abs_diff_eq!(s, scale, epsilon = 1e-12);
        assert!(q.equals_rotation(&rotation, 1e-9));
    }

    #[test]
    fn test_decompose_negative_determinant() {
        let mut m = Matrix4::identity();
        m.make_scale(&Vector3::new(-2.0, 1.0, 1.0));
        let (_, q, s) = m.decompose();
        assert_abs_diff_eq!(s, Vector3::new(-2.0, 1.0, 1.0), epsilon = 1e-12);
        assert!(q.equals_rotation(&Quaternion::identity(), 1e-9));
    }

    #[test]
    fn test_decompose_zero_scale_is_graceful() {
        let mut m = Matrix4::identity();
        m.make_scale(&Vector3::new(0.0, 1.0, 1.0));
        let (_, q, s) = m.decompose();
        assert_eq!(q, Quaternion::identity());
        assert_eq!(s.x, 0.0);
    }

    #[test]
    fn test_invert_singular_leaves_matrix_unchanged() {
        let mut m = Matrix4::identity();
        m.make_scale(&Vector3::new(1.0, 0.0, 1.0));
        let before = m.elements;
        assert!(!m.invert());
        assert_eq!(m.elements, before);
    }

    #[test]
    fn test_invert_round_trip() {
        let mut m = Matrix4::identity();
        m.compose(
            &Vector3::new(4.0, 5.0, 6.0),
            &Quaternion::from_axis_angle(&Vector3::Z, 0.7),
            &Vector3::new(1.0, 2.0, 3.0),
        );
        let mut inv = m;
        assert!(inv.invert());
        inv.multiply(&m);
        assert_eq!(inv, Matrix4::identity());
    }

    #[test]
    fn test_multiply_order() {
        let t = Matrix4::from_translation(&Vector3::new(1.0, 0.0, 0.0));
        let mut s = Matrix4::identity();
        s.make_scale(&Vector3::splat(2.0));

        // scale then translate: T * S
        let mut ts = s;
        ts.premultiply(&t);
        let mut p = Vector3::ONE;
        p.apply_matrix4(&ts);
        assert_abs_diff_eq!(p, Vector3::new(3.0, 2.0, 2.0));

        // translate then scale: S * T
        let mut st = s;
        st.multiply(&t);
        let mut p = Vector3::ONE;
        p.apply_matrix4(&st);
        assert_abs_diff_eq!(p, Vector3::new(4.0, 2.0, 2.0));
    }

    #[test]
    fn test_set_row_major_translation_column() {
        let mut m = Matrix4::identity();
        m.set(
            1.0, 0.0, 0.0, 7.0, //
            0.0, 1.0, 0.0, 8.0, //
            0.0, 0.0, 1.0, 9.0, //
            0.0, 0.0, 0.0, 1.0,
        );
        assert_abs_diff_eq!(m.position(), Vector3::new(7.0, 8.0, 9.0));
        assert_eq!(m.max_scale_on_axis(), 1.0);
    }

    #[test]
    fn test_dump_load() {
        let m = Matrix4::from_translation(&Vector3::new(1.0, 2.0, 3.0));
        let dumped = m.dump();
        assert_eq!(dumped["elements"].as_array().map(Vec::len), Some(16));
        assert_eq!(Matrix4::load(&dumped).unwrap(), m);
    }
}
