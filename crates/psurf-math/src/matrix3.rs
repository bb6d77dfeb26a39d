use glam::DMat3;
use psurf_core::error::ensure_len;
use psurf_core::Result;
use serde::{Deserialize, Serialize};

use crate::Matrix4;

/// Determinant magnitude below which a matrix is treated as singular.
pub const SINGULAR_EPSILON: f64 = 1e-15;

/// A 3x3 matrix stored column-major.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Matrix3 {
    pub elements: [f64; 9],
}

impl Matrix3 {
    pub const IDENTITY: Self = Self {
        elements: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
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
        n21: f64,
        n22: f64,
        n23: f64,
        n31: f64,
        n32: f64,
        n33: f64,
    ) -> &mut Self {
        self.elements = [n11, n21, n31, n12, n22, n32, n13, n23, n33];
        self
    }

    /// Upper-left 3x3 block of `m`.
    pub fn from_matrix4(m: &Matrix4) -> Self {
        let e = &m.elements;
        Self {
            elements: [e[0], e[1], e[2], e[4], e[5], e[6], e[8], e[9], e[10]],
        }
    }

    /// Inverse-transpose of the upper 3x3 of `m`, for transforming normals.
    /// Falls back to the plain upper 3x3 when that block is singular.
    pub fn normal_matrix(m: &Matrix4) -> Self {
        let upper = Self::from_matrix4(m);
        match upper.try_inverse() {
            Some(mut n) => {
                n.transpose();
                n
            }
            None => {
                log::warn!("Matrix3::normal_matrix of singular matrix; using upper 3x3");
                upper
            }
        }
    }

    fn to_glam(self) -> DMat3 {
        DMat3::from_cols_array(&self.elements)
    }

    /// `self = self * m`
    pub fn multiply(&mut self, m: &Self) -> &mut Self {
        self.elements = (self.to_glam() * m.to_glam()).to_cols_array();
        self
    }

    /// `self = m * self`
    pub fn premultiply(&mut self, m: &Self) -> &mut Self {
        self.elements = (m.to_glam() * self.to_glam()).to_cols_array();
        self
    }

    pub fn multiply_scalar(&mut self, s: f64) -> &mut Self {
        for e in &mut self.elements {
            *e *= s;
        }
        self
    }

    pub fn transpose(&mut self) -> &mut Self {
        self.elements = self.to_glam().transpose().to_cols_array();
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
        Some(Self {
            elements: self.to_glam().inverse().to_cols_array(),
        })
    }

    /// Invert in place. A singular matrix is left unchanged and `false` is returned.
    pub fn invert(&mut self) -> bool {
        match self.try_inverse() {
            Some(inv) => {
                *self = inv;
                true
            }
            None => {
                log::warn!("Matrix3::invert on singular matrix; left unchanged");
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

    pub fn to_array(&self) -> [f64; 9] {
        self.elements
    }

    pub fn from_array(array: &[f64], offset: usize) -> Result<Self> {
        ensure_len(array.len(), offset + 9)?;
        let mut elements = [0.0; 9];
        elements.copy_from_slice(&array[offset..offset + 9]);
        Ok(Self { elements })
    }

    pub fn dump(&self) -> serde_json::Value {
        crate::serial::dump(self)
    }

    pub fn load(value: &serde_json::Value) -> Result<Self> {
        crate::serial::load(value)
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for Matrix3 {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, psurf_core::EPSILON)
    }
}

impl From<DMat3> for Matrix3 {
    fn from(m: DMat3) -> Self {
        Self {
            elements: m.to_cols_array(),
        }
    }
}

impl From<Matrix3> for DMat3 {
    fn from(m: Matrix3) -> Self {
        m.to_glam()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample() -> Matrix3 {
        let mut m = Matrix3::identity();
        m.set(2.0, 0.0, 1.0, 1.0, 3.0, 0.0, 0.0, 1.0, 4.0);
        m
    }

    #[test]
    fn test_set_is_row_major_storage_column_major() {
        let m = sample();
        // Column 0 holds (n11, n21, n31).
        assert_eq!(&m.elements[0..3], &[2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_multiply_vs_premultiply() {
        let a = sample();
        let mut b = Matrix3::identity();
        b.set(0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0);

        let mut ab = a;
        ab.multiply(&b);
        let mut ba = a;
        ba.premultiply(&b);
        assert!(!ab.equals(&ba, 1e-9));

        let expected: Matrix3 = (DMat3::from(a) * DMat3::from(b)).into();
        assert_eq!(ab, expected);
    }

    #[test]
    fn test_invert_round_trip() {
        let m = sample();
        let mut inv = m;
        assert!(inv.invert());
        let mut product = m;
        product.multiply(&inv);
        assert_eq!(product, Matrix3::identity());
    }

    #[test]
    fn test_invert_singular_is_noop() {
        let mut m = Matrix3::identity();
        m.set(1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 0.0, 1.0, 1.0);
        let before = m;
        assert!(!m.invert());
        assert_eq!(m.elements, before.elements);
        assert!(m.try_inverse().is_none());
    }

    #[test]
    fn test_determinant_and_transpose() {
        let mut m = sample();
        assert_abs_diff_eq!(m.determinant(), 25.0, epsilon = 1e-12);
        m.transpose();
        assert_eq!(&m.elements[0..3], &[2.0, 0.0, 1.0]);
        assert_abs_diff_eq!(m.determinant(), 25.0, epsilon = 1e-12);
    }

    #[test]
    fn test_from_array_too_short() {
        assert!(Matrix3::from_array(&[0.0; 8], 0).is_err());
        assert!(Matrix3::from_array(&[0.0; 10], 1).is_ok());
    }
}
