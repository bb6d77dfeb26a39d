use std::fmt;

use psurf_core::error::ensure_len;
use psurf_core::Result;
use serde::{Deserialize, Serialize};

use crate::{Matrix4, Quaternion};

/// Past this magnitude the middle angle is treated as gimbal-locked.
const GIMBAL_LIMIT: f64 = 0.999_999_9;

/// Intrinsic rotation order: `XYZ` rotates about X, then the new Y, then the new Z.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EulerOrder {
    #[default]
    XYZ,
    YXZ,
    ZXY,
    ZYX,
    YZX,
    XZY,
}

impl EulerOrder {
    pub const ALL: [EulerOrder; 6] = [
        EulerOrder::XYZ,
        EulerOrder::YXZ,
        EulerOrder::ZXY,
        EulerOrder::ZYX,
        EulerOrder::YZX,
        EulerOrder::XZY,
    ];
}

impl fmt::Display for EulerOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EulerOrder::XYZ => "XYZ",
            EulerOrder::YXZ => "YXZ",
            EulerOrder::ZXY => "ZXY",
            EulerOrder::ZYX => "ZYX",
            EulerOrder::YZX => "YZX",
            EulerOrder::XZY => "XZY",
        };
        f.write_str(s)
    }
}

/// Euler angles in radians with an explicit rotation order.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Euler {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub order: EulerOrder,
}

impl Euler {
    pub fn new(x: f64, y: f64, z: f64, order: EulerOrder) -> Self {
        Self { x, y, z, order }
    }

    pub fn set(&mut self, x: f64, y: f64, z: f64, order: EulerOrder) -> &mut Self {
        *self = Self::new(x, y, z, order);
        self
    }

    pub fn from_quaternion(q: &Quaternion, order: EulerOrder) -> Self {
        let mut m = Matrix4::identity();
        m.make_rotation_from_quaternion(q);
        Self::from_rotation_matrix(&m, order)
    }

    /// Extract angles from the (unscaled) rotation part of `m`.
    pub fn from_rotation_matrix(m: &Matrix4, order: EulerOrder) -> Self {
        let te = &m.elements;
        let (m11, m12, m13) = (te[0], te[4], te[8]);
        let (m21, m22, m23) = (te[1], te[5], te[9]);
        let (m31, m32, m33) = (te[2], te[6], te[10]);

        let (x, y, z) = match order {
            EulerOrder::XYZ => {
                let y = m13.clamp(-1.0, 1.0).asin();
                if m13.abs() < GIMBAL_LIMIT {
                    ((-m23).atan2(m33), y, (-m12).atan2(m11))
                } else {
                    (m32.atan2(m22), y, 0.0)
                }
            }
            EulerOrder::YXZ => {
                let x = (-m23.clamp(-1.0, 1.0)).asin();
                if m23.abs() < GIMBAL_LIMIT {
                    (x, m13.atan2(m33), m21.atan2(m22))
                } else {
                    (x, (-m31).atan2(m11), 0.0)
                }
            }
            EulerOrder::ZXY => {
                let x = m32.clamp(-1.0, 1.0).asin();
                if m32.abs() < GIMBAL_LIMIT {
                    (x, (-m31).atan2(m33), (-m12).atan2(m22))
                } else {
                    (x, 0.0, m21.atan2(m11))
                }
            }
            EulerOrder::ZYX => {
                let y = (-m31.clamp(-1.0, 1.0)).asin();
                if m31.abs() < GIMBAL_LIMIT {
                    (m32.atan2(m33), y, m21.atan2(m11))
                } else {
                    (0.0, y, (-m12).atan2(m22))
                }
            }
            EulerOrder::YZX => {
                let z = m21.clamp(-1.0, 1.0).asin();
                if m21.abs() < GIMBAL_LIMIT {
                    ((-m23).atan2(m22), (-m31).atan2(m11), z)
                } else {
                    (0.0, m13.atan2(m33), z)
                }
            }
            EulerOrder::XZY => {
                let z = (-m12.clamp(-1.0, 1.0)).asin();
                if m12.abs() < GIMBAL_LIMIT {
                    (m32.atan2(m22), m13.atan2(m11), z)
                } else {
                    ((-m23).atan2(m33), 0.0, z)
                }
            }
        };
        Self::new(x, y, z, order)
    }

    pub fn set_from_quaternion(&mut self, q: &Quaternion, order: EulerOrder) -> &mut Self {
        *self = Self::from_quaternion(q, order);
        self
    }

    pub fn set_from_rotation_matrix(&mut self, m: &Matrix4, order: EulerOrder) -> &mut Self {
        *self = Self::from_rotation_matrix(m, order);
        self
    }

    pub fn to_quaternion(&self) -> Quaternion {
        Quaternion::from_euler(self)
    }

    /// Re-express the same rotation in `order`.
    pub fn reorder(&mut self, order: EulerOrder) -> &mut Self {
        let q = self.to_quaternion();
        self.set_from_quaternion(&q, order)
    }

    pub fn equals(&self, other: &Self, eps: f64) -> bool {
        use psurf_core::tolerance::equals;
        self.order == other.order
            && equals(self.x, other.x, eps)
            && equals(self.y, other.y, eps)
            && equals(self.z, other.z, eps)
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Read three angles starting at `offset`, keeping the current order.
    pub fn from_array(array: &[f64], offset: usize, order: EulerOrder) -> Result<Self> {
        ensure_len(array.len(), offset + 3)?;
        Ok(Self::new(array[offset], array[offset + 1], array[offset + 2], order))
    }

    pub fn dump(&self) -> serde_json::Value {
        crate::serial::dump(self)
    }

    pub fn load(value: &serde_json::Value) -> Result<Self> {
        crate::serial::load(value)
    }
}

impl PartialEq for Euler {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, psurf_core::EPSILON)
    }
}
