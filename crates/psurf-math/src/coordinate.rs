//! Orthonormal local frames.

use psurf_core::Result;
use serde::{Deserialize, Serialize};

use crate::{Matrix4, Quaternion, Vector3};

/// Above this `|n . X|` the world X axis is too close to the normal to serve
/// as the helper axis in [`Coordinate3::set_normal`].
const HELPER_AXIS_LIMIT: f64 = 0.9;

/// A local frame: an origin and three unit, mutually orthogonal axes.
///
/// The frame may be right-handed (`dx x dy = dz`) or left-handed
/// (`dx x dy = -dz`, e.g. after [`flip_dy`](Coordinate3::flip_dy)).
/// Every mutation re-orthonormalizes and keeps the handedness it found.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate3 {
    pub origin: Vector3,
    pub dx: Vector3,
    pub dy: Vector3,
    pub dz: Vector3,
}

impl Coordinate3 {
    /// World-aligned frame at `origin`.
    pub fn new(origin: Vector3) -> Self {
        Self {
            origin,
            dx: Vector3::X,
            dy: Vector3::Y,
            dz: Vector3::Z,
        }
    }

    /// Right-handed frame from two (not necessarily orthogonal) axes.
    /// `dx` keeps its direction; `dy` is re-projected against it.
    pub fn from_axes(origin: Vector3, dx: Vector3, dy: Vector3) -> Self {
        let mut c = Self {
            origin,
            dx,
            dy,
            dz: dx.crossed(&dy),
        };
        c.orthogonalize();
        c
    }

    /// Right-handed frame whose `dz` is `normal`.
    pub fn from_normal(origin: Vector3, normal: &Vector3) -> Self {
        let mut c = Self::new(origin);
        c.set_normal(normal);
        c
    }

    pub fn set_origin(&mut self, origin: Vector3) -> &mut Self {
        self.origin = origin;
        self
    }

    pub fn translate(&mut self, offset: &Vector3) -> &mut Self {
        self.origin.add_vector(offset);
        self
    }

    /// `+1.0` for a right-handed frame, `-1.0` for a left-handed one.
    pub fn handedness(&self) -> f64 {
        if self.dz.dot(&self.dx.crossed(&self.dy)) < 0.0 {
            -1.0
        } else {
            1.0
        }
    }

    pub fn is_right_handed(&self) -> bool {
        self.handedness() > 0.0
    }

    /// Gram-Schmidt with `dx` fixed: `dy` is made orthogonal to `dx`, and `dz`
    /// becomes `±(dx x dy)` with the sign of the current handedness.
    ///
    /// Degenerate axes are replaced by a perpendicular helper instead of
    /// producing NaN. Applying this twice is the same as applying it once.
    pub fn orthogonalize(&mut self) -> &mut Self {
        let hand = self.handedness();

        let mut dx = self.dx.normalized();
        if dx.length_squared() == 0.0 {
            log::warn!("Coordinate3::orthogonalize: zero dx, using world X");
            dx = Vector3::X;
        }

        let mut dy = self.dy;
        dy.add_scaled_vector(&dx, -self.dy.dot(&dx));
        if dy.length_squared() < psurf_core::EPSILON * psurf_core::EPSILON {
            log::warn!("Coordinate3::orthogonalize: dy parallel to dx, rebuilding it");
            dy = perpendicular_helper(&dx);
            dy.add_scaled_vector(&dx, -dy.dot(&dx));
        }
        dy.normalize();

        self.dx = dx;
        self.dy = dy;
        self.dz = dx.crossed(&dy) * hand;
        self
    }

    /// Replace `dz` with `normal` and rebuild `dx`, `dy` around it.
    ///
    /// `dx` is the projection of world X onto the normal's plane, or of world Y
    /// when the normal is nearly parallel to X. A zero normal is ignored.
    pub fn set_normal(&mut self, normal: &Vector3) -> &mut Self {
        let n = normal.normalized();
        if n.length_squared() == 0.0 {
            log::warn!("Coordinate3::set_normal: zero normal ignored");
            return self;
        }
        let hand = self.handedness();

        let helper = perpendicular_helper(&n);
        let mut dx = helper;
        dx.add_scaled_vector(&n, -helper.dot(&n)).normalize();
        let dy = n.crossed(&dx) * hand;

        self.dx = dx;
        self.dy = dy;
        self.dz = n;
        self.orthogonalize()
    }

    /// Negate `dy` alone. This flips the handedness and therefore every
    /// normal derived from `dx x dy`.
    pub fn flip_dy(&mut self) -> &mut Self {
        self.dy.negate();
        self
    }

    /// Rotate `dy` and `dz` about the frame's own `dx`.
    pub fn rotate_x(&mut self, angle: f64) -> &mut Self {
        let q = Quaternion::from_axis_angle(&self.dx, angle);
        self.dy.apply_quaternion(&q);
        self.dz.apply_quaternion(&q);
        self.orthogonalize()
    }

    /// Rotate `dz` and `dx` about the frame's own `dy`.
    pub fn rotate_y(&mut self, angle: f64) -> &mut Self {
        let q = Quaternion::from_axis_angle(&self.dy, angle);
        self.dx.apply_quaternion(&q);
        self.dz.apply_quaternion(&q);
        self.orthogonalize()
    }

    /// Rotate `dx` and `dy` about the frame's own `dz`.
    pub fn rotate_z(&mut self, angle: f64) -> &mut Self {
        let q = Quaternion::from_axis_angle(&self.dz, angle);
        self.dx.apply_quaternion(&q);
        self.dy.apply_quaternion(&q);
        self.orthogonalize()
    }

    /// Apply a world-space rotation to all three axes. The origin stays put.
    pub fn rotate_by_quaternion(&mut self, q: &Quaternion) -> &mut Self {
        self.dx.apply_quaternion(q);
        self.dy.apply_quaternion(q);
        self.dz.apply_quaternion(q);
        self.orthogonalize()
    }

    pub fn local_to_world_point(&self, p: &Vector3) -> Vector3 {
        self.origin + self.local_to_world_vector(p)
    }

    /// Free vectors ignore the origin.
    pub fn local_to_world_vector(&self, v: &Vector3) -> Vector3 {
        self.dx * v.x + self.dy * v.y + self.dz * v.z
    }

    pub fn world_to_local_point(&self, p: &Vector3) -> Vector3 {
        self.world_to_local_vector(&(*p - self.origin))
    }

    pub fn world_to_local_vector(&self, v: &Vector3) -> Vector3 {
        Vector3::new(v.dot(&self.dx), v.dot(&self.dy), v.dot(&self.dz))
    }

    /// Local-to-world matrix: columns `dx`, `dy`, `dz`, `origin`.
    pub fn to_matrix4(&self) -> Matrix4 {
        let (x, y, z, o) = (self.dx, self.dy, self.dz, self.origin);
        let mut m = Matrix4::identity();
        m.set(
            x.x, y.x, z.x, o.x, //
            x.y, y.y, z.y, o.y, //
            x.z, y.z, z.z, o.z, //
            0.0, 0.0, 0.0, 1.0,
        );
        m
    }

    pub fn dump(&self) -> serde_json::Value {
        crate::serial::dump(self)
    }

    pub fn load(value: &serde_json::Value) -> Result<Self> {
        crate::serial::load(value)
    }
}

impl Default for Coordinate3 {
    fn default() -> Self {
        Self::new(Vector3::ZERO)
    }
}

/// World X, or world Y when `axis` is nearly parallel to X.
fn perpendicular_helper(axis: &Vector3) -> Vector3 {
    if axis.dot(&Vector3::X).abs() > HELPER_AXIS_LIMIT {
        Vector3::Y
    } else {
        Vector3::X
    }
}
