//! Conical surface.

use psurf_core::tolerance::greater_equal;
use psurf_core::traits::Validate;
use psurf_core::{KernelError, Result, EPSILON};
use psurf_math::{Coordinate3, PeriodInterval, Vector2, Vector3};
use serde::{Deserialize, Serialize};

use super::{CoordinateSurface, ParamRange, Surface, SurfaceKind, SurfaceVariant, UvDomain};

/// A right circular cone, or a frustum of one when the `v` domain is cut.
///
/// The frame origin is the base center and `dz` points at the apex. `u` in
/// `[0, 2*PI)` is the angle around the axis, `v` in `[0, 1]` runs from the
/// base circle (`v = 0`) to the apex (`v = 1`):
///
/// `P(u, v) = base + radius*(1 - v)*(cos(u) dx + sin(u) dy) + height*v dz`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConeSurface {
    coordinate: Coordinate3,
    radius: f64,
    height: f64,
    domain: UvDomain,
}

impl ConeSurface {
    pub fn new(base_center: Vector3, axis: Vector3, radius: f64, height: f64) -> Result<Self> {
        if axis.length_squared() == 0.0 || !axis.is_finite() {
            return Err(KernelError::InvalidArgument(format!(
                "cone axis must be a finite non-zero vector, got {:?}",
                axis
            )));
        }
        Self::with_frame(Coordinate3::from_normal(base_center, &axis), radius, height)
    }

    /// Cone from its apex and base center; the height is their distance.
    pub fn from_apex(apex: Vector3, base_center: Vector3, radius: f64) -> Result<Self> {
        let axis = apex - base_center;
        Self::new(base_center, axis, radius, axis.length())
    }

    /// Cone on an existing frame whose `dz` is the axis.
    pub fn with_frame(coordinate: Coordinate3, radius: f64, height: f64) -> Result<Self> {
        check_radius(radius)?;
        check_height(height)?;
        Ok(Self {
            coordinate,
            radius,
            height,
            domain: Self::natural(),
        })
    }

    fn natural() -> UvDomain {
        UvDomain::new(ParamRange::full_circle(), ParamRange::bounded(0.0, 1.0))
    }

    pub fn base_center(&self) -> Vector3 {
        self.coordinate.origin
    }

    /// Unit axis from base towards apex.
    pub fn axis(&self) -> Vector3 {
        self.coordinate.dz
    }

    pub fn apex(&self) -> Vector3 {
        self.base_center() + self.axis() * self.height
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn set_radius(&mut self, radius: f64) -> Result<()> {
        check_radius(radius)?;
        self.radius = radius;
        Ok(())
    }

    pub fn set_height(&mut self, height: f64) -> Result<()> {
        check_height(height)?;
        self.height = height;
        Ok(())
    }

    /// Radius of the cross-section at parameter `v`.
    pub fn radius_at(&self, v: f64) -> f64 {
        self.radius * (1.0 - v)
    }

    /// Partial derivatives `(dP/du, dP/dv)` in world space.
    pub fn derivatives_at(&self, uv: &Vector2) -> (Vector3, Vector3) {
        let (sin_u, cos_u) = uv.x.sin_cos();
        let r = self.radius_at(uv.y);
        let du = Vector3::new(-r * sin_u, r * cos_u, 0.0);
        let dv = Vector3::new(-self.radius * cos_u, -self.radius * sin_u, self.height);
        (
            self.coordinate.local_to_world_vector(&du),
            self.coordinate.local_to_world_vector(&dv),
        )
    }

    /// Parameters of the point on the current patch nearest to `point`.
    ///
    /// The nearest point lies on the meridian through `point`, or on the
    /// nearer boundary meridian when `point` is outside the `u` range. In that
    /// half-plane the patch is the straight segment from `v0` to `v1`.
    fn nearest_uv(&self, point: &Vector3) -> Vector2 {
        let local = self.coordinate.world_to_local_point(point);
        let u = self.domain.u.clamp(local.y.atan2(local.x));
        let (sin_u, cos_u) = u.sin_cos();

        // (radial, axial) coordinates in the meridian half-plane at `u`.
        let p = Vector2::new(local.x * cos_u + local.y * sin_u, local.z);

        let (v0, v1) = (self.domain.v.start(), self.domain.v.end());
        let a = Vector2::new(self.radius_at(v0), self.height * v0);
        let b = Vector2::new(self.radius_at(v1), self.height * v1);
        let ab = b - a;
        let len2 = ab.length_squared();
        let t = if len2 == 0.0 {
            0.0
        } else {
            ((p - a).dot(&ab) / len2).clamp(0.0, 1.0)
        };
        Vector2::new(u, v0 + t * (v1 - v0))
    }
}

fn check_radius(radius: f64) -> Result<()> {
    if !(radius >= 0.0 && radius.is_finite()) {
        return Err(KernelError::InvalidArgument(format!(
            "cone radius must be finite and non-negative, got {radius}"
        )));
    }
    Ok(())
}

fn check_height(height: f64) -> Result<()> {
    if !(height > 0.0 && height.is_finite()) {
        return Err(KernelError::InvalidArgument(format!(
            "cone height must be finite and positive, got {height}"
        )));
    }
    Ok(())
}

impl Surface for ConeSurface {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Cone
    }

    fn variant(&self) -> SurfaceVariant<'_> {
        SurfaceVariant::Cone(self)
    }

    fn natural_domain(&self) -> UvDomain {
        Self::natural()
    }

    fn domain(&self) -> &UvDomain {
        &self.domain
    }

    fn domain_mut(&mut self) -> &mut UvDomain {
        &mut self.domain
    }

    fn point_at(&self, uv: &Vector2) -> Vector3 {
        let (sin_u, cos_u) = uv.x.sin_cos();
        let r = self.radius_at(uv.y);
        self.coordinate
            .local_to_world_point(&Vector3::new(r * cos_u, r * sin_u, self.height * uv.y))
    }

    /// `normalize(dP/du x dP/dv)`. At the apex the tangent plane is undefined
    /// and the axis direction is returned instead.
    fn normal_at(&self, uv: &Vector2) -> Vector3 {
        let axis_normal = self.axis() * self.coordinate.handedness();
        if greater_equal(uv.y, 1.0, EPSILON) {
            return axis_normal;
        }
        let (du, dv) = self.derivatives_at(uv);
        let n = du.crossed(&dv);
        if n.length() < EPSILON {
            return axis_normal;
        }
        n.normalized()
    }

    /// `v = z / height`, `u = atan2(y, x)` in the local frame.
    fn uv_at(&self, point: &Vector3) -> Vector2 {
        let local = self.coordinate.world_to_local_point(point);
        let u = PeriodInterval::full_circle().normalize_angle(local.y.atan2(local.x));
        Vector2::new(u, local.z / self.height)
    }

    /// Exact distance to the cone patch bounded by the current domain.
    fn distance_to_point(&self, point: &Vector3) -> f64 {
        self.point_at(&self.nearest_uv(point)).distance_to(point)
    }

    /// Signed form of the exact distance, with the sign taken from the normal
    /// at the nearest point on the patch.
    fn sign_distance_to_point(&self, point: &Vector3) -> f64 {
        let uv = self.nearest_uv(point);
        let on_surface = self.point_at(&uv);
        let distance = on_surface.distance_to(point);
        if (on_surface - *point).dot(&self.normal_at(&uv)) < 0.0 {
            -distance
        } else {
            distance
        }
    }

    fn reverse(&mut self) {
        self.coordinate.flip_dy();
    }
}

impl CoordinateSurface for ConeSurface {
    fn coordinate(&self) -> &Coordinate3 {
        &self.coordinate
    }

    fn coordinate_mut(&mut self) -> &mut Coordinate3 {
        &mut self.coordinate
    }
}

impl Validate for ConeSurface {
    fn validate(&self) -> Result<()> {
        check_radius(self.radius)?;
        check_height(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn unit_cone() -> ConeSurface {
        ConeSurface::new(Vector3::ZERO, Vector3::Z, 1.0, 2.0).unwrap()
    }

    #[test]
    fn test_cone_base_and_apex() {
        let cone = unit_cone();
        let p = cone.point_at(&Vector2::new(0.0, 0.0));
        assert!((p - Vector3::X).length() < 1e-10, "v=0 should be on the base circle");
        let p = cone.point_at(&Vector2::new(1.7, 1.0));
        assert!((p - cone.apex()).length() < 1e-10, "v=1 should be at apex");
        assert!((cone.apex() - Vector3::new(0.0, 0.0, 2.0)).length() < 1e-10);
    }

    #[test]
    fn test_cone_radius_tapers() {
        let cone = unit_cone();
        let p = cone.point_at(&Vector2::new(FRAC_PI_2, 0.25));
        let r = (p.x * p.x + p.y * p.y).sqrt();
        assert!((r - 0.75).abs() < 1e-10, "radius at v=0.25: got {}", r);
        assert!((p.z - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_cone_normal_points_out_and_up() {
        let cone = unit_cone();
        let uv = Vector2::new(0.0, 0.5);
        let n = cone.normal_at(&uv);
        // Slant direction in the xz-plane is (-1, 0, 2); the normal is (2, 0, 1)/sqrt(5).
        let expected = Vector3::new(2.0, 0.0, 1.0).normalized();
        assert!((n - expected).length() < 1e-10, "normal {:?}", n);
        let (du, dv) = cone.derivatives_at(&uv);
        assert!(n.dot(&du).abs() < 1e-10);
        assert!(n.dot(&dv).abs() < 1e-10);
    }

    #[test]
    fn test_cone_apex_normal_is_axis() {
        let cone = ConeSurface::new(Vector3::new(1.0, 2.0, 3.0), Vector3::new(1.0, 1.0, 0.0), 1.0, 3.0).unwrap();
        for i in 0..6 {
            let n = cone.normal_at(&Vector2::new(i as f64, 1.0));
            assert!((n.length() - 1.0).abs() < 1e-12);
            assert!((n - cone.axis()).length() < 1e-12);
        }
    }

    #[test]
    fn test_cone_uv_round_trip() {
        let cone = ConeSurface::from_apex(Vector3::new(0.0, 3.0, 0.0), Vector3::new(0.0, -1.0, 0.0), 2.0).unwrap();
        assert!((cone.height() - 4.0).abs() < 1e-12);
        let uv = Vector2::new(5.0, 0.4);
        let p = cone.point_at(&uv);
        let back = cone.uv_at(&p);
        assert!((back.x - uv.x).abs() < 1e-10);
        assert!((back.y - uv.y).abs() < 1e-10);
        assert!((cone.point_at(&back) - p).length() < 1e-6);
    }

    #[test]
    fn test_cone_distance_is_exact() {
        let cone = unit_cone();
        // Move off the slant along its normal.
        let on = cone.point_at(&Vector2::new(0.0, 0.5));
        let n = cone.normal_at(&Vector2::new(0.0, 0.5));
        let off = on + n * 0.3;
        assert!((cone.distance_to_point(&off) - 0.3).abs() < 1e-10);
        assert!(cone.contains_point(&on));
        assert!(!cone.contains_point(&off));

        // Beyond the apex along the axis the nearest point is the apex itself.
        let above = Vector3::new(0.0, 0.0, 5.0);
        assert!((cone.distance_to_point(&above) - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_cone_distance_respects_u_domain() {
        let mut cone = unit_cone();
        cone.set_domain_u(0.0, FRAC_PI_2);
        // Point on the full cone at u = PI is outside the patch.
        let p = cone.point_at(&Vector2::new(PI, 0.0));
        // Nearest boundary meridian is u = PI/2: minimize 1 + (1 - v)^2 + 4v^2 at v = 0.2.
        let d = cone.distance_to_point(&p);
        assert!((d - 1.8_f64.sqrt()).abs() < 1e-10, "distance to nearest boundary meridian: {}", d);
    }

    #[test]
    fn test_cone_sign_distance() {
        let cone = unit_cone();
        let uv = Vector2::new(1.0, 0.3);
        let on = cone.point_at(&uv);
        let n = cone.normal_at(&uv);
        assert!(cone.sign_distance_to_point(&(on + n * 0.1)) < 0.0);
        assert!(cone.sign_distance_to_point(&(on - n * 0.1)) > 0.0);
    }

    #[test]
    fn test_cone_sign_distance_matches_distance() {
        let cone = unit_cone();
        let uv = Vector2::new(0.0, 0.5);
        let on = cone.point_at(&uv);
        let n = cone.normal_at(&uv);

        let outside = on + n * 0.3;
        assert!((cone.distance_to_point(&outside) - 0.3).abs() < 1e-10);
        assert!((cone.sign_distance_to_point(&outside) + 0.3).abs() < 1e-10);

        let inside = on - n * 0.2;
        assert!((cone.sign_distance_to_point(&inside) - 0.2).abs() < 1e-10);

        let mut patch = unit_cone();
        patch.set_domain_u(0.0, FRAC_PI_2);
        for p in [Vector3::new(-1.0, -0.5, 0.7), Vector3::new(0.3, 2.0, 3.0), Vector3::new(2.0, 0.1, -1.0)] {
            let d = patch.distance_to_point(&p);
            let s = patch.sign_distance_to_point(&p);
            assert!((s.abs() - d).abs() < 1e-12, "signed {} vs distance {} at {:?}", s, d, p);
        }
    }

    #[test]
    fn test_cone_reverse_flips_normal_keeps_apex() {
        let mut cone = unit_cone();
        let p = cone.point_at(&Vector2::new(0.8, 0.5));
        let before = cone.normal_at(&cone.uv_at(&p));
        let apex = cone.apex();
        cone.reverse();
        let uv = cone.uv_at(&p);
        assert!((cone.point_at(&uv) - p).length() < 1e-10);
        assert!((cone.normal_at(&uv) + before).length() < 1e-10);
        assert!((cone.apex() - apex).length() < 1e-12);
        assert!((cone.normal_at(&Vector2::new(0.0, 1.0)) + cone.axis()).length() < 1e-12);
    }

    #[test]
    fn test_cone_rejects_bad_parameters() {
        assert!(ConeSurface::new(Vector3::ZERO, Vector3::ZERO, 1.0, 1.0).is_err());
        assert!(ConeSurface::new(Vector3::ZERO, Vector3::Z, -1.0, 1.0).is_err());
        assert!(ConeSurface::new(Vector3::ZERO, Vector3::Z, 1.0, 0.0).is_err());
        assert!(ConeSurface::from_apex(Vector3::ONE, Vector3::ONE, 1.0).is_err());
        let mut cone = unit_cone();
        assert!(cone.set_height(-2.0).is_err());
        assert_eq!(cone.height(), 2.0);
    }
}
