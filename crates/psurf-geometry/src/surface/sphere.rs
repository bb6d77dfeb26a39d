//! Spherical surface.

use std::f64::consts::PI;

use psurf_core::traits::Validate;
use psurf_core::{KernelError, Result, EPSILON};
use psurf_math::{Coordinate3, PeriodInterval, Vector2, Vector3};
use serde::{Deserialize, Serialize};

use super::{CoordinateSurface, ParamRange, Surface, SurfaceKind, SurfaceVariant, UvDomain};

/// A sphere parameterized by longitude `u` in `[0, 2*PI)` and colatitude
/// `v` in `[0, PI]`, measured from the frame's `dz` pole.
///
/// `P(u, v) = center + radius * (sin(v)cos(u) dx + sin(v)sin(u) dy + cos(v) dz)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SphereSurface {
    coordinate: Coordinate3,
    radius: f64,
    domain: UvDomain,
}

impl SphereSurface {
    pub fn new(center: Vector3, radius: f64) -> Result<Self> {
        Self::with_frame(Coordinate3::new(center), radius)
    }

    /// Sphere whose poles lie along `coordinate.dz`.
    pub fn with_frame(coordinate: Coordinate3, radius: f64) -> Result<Self> {
        check_radius(radius)?;
        Ok(Self {
            coordinate,
            radius,
            domain: Self::natural(),
        })
    }

    fn natural() -> UvDomain {
        UvDomain::new(ParamRange::full_circle(), ParamRange::bounded(0.0, PI))
    }

    pub fn center(&self) -> Vector3 {
        self.coordinate.origin
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f64) -> Result<()> {
        check_radius(radius)?;
        self.radius = radius;
        Ok(())
    }

    /// Unit direction from the center towards `uv`, in world space.
    fn radial(&self, uv: &Vector2) -> Vector3 {
        let (sin_u, cos_u) = uv.x.sin_cos();
        let (sin_v, cos_v) = uv.y.sin_cos();
        self.coordinate
            .local_to_world_vector(&Vector3::new(sin_v * cos_u, sin_v * sin_u, cos_v))
    }
}

fn check_radius(radius: f64) -> Result<()> {
    if !(radius >= 0.0 && radius.is_finite()) {
        return Err(KernelError::InvalidArgument(format!(
            "sphere radius must be finite and non-negative, got {radius}"
        )));
    }
    Ok(())
}

impl Surface for SphereSurface {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Sphere
    }

    fn variant(&self) -> SurfaceVariant<'_> {
        SurfaceVariant::Sphere(self)
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
        self.center() + self.radial(uv) * self.radius
    }

    /// Outward radial direction; inward once reversed.
    fn normal_at(&self, uv: &Vector2) -> Vector3 {
        self.radial(uv) * self.coordinate.handedness()
    }

    /// `v = acos(z / |p|)`, `u = atan2(y, x)` in the local frame. A point at
    /// the center has no direction and maps to `(0, 0)`.
    fn uv_at(&self, point: &Vector3) -> Vector2 {
        let local = self.coordinate.world_to_local_point(point);
        let distance = local.length();
        if distance < EPSILON {
            log::debug!("SphereSurface::uv_at: point at center, returning (0, 0)");
            return Vector2::new(0.0, 0.0);
        }
        let v = (local.z / distance).clamp(-1.0, 1.0).acos();
        let u = PeriodInterval::full_circle().normalize_angle(local.y.atan2(local.x));
        Vector2::new(u, v)
    }

    fn reverse(&mut self) {
        self.coordinate.flip_dy();
    }
}

impl CoordinateSurface for SphereSurface {
    fn coordinate(&self) -> &Coordinate3 {
        &self.coordinate
    }

    fn coordinate_mut(&mut self) -> &mut Coordinate3 {
        &mut self.coordinate
    }
}

impl Validate for SphereSurface {
    fn validate(&self) -> Result<()> {
        check_radius(self.radius)
    }
}
