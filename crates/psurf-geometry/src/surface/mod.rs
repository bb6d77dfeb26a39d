//! Surface traits and implementations.

mod cone;
mod domain;
mod sphere;

use std::fmt;

use psurf_core::tolerance::less_equal;
use psurf_core::EPSILON;
use psurf_math::{Coordinate3, Quaternion, Vector2, Vector3};
use serde::{Deserialize, Serialize};

pub use cone::ConeSurface;
pub use domain::{ParamRange, UvDomain};
pub use sphere::SphereSurface;

/// Closed set of analytic surface types known to this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceKind {
    Sphere,
    Cone,
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceKind::Sphere => f.write_str("sphere"),
            SurfaceKind::Cone => f.write_str("cone"),
        }
    }
}

/// A borrowed view of a surface as its concrete type.
#[derive(Debug, Clone, Copy)]
pub enum SurfaceVariant<'a> {
    Sphere(&'a SphereSurface),
    Cone(&'a ConeSurface),
}

/// A parametric surface over a `(u, v)` domain.
///
/// The current [`domain`](Surface::domain) is always a sub-range of the
/// [`natural_domain`](Surface::natural_domain): every setter clamps to it.
pub trait Surface: Send + Sync + fmt::Debug {
    fn kind(&self) -> SurfaceKind;

    fn variant(&self) -> SurfaceVariant<'_>;

    /// The full parameter extent of this surface type.
    fn natural_domain(&self) -> UvDomain;

    fn domain(&self) -> &UvDomain;

    fn domain_mut(&mut self) -> &mut UvDomain;

    /// Evaluate the surface at `uv`.
    fn point_at(&self, uv: &Vector2) -> Vector3;

    /// Unit normal at `uv`.
    fn normal_at(&self, uv: &Vector2) -> Vector3;

    /// Closed-form inverse of [`point_at`](Surface::point_at): the parameters
    /// of the projection of `point` onto the surface. Not clamped to the domain.
    fn uv_at(&self, point: &Vector3) -> Vector2;

    /// Flip the orientation so that every normal points the other way.
    fn reverse(&mut self);

    fn set_domain_u(&mut self, min: f64, max: f64) {
        let u = self.natural_domain().u.restricted(min, max);
        self.domain_mut().u = u;
    }

    fn set_domain_v(&mut self, min: f64, max: f64) {
        let v = self.natural_domain().v.restricted(min, max);
        self.domain_mut().v = v;
    }

    fn set_uv_bounds(&mut self, u_min: f64, u_max: f64, v_min: f64, v_max: f64) {
        self.set_domain_u(u_min, u_max);
        self.set_domain_v(v_min, v_max);
    }

    /// Restore the natural domain.
    fn reset_uv_bounds(&mut self) {
        *self.domain_mut() = self.natural_domain();
    }

    fn clamp_uv(&self, uv: &Vector2) -> Vector2 {
        self.domain().clamp(uv)
    }

    /// `uv` as fractions of the current domain.
    fn normalized_uv(&self, uv: &Vector2) -> Vector2 {
        self.domain().normalized(uv)
    }

    /// Distance from `point` to the surface evaluated at its projected UV,
    /// clamped into the current domain.
    fn distance_to_point(&self, point: &Vector3) -> f64 {
        let uv = self.clamp_uv(&self.uv_at(point));
        self.point_at(&uv).distance_to(point)
    }

    /// Distance with a sign: positive when `point` lies on the side opposite
    /// the normal, negative on the normal's side.
    fn sign_distance_to_point(&self, point: &Vector3) -> f64 {
        let uv = self.clamp_uv(&self.uv_at(point));
        let on_surface = self.point_at(&uv);
        let distance = on_surface.distance_to(point);
        if (on_surface - *point).dot(&self.normal_at(&uv)) < 0.0 {
            -distance
        } else {
            distance
        }
    }

    fn contains_point(&self, point: &Vector3) -> bool {
        self.contains_point_eps(point, EPSILON)
    }

    fn contains_point_eps(&self, point: &Vector3, eps: f64) -> bool {
        less_equal(self.distance_to_point(point), 0.0, eps)
    }
}

/// A surface evaluated in a local [`Coordinate3`] frame.
pub trait CoordinateSurface: Surface {
    fn coordinate(&self) -> &Coordinate3;

    fn coordinate_mut(&mut self) -> &mut Coordinate3;

    fn translate(&mut self, offset: &Vector3) {
        self.coordinate_mut().translate(offset);
    }

    /// Rotate the frame in world space about its own origin.
    fn rotate_by_quaternion(&mut self, q: &Quaternion) {
        self.coordinate_mut().rotate_by_quaternion(q);
    }

    /// `+1.0` unless the surface has been reversed an odd number of times.
    fn handedness(&self) -> f64 {
        self.coordinate().handedness()
    }
}
