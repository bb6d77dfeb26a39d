use std::f64::consts::PI;

use psurf_core::tolerance::{greater_equal, less_equal};
use psurf_core::{KernelError, Result, EPSILON};
use psurf_geometry::{Surface, SurfaceVariant};
use psurf_math::Vector2;

use super::{DefaultTessellationStrategy, TessellationStrategy};
use crate::{CapSide, SurfaceMeshData, TessellationParams};

/// Grid plus pole caps.
///
/// A closed sphere gets one pole vertex for each end of the `v` domain that
/// reaches a pole. The grid row there already sits on the pole, so the cap
/// fans over the existing row: each cap adds one vertex and `u_segments`
/// triangles. Pole UVs are `(0.5, 0)` and `(0.5, 1)`.
///
/// The grid already closes the surface at a pole, so cap triangles have zero
/// area. They give the mesh a single shared pole vertex carrying the exact
/// axis normal. Area and volume sums are unaffected by them.
#[derive(Debug, Clone, Copy, Default)]
pub struct SphereTessellationStrategy;

impl TessellationStrategy for SphereTessellationStrategy {
    fn tessellate(&self, surface: &dyn Surface, params: &TessellationParams) -> Result<SurfaceMeshData> {
        let SurfaceVariant::Sphere(sphere) = surface.variant() else {
            return Err(KernelError::UnsupportedSurface(format!(
                "sphere strategy cannot tessellate a {} surface",
                surface.kind()
            )));
        };

        let mut builder = DefaultTessellationStrategy::grid(surface, params)?;
        if params.is_closed {
            let domain = *builder.domain();
            let u = domain.u.start();
            let (v_min, v_max) = (domain.v.start(), domain.v.end());

            if greater_equal(v_max, PI, EPSILON) {
                let pole = Vector2::new(u, PI);
                builder.fan_to_row(
                    CapSide::VMax,
                    &sphere.point_at(&pole),
                    &sphere.normal_at(&pole),
                    &Vector2::new(0.5, 1.0),
                );
            }
            if less_equal(v_min, 0.0, EPSILON) {
                let pole = Vector2::new(u, 0.0);
                builder.fan_to_row(
                    CapSide::VMin,
                    &sphere.point_at(&pole),
                    &sphere.normal_at(&pole),
                    &Vector2::new(0.5, 0.0),
                );
            }
        }
        Ok(builder.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use psurf_geometry::{ConeSurface, SphereSurface};
    use psurf_math::Vector3;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_closed_sphere_adds_two_poles() {
        let sphere = SphereSurface::new(Vector3::ZERO, 1.0).unwrap();
        let mesh = SphereTessellationStrategy
            .tessellate(&sphere, &TessellationParams::new(8, 4, true))
            .unwrap();
        assert_eq!(mesh.vertex_count(), 45 + 2);
        assert_eq!(mesh.triangle_count(), 64 + 16);

        // South pole is added first, then the north pole.
        assert_eq!(mesh.position(45), Some(-Vector3::Z));
        assert_eq!(mesh.normal(45), Some(-Vector3::Z));
        assert_eq!(mesh.uv(45), Some(Vector2::new(0.5, 1.0)));
        assert_eq!(mesh.position(46), Some(Vector3::Z));
        assert_eq!(mesh.normal(46), Some(Vector3::Z));
        assert_eq!(mesh.uv(46), Some(Vector2::new(0.5, 0.0)));
    }

    #[test]
    fn test_pole_caps_are_degenerate() {
        let sphere = SphereSurface::new(Vector3::ZERO, 2.0).unwrap();
        let mesh = SphereTessellationStrategy
            .tessellate(&sphere, &TessellationParams::new(8, 4, true))
            .unwrap();
        let area = |t: usize| {
            let [a, b, c] = mesh.triangle(t).unwrap();
            let (a, b, c) = (
                mesh.position(a as usize).unwrap(),
                mesh.position(b as usize).unwrap(),
                mesh.position(c as usize).unwrap(),
            );
            (b - a).crossed(&(c - a)).length() * 0.5
        };

        let caps: f64 = (64..80).map(area).sum();
        assert!(caps < 1e-20, "cap area {}", caps);
        // The grid alone approaches the sphere's area 4*PI*r^2.
        let grid: f64 = (0..64).map(area).sum();
        assert!(grid > 0.6 * 16.0 * std::f64::consts::PI && grid < 16.0 * std::f64::consts::PI);
    }

    #[test]
    fn test_hemisphere_caps_only_reached_pole() {
        let mut sphere = SphereSurface::new(Vector3::ZERO, 1.0).unwrap();
        sphere.set_domain_v(0.0, FRAC_PI_2);
        let mesh = SphereTessellationStrategy
            .tessellate(&sphere, &TessellationParams::new(8, 4, true))
            .unwrap();
        assert_eq!(mesh.vertex_count(), 46);
        assert_eq!(mesh.position(45), Some(Vector3::Z));
    }

    #[test]
    fn test_rejects_cone() {
        let cone = ConeSurface::new(Vector3::ZERO, Vector3::Z, 1.0, 1.0).unwrap();
        let err = SphereTessellationStrategy
            .tessellate(&cone, &TessellationParams::new(8, 4, true))
            .unwrap_err();
        assert!(matches!(err, KernelError::UnsupportedSurface(_)));
    }
}
