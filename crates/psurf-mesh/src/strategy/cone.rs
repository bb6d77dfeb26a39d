use psurf_core::tolerance::{less_equal, less_than};
use psurf_core::{KernelError, Result, EPSILON};
use psurf_geometry::{CoordinateSurface, Surface, SurfaceVariant};
use psurf_math::Vector3;

use super::{DefaultTessellationStrategy, TessellationStrategy};
use crate::{CapSide, SurfaceMeshData, TessellationParams};

/// Grid plus flat disk caps.
///
/// A closed cone gets a base disk when its `v` domain starts at the base,
/// and a top disk when the domain stops short of the apex (a frustum). Each
/// disk adds a center vertex and its own copy of the boundary ring so the cap
/// can carry the flat axis normal.
///
/// The caps follow the grid's winding, which on a cone makes counter-clockwise
/// faces point into the solid. Shade with the emitted normals, which point out.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConeTessellationStrategy;

impl TessellationStrategy for ConeTessellationStrategy {
    fn tessellate(&self, surface: &dyn Surface, params: &TessellationParams) -> Result<SurfaceMeshData> {
        let SurfaceVariant::Cone(cone) = surface.variant() else {
            return Err(KernelError::UnsupportedSurface(format!(
                "cone strategy cannot tessellate a {} surface",
                surface.kind()
            )));
        };

        let mut builder = DefaultTessellationStrategy::grid(surface, params)?;
        if params.is_closed {
            let domain = *builder.domain();
            let (v_min, v_max) = (domain.v.start(), domain.v.end());
            let frame = cone.coordinate();
            let axis = cone.axis() * cone.handedness();

            if less_equal(v_min, 0.0, EPSILON) {
                let center = frame.local_to_world_point(&Vector3::new(0.0, 0.0, cone.height() * v_min));
                builder.disk(CapSide::VMin, &center, &-axis);
            }
            if less_than(v_max, 1.0, EPSILON) {
                let center = frame.local_to_world_point(&Vector3::new(0.0, 0.0, cone.height() * v_max));
                builder.disk(CapSide::VMax, &center, &axis);
            }
        }
        Ok(builder.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use psurf_geometry::{ConeSurface, SphereSurface};

    #[test]
    fn test_full_cone_gets_base_only() {
        let cone = ConeSurface::new(Vector3::ZERO, Vector3::Z, 1.0, 2.0).unwrap();
        let mesh = ConeTessellationStrategy
            .tessellate(&cone, &TessellationParams::new(8, 4, true))
            .unwrap();
        // 45 grid + 1 center + 9 ring
        assert_eq!(mesh.vertex_count(), 55);
        assert_eq!(mesh.triangle_count(), 64 + 8);
        assert_eq!(mesh.position(45), Some(Vector3::ZERO));
        assert_eq!(mesh.normal(45), Some(-Vector3::Z));
    }

    #[test]
    fn test_frustum_gets_top_disk() {
        let mut cone = ConeSurface::new(Vector3::ZERO, Vector3::Z, 1.0, 2.0).unwrap();
        cone.set_domain_v(0.0, 0.5);
        let mesh = ConeTessellationStrategy
            .tessellate(&cone, &TessellationParams::new(8, 4, true))
            .unwrap();
        assert_eq!(mesh.vertex_count(), 45 + 2 * 10);
        assert_eq!(mesh.triangle_count(), 64 + 16);
        let top_center = 45 + 10;
        assert_eq!(mesh.position(top_center), Some(Vector3::new(0.0, 0.0, 1.0)));
        assert_eq!(mesh.normal(top_center), Some(Vector3::Z));
    }

    #[test]
    fn test_rejects_sphere() {
        let sphere = SphereSurface::new(Vector3::ZERO, 1.0).unwrap();
        let err = ConeTessellationStrategy
            .tessellate(&sphere, &TessellationParams::new(8, 4, true))
            .unwrap_err();
        assert!(matches!(err, KernelError::UnsupportedSurface(_)));
    }
}
