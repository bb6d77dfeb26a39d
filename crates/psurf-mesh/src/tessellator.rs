use std::collections::HashMap;
use std::fmt;

use psurf_core::traits::Validate;
use psurf_core::Result;
use psurf_geometry::{Surface, SurfaceKind};
use rayon::prelude::*;

use crate::{
    ConeTessellationStrategy, SphereTessellationStrategy, SurfaceMeshData, TessellationParams,
    TessellationStrategy,
};

/// Picks a strategy by surface kind and runs it.
///
/// Every [`SurfaceKind`] has a built-in strategy. A strategy registered for a
/// kind replaces the built-in one for that kind only.
#[derive(Default)]
pub struct SurfaceTessellator {
    overrides: HashMap<SurfaceKind, Box<dyn TessellationStrategy>>,
}

impl SurfaceTessellator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `strategy` for `kind`, returning the one it replaces.
    pub fn register(
        &mut self,
        kind: SurfaceKind,
        strategy: Box<dyn TessellationStrategy>,
    ) -> Option<Box<dyn TessellationStrategy>> {
        self.overrides.insert(kind, strategy)
    }

    /// Go back to the built-in strategy for `kind`.
    pub fn unregister(&mut self, kind: SurfaceKind) -> Option<Box<dyn TessellationStrategy>> {
        self.overrides.remove(&kind)
    }

    pub fn is_overridden(&self, kind: SurfaceKind) -> bool {
        self.overrides.contains_key(&kind)
    }

    pub fn tessellate(&self, surface: &dyn Surface, params: &TessellationParams) -> Result<SurfaceMeshData> {
        params.validate()?;
        let kind = surface.kind();
        let mesh = match self.overrides.get(&kind) {
            Some(strategy) => strategy.tessellate(surface, params)?,
            None => match kind {
                SurfaceKind::Sphere => SphereTessellationStrategy.tessellate(surface, params)?,
                SurfaceKind::Cone => ConeTessellationStrategy.tessellate(surface, params)?,
            },
        };
        log::debug!(
            "tessellated {} surface at {}x{} (closed: {}): {} vertices, {} triangles",
            kind,
            params.u_segments,
            params.v_segments,
            params.is_closed,
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }

    /// Tessellate independent surfaces in parallel. Meshes come back in input
    /// order; the first failure aborts the batch.
    pub fn tessellate_batch(&self, jobs: &[(&dyn Surface, TessellationParams)]) -> Result<Vec<SurfaceMeshData>> {
        jobs.par_iter()
            .map(|(surface, params)| self.tessellate(*surface, params))
            .collect()
    }
}

impl fmt::Debug for SurfaceTessellator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceTessellator")
            .field("overrides", &self.overrides.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DefaultTessellationStrategy;
    use psurf_geometry::SphereSurface;
    use psurf_math::Vector3;

    #[test]
    fn test_override_and_restore() {
        let sphere = SphereSurface::new(Vector3::ZERO, 1.0).unwrap();
        let params = TessellationParams::new(8, 4, true);
        let mut tessellator = SurfaceTessellator::new();
        assert_eq!(tessellator.tessellate(&sphere, &params).unwrap().vertex_count(), 47);

        assert!(tessellator
            .register(SurfaceKind::Sphere, Box::new(DefaultTessellationStrategy))
            .is_none());
        assert!(tessellator.is_overridden(SurfaceKind::Sphere));
        assert!(!tessellator.is_overridden(SurfaceKind::Cone));
        assert_eq!(tessellator.tessellate(&sphere, &params).unwrap().vertex_count(), 45);

        assert!(tessellator.unregister(SurfaceKind::Sphere).is_some());
        assert_eq!(tessellator.tessellate(&sphere, &params).unwrap().vertex_count(), 47);
    }

    #[test]
    fn test_debug_lists_overrides() {
        let mut tessellator = SurfaceTessellator::new();
        tessellator.register(SurfaceKind::Cone, Box::new(DefaultTessellationStrategy));
        assert_eq!(format!("{:?}", tessellator), "SurfaceTessellator { overrides: [Cone] }");
    }
}
