//! Per-surface tessellation strategies.

mod cone;
mod sphere;

use psurf_core::Result;
use psurf_geometry::Surface;

use crate::{MeshBuilder, SurfaceMeshData, TessellationParams};

pub use cone::ConeTessellationStrategy;
pub use sphere::SphereTessellationStrategy;

/// Turns a surface into a mesh.
///
/// Implementations must not keep state between calls: the same strategy may
/// tessellate many surfaces at once from different threads.
pub trait TessellationStrategy: Send + Sync {
    fn tessellate(&self, surface: &dyn Surface, params: &TessellationParams) -> Result<SurfaceMeshData>;
}

/// Uniform grid over the surface's current domain, for any surface.
///
/// `is_closed` is ignored: a bare grid has no knowledge of where caps belong.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTessellationStrategy;

impl DefaultTessellationStrategy {
    /// A builder with the grid already emitted, for strategies that add caps.
    pub fn grid<'a>(surface: &'a dyn Surface, params: &TessellationParams) -> Result<MeshBuilder<'a>> {
        let mut builder = MeshBuilder::new(surface, params)?;
        builder.grid();
        Ok(builder)
    }
}

impl TessellationStrategy for DefaultTessellationStrategy {
    fn tessellate(&self, surface: &dyn Surface, params: &TessellationParams) -> Result<SurfaceMeshData> {
        Ok(Self::grid(surface, params)?.finish())
    }
}
