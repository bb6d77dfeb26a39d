//! psurf tessellation: analytic surfaces to flat indexed triangle meshes.

pub mod builder;
pub mod mesh_data;
pub mod params;
pub mod strategy;
pub mod tessellator;

pub use builder::{CapSide, MeshBuilder};
pub use mesh_data::SurfaceMeshData;
pub use params::{TessellationParams, TessellationQuality};
pub use strategy::{
    ConeTessellationStrategy, DefaultTessellationStrategy, SphereTessellationStrategy,
    TessellationStrategy,
};
pub use tessellator::SurfaceTessellator;
