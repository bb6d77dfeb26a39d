//! psurf geometry: analytic parametric surfaces over clamped UV domains.

pub mod surface;

pub use surface::{
    ConeSurface, CoordinateSurface, ParamRange, SphereSurface, Surface, SurfaceKind, SurfaceVariant,
    UvDomain,
};
