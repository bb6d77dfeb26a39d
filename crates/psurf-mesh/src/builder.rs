//! Grid sampling and cap synthesis shared by the tessellation strategies.

use psurf_core::traits::Validate;
use psurf_core::Result;
use psurf_geometry::{Surface, UvDomain};
use psurf_math::{Vector2, Vector3};

use crate::{SurfaceMeshData, TessellationParams};

/// The boundary row of the sample grid that a cap closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapSide {
    /// Row `j = 0`, at the start of the `v` domain.
    VMin,
    /// Row `j = v_segments`, at the end of the `v` domain.
    VMax,
}

/// Collects vertex/index data for one tessellation call.
///
/// A builder is created per call and consumed by [`finish`](MeshBuilder::finish),
/// so concurrent calls never share buffers.
///
/// Grid vertex `(i, j)` sits at `u = u_start + u_span * i / u_segments` and
/// `v = v_start + v_span * j / v_segments` over the surface's *current* domain
/// and has index `j * (u_segments + 1) + i`. Each quad with corners
/// `a = (i, j)`, `b = (i+1, j)`, `c = (i+1, j+1)`, `d = (i, j+1)` becomes the
/// triangles `(a, d, b)` and `(b, d, c)`.
pub struct MeshBuilder<'a> {
    surface: &'a dyn Surface,
    domain: UvDomain,
    u_segments: usize,
    v_segments: usize,
    mesh: SurfaceMeshData,
}

impl<'a> MeshBuilder<'a> {
    pub fn new(surface: &'a dyn Surface, params: &TessellationParams) -> Result<Self> {
        params.validate()?;
        let (u_segments, v_segments) = (params.u_segments as usize, params.v_segments as usize);
        Ok(Self {
            surface,
            domain: *surface.domain(),
            u_segments,
            v_segments,
            mesh: SurfaceMeshData::with_capacity(
                params.max_vertex_count() as usize,
                2 * u_segments * v_segments + 2 * u_segments,
            ),
        })
    }

    pub fn surface(&self) -> &'a dyn Surface {
        self.surface
    }

    /// The domain snapshot the grid is sampled over.
    pub fn domain(&self) -> &UvDomain {
        &self.domain
    }

    pub fn u_segments(&self) -> usize {
        self.u_segments
    }

    pub fn v_segments(&self) -> usize {
        self.v_segments
    }

    /// Index of grid vertex `(i, j)`.
    pub fn grid_index(&self, i: usize, j: usize) -> u32 {
        (j * (self.u_segments + 1) + i) as u32
    }

    /// Surface parameter of grid column `i`.
    pub fn u_at(&self, i: usize) -> f64 {
        self.domain.u.at(i as f64 / self.u_segments as f64)
    }

    /// Surface parameter of grid row `j`.
    pub fn v_at(&self, j: usize) -> f64 {
        self.domain.v.at(j as f64 / self.v_segments as f64)
    }

    /// Sample the surface on the full grid and emit two triangles per quad.
    pub fn grid(&mut self) -> &mut Self {
        let (nu, nv) = (self.u_segments, self.v_segments);
        for j in 0..=nv {
            let t = j as f64 / nv as f64;
            let v = self.v_at(j);
            for i in 0..=nu {
                let s = i as f64 / nu as f64;
                let uv = Vector2::new(self.u_at(i), v);
                let p = self.surface.point_at(&uv);
                let n = self.surface.normal_at(&uv);
                self.mesh.push_vertex(&p, &n, &Vector2::new(s, t));
            }
        }

        for j in 0..nv {
            for i in 0..nu {
                let a = self.grid_index(i, j);
                let b = self.grid_index(i + 1, j);
                let c = self.grid_index(i + 1, j + 1);
                let d = self.grid_index(i, j + 1);
                self.mesh.push_triangle(a, d, b);
                self.mesh.push_triangle(b, d, c);
            }
        }
        self
    }

    fn row(&self, side: CapSide) -> usize {
        match side {
            CapSide::VMin => 0,
            CapSide::VMax => self.v_segments,
        }
    }

    /// Fan from `center` over a ring of `u_segments + 1` vertices, wound to
    /// match the grid triangles that share the ring's edges.
    fn fan(&mut self, side: CapSide, center: u32, ring: impl Fn(usize) -> u32) {
        for i in 0..self.u_segments {
            let (r0, r1) = (ring(i), ring(i + 1));
            match side {
                CapSide::VMin => self.mesh.push_triangle(r0, r1, center),
                CapSide::VMax => self.mesh.push_triangle(r1, r0, center),
            }
        }
    }

    /// Close a grid boundary row with one new vertex and a fan over the
    /// existing row vertices. Used where the row already collapses onto
    /// `position` (a pole), so no ring needs duplicating.
    pub fn fan_to_row(&mut self, side: CapSide, position: &Vector3, normal: &Vector3, uv: &Vector2) -> &mut Self {
        let row = self.row(side);
        let center = self.mesh.push_vertex(position, normal, uv);
        let stride = self.u_segments + 1;
        let first = (row * stride) as u32;
        self.fan(side, center, |i| first + i as u32);
        log::trace!("fan cap on row {} around vertex {}", row, center);
        self
    }

    /// Close a grid boundary row with a flat disk: a center vertex plus a copy
    /// of the row carrying the disk `normal`, joined by a fan.
    ///
    /// Disk UVs project the angle onto the unit square:
    /// `(0.5 + 0.5 cos(u), 0.5 + 0.5 sin(u))`, with the center at `(0.5, 0.5)`.
    pub fn disk(&mut self, side: CapSide, center: &Vector3, normal: &Vector3) -> &mut Self {
        let row = self.row(side);
        let center_index = self.mesh.push_vertex(center, normal, &Vector2::new(0.5, 0.5));
        let ring_start = center_index + 1;
        for i in 0..=self.u_segments {
            let grid = self.grid_index(i, row) as usize;
            let p = self.mesh.position(grid).unwrap_or(*center);
            let (sin_u, cos_u) = self.u_at(i).sin_cos();
            self.mesh
                .push_vertex(&p, normal, &Vector2::new(0.5 + 0.5 * cos_u, 0.5 + 0.5 * sin_u));
        }
        self.fan(side, center_index, |i| ring_start + i as u32);
        log::trace!("disk cap on row {} around vertex {}", row, center_index);
        self
    }

    pub fn finish(self) -> SurfaceMeshData {
        self.mesh
    }
}
