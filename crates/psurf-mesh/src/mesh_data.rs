use psurf_core::traits::{BoundingBox, Validate};
use psurf_core::{KernelError, Result};
use psurf_math::{Aabb3, Vector2, Vector3};

/// Indexed triangle list in flat buffers, ready to upload as vertex attributes.
///
/// `positions` and `normals` hold three values per vertex, `uvs` two, and
/// every three `indices` form one triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceMeshData {
    pub positions: Vec<f64>,
    pub normals: Vec<f64>,
    pub uvs: Vec<f64>,
    pub indices: Vec<u32>,
}

impl SurfaceMeshData {
    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices * 3),
            normals: Vec::with_capacity(vertices * 3),
            uvs: Vec::with_capacity(vertices * 2),
            indices: Vec::with_capacity(triangles * 3),
        }
    }

    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Append one vertex and return its index.
    pub fn push_vertex(&mut self, position: &Vector3, normal: &Vector3, uv: &Vector2) -> u32 {
        let index = self.vertex_count() as u32;
        self.positions.extend_from_slice(&position.to_array());
        self.normals.extend_from_slice(&normal.to_array());
        self.uvs.extend_from_slice(&uv.to_array());
        index
    }

    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    pub fn position(&self, index: usize) -> Option<Vector3> {
        let p = self.positions.get(index * 3..index * 3 + 3)?;
        Some(Vector3::new(p[0], p[1], p[2]))
    }

    pub fn normal(&self, index: usize) -> Option<Vector3> {
        let n = self.normals.get(index * 3..index * 3 + 3)?;
        Some(Vector3::new(n[0], n[1], n[2]))
    }

    pub fn uv(&self, index: usize) -> Option<Vector2> {
        let t = self.uvs.get(index * 2..index * 2 + 2)?;
        Some(Vector2::new(t[0], t[1]))
    }

    /// Vertex indices of triangle `index`.
    pub fn triangle(&self, index: usize) -> Option<[u32; 3]> {
        let t = self.indices.get(index * 3..index * 3 + 3)?;
        Some([t[0], t[1], t[2]])
    }

    /// Merge another mesh into this one, offsetting indices appropriately.
    pub fn merge(&mut self, other: &SurfaceMeshData) {
        let offset = self.vertex_count() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices.extend(other.indices.iter().map(|&i| i + offset));
    }

    /// Axis-aligned bounds of all positions, or `None` for an empty mesh.
    pub fn aabb(&self) -> Option<Aabb3> {
        Aabb3::from_flat(&self.positions)
    }
}

impl BoundingBox for SurfaceMeshData {
    type Point = Vector3;

    /// An empty mesh reports a degenerate box at the origin.
    fn bounding_box(&self) -> (Vector3, Vector3) {
        match self.aabb() {
            Some(b) => (b.min, b.max),
            None => (Vector3::ZERO, Vector3::ZERO),
        }
    }
}

impl Validate for SurfaceMeshData {
    fn validate(&self) -> Result<()> {
        if self.positions.len() % 3 != 0 {
            return Err(KernelError::InvalidMesh(format!(
                "position buffer length {} is not a multiple of 3",
                self.positions.len()
            )));
        }
        let n = self.vertex_count();
        if self.normals.len() != n * 3 {
            return Err(KernelError::InvalidMesh(format!(
                "expected {} normal values for {} vertices, got {}",
                n * 3,
                n,
                self.normals.len()
            )));
        }
        if self.uvs.len() != n * 2 {
            return Err(KernelError::InvalidMesh(format!(
                "expected {} uv values for {} vertices, got {}",
                n * 2,
                n,
                self.uvs.len()
            )));
        }
        if self.indices.len() % 3 != 0 {
            return Err(KernelError::InvalidMesh(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= n) {
            return Err(KernelError::InvalidMesh(format!(
                "index {bad} out of bounds for {n} vertices"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_triangle() -> SurfaceMeshData {
        let mut mesh = SurfaceMeshData::default();
        let n = Vector3::Z;
        let a = mesh.push_vertex(&Vector3::new(0.0, 0.0, 0.0), &n, &Vector2::new(0.0, 0.0));
        let b = mesh.push_vertex(&Vector3::new(1.0, 0.0, 0.0), &n, &Vector2::new(1.0, 0.0));
        let c = mesh.push_vertex(&Vector3::new(0.0, 1.0, 0.0), &n, &Vector2::new(0.0, 1.0));
        mesh.push_triangle(a, b, c);
        mesh
    }

    #[test]
    fn test_vertex_and_triangle_count() {
        let mesh = single_triangle();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.positions.len(), 9);
        assert_eq!(mesh.uvs.len(), 6);
        assert_eq!(mesh.triangle(0), Some([0, 1, 2]));
        assert_eq!(mesh.position(1), Some(Vector3::X));
        assert_eq!(mesh.uv(2), Some(Vector2::new(0.0, 1.0)));
        assert_eq!(mesh.position(3), None);
        mesh.validate().unwrap();
    }

    #[test]
    fn test_merge() {
        let mut a = single_triangle();
        let b = single_triangle();
        a.merge(&b);
        assert_eq!(a.vertex_count(), 6);
        assert_eq!(a.triangle_count(), 2);
        // Second triangle indices should be offset by 3
        assert_eq!(a.triangle(1), Some([3, 4, 5]));
        a.validate().unwrap();
    }

    #[test]
    fn test_bounding_box() {
        let mesh = single_triangle();
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(max, Vector3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = SurfaceMeshData::default();
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.is_empty());
        assert!(mesh.aabb().is_none());
        assert_eq!(mesh.bounding_box(), (Vector3::ZERO, Vector3::ZERO));
        mesh.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_bad_buffers() {
        let mut mesh = single_triangle();
        mesh.indices[2] = 7;
        assert!(matches!(mesh.validate(), Err(KernelError::InvalidMesh(_))));

        let mut mesh = single_triangle();
        mesh.indices.push(0);
        assert!(mesh.validate().is_err());

        let mut mesh = single_triangle();
        mesh.normals.pop();
        assert!(mesh.validate().is_err());
    }
}
