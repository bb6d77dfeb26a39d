use serde::{Deserialize, Serialize};

use crate::Vector3;

/// Axis-aligned bounding box in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb3 {
    pub min: Vector3,
    pub max: Vector3,
}

impl Aabb3 {
    pub fn new(min: Vector3, max: Vector3) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: &[Vector3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut aabb = Self::new(*first, *first);
        for p in rest {
            aabb.expand_by_point(p);
        }
        Some(aabb)
    }

    /// Bounding box of a flat `[x0, y0, z0, x1, ...]` buffer.
    pub fn from_flat(positions: &[f64]) -> Option<Self> {
        let mut chunks = positions.chunks_exact(3);
        let first = chunks.next()?;
        let mut aabb = Self::new(
            Vector3::new(first[0], first[1], first[2]),
            Vector3::new(first[0], first[1], first[2]),
        );
        for c in chunks {
            aabb.expand_by_point(&Vector3::new(c[0], c[1], c[2]));
        }
        Some(aabb)
    }

    pub fn expand_by_point(&mut self, p: &Vector3) -> &mut Self {
        self.min.min(p);
        self.max.max(p);
        self
    }

    pub fn center(&self) -> Vector3 {
        (self.min + self.max) * 0.5
    }

    pub fn extents(&self) -> Vector3 {
        self.max - self.min
    }

    pub fn contains_point(&self, p: &Vector3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    pub fn merge(&self, other: &Self) -> Self {
        let mut out = *self;
        out.min.min(&other.min);
        out.max.max(&other.max);
        out
    }

    pub fn expand(&self, amount: f64) -> Self {
        let offset = Vector3::splat(amount);
        Self {
            min: self.min - offset,
            max: self.max + offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let pts = vec![
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(-1.0, 5.0, 0.0),
            Vector3::new(3.0, -1.0, 2.0),
        ];
        let aabb = Aabb3::from_points(&pts).unwrap();
        assert_eq!(aabb.min, Vector3::new(-1.0, -1.0, 0.0));
        assert_eq!(aabb.max, Vector3::new(3.0, 5.0, 3.0));
        assert!(Aabb3::from_points(&[]).is_none());
    }

    #[test]
    fn test_from_flat() {
        let aabb = Aabb3::from_flat(&[1.0, 2.0, 3.0, -1.0, 5.0, 0.0]).unwrap();
        assert_eq!(aabb.min, Vector3::new(-1.0, 2.0, 0.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 5.0, 3.0));
        assert!(Aabb3::from_flat(&[1.0, 2.0]).is_none());
    }

    #[test]
    fn test_contains_point() {
        let aabb = Aabb3::new(Vector3::ZERO, Vector3::ONE);
        assert!(aabb.contains_point(&Vector3::splat(0.5)));
        assert!(!aabb.contains_point(&Vector3::new(1.5, 0.5, 0.5)));
    }

    #[test]
    fn test_intersects_and_merge() {
        let a = Aabb3::new(Vector3::ZERO, Vector3::splat(2.0));
        let b = Aabb3::new(Vector3::ONE, Vector3::splat(3.0));
        let c = Aabb3::new(Vector3::splat(5.0), Vector3::splat(6.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        let m = a.merge(&c);
        assert_eq!(m.min, Vector3::ZERO);
        assert_eq!(m.max, Vector3::splat(6.0));
        assert_eq!(m.center(), Vector3::splat(3.0));
    }
}
