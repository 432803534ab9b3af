//! Core cloth entity types.
//!
//! Identifiers are indices into the arenas owned by [`crate::ClothMesh`].
//! Arenas only ever grow, so an identifier stays valid for the life of the
//! mesh even after the entity it names has been deactivated.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Type-safe point identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointId(pub u32);

/// Type-safe constraint identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConstraintId(pub u32);

/// Type-safe triangle identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TriangleId(pub u32);

impl PointId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl ConstraintId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TriangleId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Canonical key for an unordered pair of points.
///
/// The smaller id occupies the high 32 bits, so `(a, b)` and `(b, a)` map to
/// the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(pub u64);

impl EdgeKey {
    pub fn new(a: PointId, b: PointId) -> Self {
        let (lo, hi) = if a.0 <= b.0 { (a.0, b.0) } else { (b.0, a.0) };
        Self(((lo as u64) << 32) | hi as u64)
    }

    /// The two endpoints, smaller id first.
    pub fn endpoints(self) -> (PointId, PointId) {
        (PointId((self.0 >> 32) as u32), PointId(self.0 as u32))
    }
}

/// A simulated particle.
///
/// Velocity is implicit: it is the difference between `position` and
/// `previous`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Point {
    pub id: PointId,
    pub position: Vec2,
    /// Position before the last integration step
    pub previous: Vec2,
    /// Pinned points are never moved by integration or constraints
    pub pinned: bool,
}

impl Point {
    /// Create a point at rest.
    pub fn new(id: PointId, position: Vec2, pinned: bool) -> Self {
        Self {
            id,
            position,
            previous: position,
            pinned,
        }
    }

    /// Displacement over the last step.
    pub fn velocity(&self) -> Vec2 {
        self.position - self.previous
    }
}

/// A distance constraint between two points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constraint {
    pub id: ConstraintId,
    pub a: PointId,
    pub b: PointId,
    /// Target distance, fixed at creation
    pub rest_length: f32,
    /// Cleared when the constraint is cut or replaced by its two halves
    pub active: bool,
    /// Midpoint created when this edge was split
    pub midpoint: Option<PointId>,
}

impl Constraint {
    pub fn new(id: ConstraintId, a: PointId, b: PointId, rest_length: f32) -> Self {
        Self {
            id,
            a,
            b,
            rest_length,
            active: true,
            midpoint: None,
        }
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.a, self.b)
    }
}

/// A renderable face over three points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Triangle {
    pub id: TriangleId,
    /// Ordered corners; the order defines orientation
    pub points: [PointId; 3],
    pub active: bool,
    /// Subdivision depth from the base grid
    pub generation: u8,
    /// Base color (linear RGB)
    pub color: [f32; 3],
    /// Edge cross-product magnitude of the undeformed face
    pub rest_cross: f32,
}

impl Triangle {
    /// The three edges as point pairs, in corner order.
    pub fn edges(&self) -> [(PointId, PointId); 3] {
        let [a, b, c] = self.points;
        [(a, b), (b, c), (c, a)]
    }
}

/// Errors that can occur while building or validating a cloth mesh
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    #[error("Grid must have at least one column and one row")]
    EmptyGrid,
    #[error("Grid spacing must be finite and positive, got {0}")]
    InvalidSpacing(f32),
    #[error("Grid of {0} points exceeds the point id range")]
    TooManyPoints(usize),
    #[error("Dangling reference: {0}")]
    DanglingReference(String),
    #[error("Edge registry disagrees with mesh: {0}")]
    RegistryMismatch(String),
    #[error("Edge {0:?} has more than one midpoint")]
    DuplicateMidpoint(EdgeKey),
    #[error("Triangle {id:?} has generation {generation} above limit {limit}")]
    GenerationOverflow {
        id: TriangleId,
        generation: u8,
        limit: u8,
    },
    #[error("Constraint {0:?} has a non-finite or negative rest length")]
    InvalidRestLength(ConstraintId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_key_is_unordered() {
        let k1 = EdgeKey::new(PointId(3), PointId(17));
        let k2 = EdgeKey::new(PointId(17), PointId(3));
        assert_eq!(k1, k2);
        assert_eq!(k1.endpoints(), (PointId(3), PointId(17)));
    }

    #[test]
    fn test_edge_key_distinguishes_pairs() {
        assert_ne!(
            EdgeKey::new(PointId(1), PointId(2)),
            EdgeKey::new(PointId(1), PointId(3))
        );
        let key = EdgeKey::new(PointId(u32::MAX), PointId(0));
        assert_eq!(key.endpoints(), (PointId(0), PointId(u32::MAX)));
    }

    #[test]
    fn test_point_starts_at_rest() {
        let p = Point::new(PointId(0), Vec2::new(4.0, 5.0), false);
        assert_eq!(p.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_triangle_edges() {
        let tri = Triangle {
            id: TriangleId(0),
            points: [PointId(0), PointId(1), PointId(2)],
            active: true,
            generation: 0,
            color: [1.0; 3],
            rest_cross: 1.0,
        };
        assert_eq!(
            tri.edges(),
            [
                (PointId(0), PointId(1)),
                (PointId(1), PointId(2)),
                (PointId(2), PointId(0)),
            ]
        );
    }
}
