//! Edge split (subdivision) for refinement.
//!
//! Splitting an edge creates one midpoint point and replaces the edge's
//! constraint with two half-length constraints:
//!
//! ```text
//!     Before:          After:
//!     A-------B        A---M---B
//! ```
//!
//! The midpoint is registered under the edge key, so the triangle on the
//! other side of AB reuses M when it is subdivided instead of creating a
//! second, disconnected vertex. The parent constraint is deactivated, never
//! removed, so any id still pointing at it stays valid.

use glam::Vec2;
use tracing::trace;

use crate::mesh::ClothMesh;
use crate::types::{ConstraintId, PointId};

/// Result of splitting (or resolving) an edge.
#[derive(Debug, Clone)]
pub struct SplitResult {
    /// Midpoint of the edge, new or reused
    pub midpoint: PointId,
    /// Whether this call created the midpoint
    pub created: bool,
    /// Half-edge constraints created by this call
    pub new_constraints: Vec<ConstraintId>,
}

/// Rest length of the edge `a`-`b`, falling back to the current distance
/// when the pair has no constraint.
pub fn edge_rest_length(mesh: &ClothMesh, a: PointId, b: PointId) -> Option<f32> {
    if let Some(constraint) = mesh.constraint_between(a, b) {
        return Some(constraint.rest_length);
    }
    Some(mesh.point(a)?.position.distance(mesh.point(b)?.position))
}

/// Check if an edge can be used for subdivision.
///
/// An already-split edge is always usable. Otherwise the edge must not be
/// shorter than `min_edge_length`, which bounds the smallest feature size
/// independently of triangle generation.
pub fn can_split_edge(mesh: &ClothMesh, a: PointId, b: PointId, min_edge_length: f32) -> bool {
    if mesh.registry.midpoint(a, b).is_some() {
        return true;
    }
    edge_rest_length(mesh, a, b).is_some_and(|len| len >= min_edge_length)
}

/// Position and previous position for a new midpoint.
///
/// Averaging both keeps the implicit velocity of the edge.
pub fn calculate_split_position(mesh: &ClothMesh, a: PointId, b: PointId) -> Option<(Vec2, Vec2)> {
    let pa = mesh.point(a)?;
    let pb = mesh.point(b)?;
    Some((
        (pa.position + pb.position) * 0.5,
        (pa.previous + pb.previous) * 0.5,
    ))
}

/// Split the edge `a`-`b`, or return its existing midpoint.
///
/// Returns None if either endpoint doesn't exist.
pub fn split_edge(mesh: &mut ClothMesh, a: PointId, b: PointId) -> Option<SplitResult> {
    if let Some(midpoint) = mesh.registry.midpoint(a, b) {
        return Some(SplitResult {
            midpoint,
            created: false,
            new_constraints: Vec::new(),
        });
    }

    let (position, previous) = calculate_split_position(mesh, a, b)?;
    let pinned = mesh.point(a)?.pinned && mesh.point(b)?.pinned;

    // Halves inherit the parent's active flag so a cut edge stays cut.
    let parent = mesh.registry.constraint(a, b);
    let (rest_length, active) = match parent.and_then(|id| mesh.constraint(id)) {
        Some(constraint) => (constraint.rest_length, constraint.active),
        None => (edge_rest_length(mesh, a, b)?, true),
    };

    let midpoint = mesh.add_point(position, pinned);
    mesh.points[midpoint.index()].previous = previous;
    mesh.registry.insert_midpoint(a, b, midpoint);

    if let Some(parent) = parent {
        let constraint = &mut mesh.constraints[parent.index()];
        constraint.active = false;
        constraint.midpoint = Some(midpoint);
    }

    let half = rest_length * 0.5;
    let new_constraints = vec![
        mesh.insert_constraint(a, midpoint, half, active),
        mesh.insert_constraint(midpoint, b, half, active),
    ];

    trace!(
        "split edge {:?}-{:?}: midpoint {:?}, parent {:?}",
        a, b, midpoint, parent
    );

    Some(SplitResult {
        midpoint,
        created: true,
        new_constraints,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment() -> (ClothMesh, PointId, PointId) {
        let mut mesh = ClothMesh::empty();
        let a = mesh.add_point(Vec2::ZERO, false);
        let b = mesh.add_point(Vec2::new(10.0, 0.0), false);
        mesh.add_constraint(a, b);
        (mesh, a, b)
    }

    #[test]
    fn test_split_creates_midpoint_and_halves() {
        let (mut mesh, a, b) = segment();
        let result = split_edge(&mut mesh, a, b).unwrap();

        assert!(result.created);
        assert_eq!(result.new_constraints.len(), 2);
        let mid = mesh.point(result.midpoint).unwrap();
        assert_eq!(mid.position, Vec2::new(5.0, 0.0));

        let parent = mesh.constraint_between(a, b).unwrap();
        assert!(!parent.active);
        assert_eq!(parent.midpoint, Some(result.midpoint));

        for id in result.new_constraints {
            let half = mesh.constraint(id).unwrap();
            assert!(half.active);
            assert!((half.rest_length - 5.0).abs() < 1e-6);
        }
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_second_split_reuses_midpoint() {
        let (mut mesh, a, b) = segment();
        let first = split_edge(&mut mesh, a, b).unwrap();
        let second = split_edge(&mut mesh, b, a).unwrap();

        assert_eq!(first.midpoint, second.midpoint);
        assert!(!second.created);
        assert!(second.new_constraints.is_empty());
        assert_eq!(mesh.point_count(), 3);
        assert_eq!(mesh.constraint_count(), 3);
    }

    #[test]
    fn test_half_rest_length_comes_from_parent() {
        let (mut mesh, a, b) = segment();
        // Stretch the edge; halves must still use half the original rest length.
        mesh.set_point_position(b, Vec2::new(30.0, 0.0));
        let result = split_edge(&mut mesh, a, b).unwrap();
        let half = mesh.constraint(result.new_constraints[0]).unwrap();
        assert!((half.rest_length - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_cut_edge_splits_into_inactive_halves() {
        let (mut mesh, a, b) = segment();
        mesh.constraints[0].active = false;
        let result = split_edge(&mut mesh, a, b).unwrap();
        for id in result.new_constraints {
            assert!(!mesh.constraint(id).unwrap().active);
        }
    }

    #[test]
    fn test_midpoint_keeps_velocity_and_pinning() {
        let mut mesh = ClothMesh::empty();
        let a = mesh.add_point(Vec2::ZERO, true);
        let b = mesh.add_point(Vec2::new(10.0, 0.0), true);
        let c = mesh.add_point(Vec2::new(0.0, 10.0), false);
        mesh.points[c.index()].previous = Vec2::new(0.0, 8.0);

        let pinned_mid = split_edge(&mut mesh, a, b).unwrap().midpoint;
        assert!(mesh.point(pinned_mid).unwrap().pinned);

        let free_mid = split_edge(&mut mesh, a, c).unwrap().midpoint;
        let free = mesh.point(free_mid).unwrap();
        assert!(!free.pinned);
        assert_eq!(free.velocity(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_min_edge_length() {
        let (mut mesh, a, b) = segment();
        assert!(can_split_edge(&mesh, a, b, 10.0));
        assert!(!can_split_edge(&mesh, a, b, 10.5));

        split_edge(&mut mesh, a, b);
        // Existing midpoints are always reusable.
        assert!(can_split_edge(&mesh, a, b, 100.0));
    }

    #[test]
    fn test_split_missing_point() {
        let (mut mesh, a, _) = segment();
        assert!(split_edge(&mut mesh, a, PointId(77)).is_none());
    }
}
