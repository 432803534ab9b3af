//! Tear detection.
//!
//! A triangle with any edge longer than the tear threshold is hidden for the
//! frame. Nothing is deactivated: the constraints keep pulling the edges back
//! toward rest length, and once they relax under the threshold the triangle
//! is drawn again. Permanent removal is the job of cutting.

use glam::Vec2;

use crate::mesh::ClothMesh;
use crate::types::{Triangle, TriangleId};

/// Whether a triangle with corners at `positions` is overstretched.
pub fn exceeds_threshold(positions: &[Vec2; 3], tear_threshold: f32) -> bool {
    let [p1, p2, p3] = *positions;
    p1.distance(p2) > tear_threshold
        || p2.distance(p3) > tear_threshold
        || p3.distance(p1) > tear_threshold
}

pub fn is_torn(mesh: &ClothMesh, triangle: &Triangle, tear_threshold: f32) -> bool {
    mesh.triangle_positions(triangle)
        .is_some_and(|positions| exceeds_threshold(&positions, tear_threshold))
}

/// Active triangles currently torn.
pub fn torn_triangles(mesh: &ClothMesh, tear_threshold: f32) -> impl Iterator<Item = TriangleId> + '_ {
    mesh.triangles
        .iter()
        .filter(|t| t.active)
        .filter(move |t| is_torn(mesh, t, tear_threshold))
        .map(|t| t.id)
}
