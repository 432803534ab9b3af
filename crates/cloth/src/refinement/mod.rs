//! Adaptive refinement along a hover path.
//!
//! Triangles whose centroid passes close to the pointer path are split into
//! four (three corner triangles plus the centre triangle over the three edge
//! midpoints), one generation deeper than their parent:
//!
//! ```text
//!          C                     C
//!         / \                   / \
//!        /   \                 /   \
//!       /     \     ->      Mca---Mbc
//!      /       \            / \   / \
//!     /         \          /   \ /   \
//!    A-----------B        A----Mab----B
//! ```
//!
//! ## Fixed Point
//!
//! Children are re-examined in the same call, so a single call refines the
//! area under the path all the way down to the generation limit. Calling again
//! with the same path (and no step in between) finds nothing eligible and
//! changes nothing.
//!
//! ## Determinism
//!
//! Triangles are visited in ascending id order and children are appended in
//! a fixed corner order, so the same mesh and path always yield the same ids.

mod edge_split;

pub use edge_split::{
    calculate_split_position, can_split_edge, edge_rest_length, split_edge, SplitResult,
};

use glam::Vec2;
use tatter_config::RefineConfig;
use tracing::{debug, trace};

use crate::constants::{CHILDREN_PER_SPLIT, GENERATION_LIMIT};
use crate::geometry;
use crate::mesh::ClothMesh;
use crate::types::TriangleId;

/// Statistics from a refinement call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RefineStats {
    /// Parent triangles replaced by four children
    pub triangles_split: usize,
    /// Midpoints created
    pub points_created: usize,
    /// Half-edge and midpoint-to-midpoint constraints created
    pub constraints_created: usize,
    /// Child triangles created
    pub triangles_created: usize,
}

impl RefineStats {
    pub fn is_empty(&self) -> bool {
        self.triangles_split == 0
    }
}

/// Subdivide every active triangle near `path` until none is eligible.
///
/// A triangle is eligible when its generation is below
/// `config.max_generation` (capped at [`GENERATION_LIMIT`]), its centroid is
/// strictly closer than `config.radius` to some segment of the path, and each
/// of its edges can be split. Paths with fewer than two samples have no
/// segments and refine nothing.
pub fn refine_along(mesh: &mut ClothMesh, path: &[Vec2], config: &RefineConfig) -> RefineStats {
    let mut stats = RefineStats::default();
    if path.len() < 2 {
        trace!("refine_along: degenerate path ({} samples)", path.len());
        return stats;
    }

    let max_generation = config.max_generation.min(GENERATION_LIMIT);
    let (points_before, constraints_before) = (mesh.point_count(), mesh.constraint_count());

    // Every round rescans all active triangles: a neighbour's split can
    // make an edge usable that blocked a triangle in an earlier round.
    loop {
        let selected: Vec<TriangleId> = mesh
            .triangles
            .iter()
            .filter(|t| t.active)
            .map(|t| t.id)
            .filter(|&id| is_eligible(mesh, id, path, config, max_generation))
            .collect();
        if selected.is_empty() {
            break;
        }
        trace!("refine_along: {} triangles selected", selected.len());

        for id in selected {
            if let Some(children) = subdivide_triangle(mesh, id) {
                stats.triangles_split += 1;
                stats.triangles_created += children.len();
            }
        }
    }

    stats.points_created = mesh.point_count() - points_before;
    stats.constraints_created = mesh.constraint_count() - constraints_before;

    if !stats.is_empty() {
        debug!("refine_along: {:?}", stats);
    }

    #[cfg(debug_assertions)]
    if !stats.is_empty() {
        if let Err(e) = mesh.validate() {
            tracing::error!("MESH VALIDATION FAILED after refinement: {}", e);
        }
    }

    stats
}

/// Whether triangle `id` should be subdivided for this path.
fn is_eligible(
    mesh: &ClothMesh,
    id: TriangleId,
    path: &[Vec2],
    config: &RefineConfig,
    max_generation: u8,
) -> bool {
    let Some(triangle) = mesh.triangle(id) else {
        return false;
    };
    if !triangle.active || triangle.generation >= max_generation {
        return false;
    }
    let Some(center) = mesh.triangle_centroid(triangle) else {
        return false;
    };
    if !geometry::within_path(center, path, config.radius) {
        return false;
    }
    triangle
        .edges()
        .iter()
        .all(|&(a, b)| can_split_edge(mesh, a, b, config.min_edge_length))
}

/// Replace a triangle with its four children.
///
/// Returns the child ids in corner order (A, B, C, centre), or None if the
/// triangle is inactive or references a missing point.
pub fn subdivide_triangle(
    mesh: &mut ClothMesh,
    id: TriangleId,
) -> Option<[TriangleId; CHILDREN_PER_SPLIT]> {
    let parent = mesh.triangle(id)?.clone();
    if !parent.active {
        return None;
    }
    let [a, b, c] = parent.points;

    let mab = split_edge(mesh, a, b)?.midpoint;
    let mbc = split_edge(mesh, b, c)?.midpoint;
    let mca = split_edge(mesh, c, a)?.midpoint;

    // Inner edges; registered so a neighbour sharing a midpoint pair reuses them.
    mesh.add_constraint(mab, mbc);
    mesh.add_constraint(mbc, mca);
    mesh.add_constraint(mca, mab);

    let generation = parent.generation + 1;
    let rest_cross = parent.rest_cross * 0.25;
    let color = parent.color;
    let children = [
        mesh.insert_triangle([a, mab, mca], generation, color, rest_cross),
        mesh.insert_triangle([mab, b, mbc], generation, color, rest_cross),
        mesh.insert_triangle([mca, mbc, c], generation, color, rest_cross),
        mesh.insert_triangle([mab, mbc, mca], generation, color, rest_cross),
    ];

    mesh.triangles[id.index()].active = false;
    trace!(
        "subdivided {:?} (gen {}) into {:?}",
        id, parent.generation, children
    );

    Some(children)
}
