//! Cutting along a drag path, and per-frame tearing.
//!
//! Cutting is permanent: every active constraint whose centre and every
//! active triangle whose centroid falls within the cut radius of a resampled
//! path point is deactivated, and nothing ever reactivates it. Points are
//! never removed or unpinned; a point left without active constraints keeps
//! falling under gravity but belongs to no drawn triangle.
//!
//! Tearing (see [`tear`]) is the opposite: purely visual and reversible.

mod resample;
pub mod tear;

pub use resample::resample_path;
pub use tear::{exceeds_threshold, is_torn, torn_triangles};

use glam::Vec2;
use tatter_config::CutConfig;
use tracing::{debug, trace};

use crate::mesh::ClothMesh;

/// Statistics from a cut call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CutStats {
    /// Resampled points tested
    pub samples: usize,
    /// Constraints deactivated
    pub constraints_cut: usize,
    /// Triangles deactivated
    pub triangles_cut: usize,
}

impl CutStats {
    pub fn is_empty(&self) -> bool {
        self.constraints_cut == 0 && self.triangles_cut == 0
    }
}

/// Deactivate constraints and triangles near `path`.
///
/// The path is resampled at `config.resample_step` first. Paths with fewer
/// than two samples, and non-positive radii, cut nothing.
pub fn cut_along(mesh: &mut ClothMesh, path: &[Vec2], config: &CutConfig) -> CutStats {
    let samples = resample_path(path, config.resample_step);
    let mut stats = CutStats {
        samples: samples.len(),
        ..Default::default()
    };
    if samples.is_empty() || !(config.radius > 0.0) {
        trace!("cut_along: nothing to test ({} samples)", samples.len());
        return stats;
    }

    let radius_sq = config.radius * config.radius;
    let near = |p: Vec2| samples.iter().any(|s| s.distance_squared(p) < radius_sq);

    for index in 0..mesh.constraints.len() {
        let constraint = &mesh.constraints[index];
        let hit = constraint.active && mesh.constraint_center(constraint).is_some_and(near);
        if hit {
            mesh.constraints[index].active = false;
            stats.constraints_cut += 1;
            trace!("cut constraint {:?}", mesh.constraints[index].id);
        }
    }

    // Triangles are tested on their own so small remnants whose edges all
    // lie outside the radius don't survive as floating dust.
    for index in 0..mesh.triangles.len() {
        let triangle = &mesh.triangles[index];
        let hit = triangle.active && mesh.triangle_centroid(triangle).is_some_and(near);
        if hit {
            mesh.triangles[index].active = false;
            stats.triangles_cut += 1;
            trace!("cut triangle {:?}", mesh.triangles[index].id);
        }
    }

    if !stats.is_empty() {
        debug!("cut_along: {:?}", stats);
    }
    stats
}
