//! Construction of the base cloth grid.

use glam::Vec2;
use tatter_config::GridConfig;
use tracing::debug;

use super::ClothMesh;
use crate::constants::CHECKER_DARKEN;
use crate::types::{MeshError, PointId};

impl ClothMesh {
    /// Build a `columns × rows` grid of points at uniform spacing.
    ///
    /// Every grid cell gets two triangles split along the diagonal from its
    /// top-left to its bottom-right corner. Horizontal, vertical and diagonal
    /// edges are all constrained; the diagonals resist shear.
    pub fn new(config: &GridConfig) -> Result<Self, MeshError> {
        if config.columns == 0 || config.rows == 0 {
            return Err(MeshError::EmptyGrid);
        }
        if !(config.spacing.is_finite() && config.spacing > 0.0) {
            return Err(MeshError::InvalidSpacing(config.spacing));
        }
        let count = config.point_count();
        if count > u32::MAX as usize {
            return Err(MeshError::TooManyPoints(count));
        }

        let (columns, rows) = (config.columns, config.rows);
        let origin = Vec2::from_array(config.origin);
        let mut mesh = ClothMesh::empty();
        mesh.points.reserve(count);

        for row in 0..rows {
            for col in 0..columns {
                let position = origin + Vec2::new(col as f32, row as f32) * config.spacing;
                mesh.add_point(position, config.pin_top_row && row == 0);
            }
        }

        let at = |col: u32, row: u32| PointId(row * columns + col);

        // Structural edges, row-major: right neighbour then lower neighbour.
        for row in 0..rows {
            for col in 0..columns {
                if col + 1 < columns {
                    mesh.add_constraint(at(col, row), at(col + 1, row));
                }
                if row + 1 < rows {
                    mesh.add_constraint(at(col, row), at(col, row + 1));
                }
            }
        }

        let rest_cross = config.spacing * config.spacing;
        for row in 0..rows.saturating_sub(1) {
            for col in 0..columns.saturating_sub(1) {
                let (p00, p10) = (at(col, row), at(col + 1, row));
                let (p01, p11) = (at(col, row + 1), at(col + 1, row + 1));

                mesh.add_constraint(p00, p11);

                let color = cell_color(config.fabric_color, col, row);
                mesh.insert_triangle([p00, p10, p11], 0, color, rest_cross);
                mesh.insert_triangle([p00, p11, p01], 0, color, rest_cross);
            }
        }

        debug!(
            "cloth grid {}x{}: {} points, {} constraints, {} triangles",
            columns,
            rows,
            mesh.point_count(),
            mesh.constraint_count(),
            mesh.triangle_count()
        );

        Ok(mesh)
    }
}

/// Checker weave: alternate cells are slightly darker.
fn cell_color(fabric: [f32; 3], col: u32, row: u32) -> [f32; 3] {
    if (col + row) % 2 == 0 {
        fabric
    } else {
        fabric.map(|c| c * CHECKER_DARKEN)
    }
}
