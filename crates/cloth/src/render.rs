//! Renderable triangle snapshot.
//!
//! The rasterizer only sees [`RenderTriangle`]s: current corner positions, a
//! shade and a base color. The snapshot is recomputed from entity flags and
//! positions on every call; nothing is cached between frames.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tatter_config::RenderConfig;

use crate::cutting;
use crate::geometry;
use crate::mesh::ClothMesh;
use crate::types::Triangle;

/// A triangle ready for drawing.
///
/// `#[repr(C)]` and `Pod`, so a whole snapshot can be uploaded as one
/// byte slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct RenderTriangle {
    /// Current corner positions
    pub positions: [[f32; 2]; 3],
    /// Brightness in `[ambient, 1]`
    pub shade: f32,
    /// Base color (linear RGB)
    pub color: [f32; 3],
}

impl RenderTriangle {
    pub fn p1(&self) -> Vec2 {
        Vec2::from_array(self.positions[0])
    }

    pub fn p2(&self) -> Vec2 {
        Vec2::from_array(self.positions[1])
    }

    pub fn p3(&self) -> Vec2 {
        Vec2::from_array(self.positions[2])
    }

    /// Base color scaled by shade.
    pub fn shaded_color(&self) -> [f32; 3] {
        self.color.map(|c| c * self.shade)
    }

    /// Reinterpret a snapshot as raw bytes for upload.
    pub fn as_bytes(triangles: &[RenderTriangle]) -> &[u8] {
        bytemuck::cast_slice(triangles)
    }
}

/// Brightness for a triangle with signed cross product `cross`.
///
/// The sign is discarded; a triangle at its undeformed area is fully lit and
/// one collapsed to a line drops to `ambient`. Triangles without a usable
/// rest area are drawn fully lit.
pub fn shade(cross: f32, rest_cross: f32, ambient: f32) -> f32 {
    let ambient = ambient.clamp(0.0, 1.0);
    let ratio = if rest_cross > f32::EPSILON {
        (cross.abs() / rest_cross).min(1.0)
    } else {
        1.0
    };
    let ratio = if ratio.is_finite() { ratio } else { 1.0 };
    ambient + (1.0 - ambient) * ratio
}

fn render_triangle(mesh: &ClothMesh, triangle: &Triangle, config: &RenderConfig) -> Option<RenderTriangle> {
    let positions = mesh.triangle_positions(triangle)?;
    if cutting::exceeds_threshold(&positions, config.tear_threshold) {
        return None;
    }
    let [p1, p2, p3] = positions;
    let cross = geometry::triangle_cross(p1, p2, p3);
    Some(RenderTriangle {
        positions: positions.map(|p| p.to_array()),
        shade: shade(cross, triangle.rest_cross, config.ambient_shade),
        color: triangle.color,
    })
}

/// Every active, untorn triangle in id order.
pub fn renderable_triangles<'a>(
    mesh: &'a ClothMesh,
    config: &'a RenderConfig,
) -> impl Iterator<Item = RenderTriangle> + 'a {
    mesh.triangles
        .iter()
        .filter(|t| t.active)
        .filter_map(move |t| render_triangle(mesh, t, config))
}
