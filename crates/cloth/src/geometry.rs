//! Planar geometry helpers shared by refinement, cutting and rendering.

use glam::Vec2;

/// Signed 2D cross product of two vectors.
pub fn cross(u: Vec2, v: Vec2) -> f32 {
    u.perp_dot(v)
}

/// Signed cross product of the edges `p2 - p1` and `p3 - p1`.
pub fn triangle_cross(p1: Vec2, p2: Vec2, p3: Vec2) -> f32 {
    cross(p2 - p1, p3 - p1)
}

pub fn centroid(p1: Vec2, p2: Vec2, p3: Vec2) -> Vec2 {
    (p1 + p2 + p3) / 3.0
}

/// Distance from `p` to the closed segment `a`-`b`.
///
/// A zero-length segment degrades to the distance to `a`.
pub fn point_segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Minimum distance from `p` to any segment of `path`.
///
/// Returns `None` when the path has fewer than two samples and therefore
/// no segments.
pub fn polyline_distance(p: Vec2, path: &[Vec2]) -> Option<f32> {
    path.windows(2)
        .map(|seg| point_segment_distance(p, seg[0], seg[1]))
        .reduce(f32::min)
}

/// Whether `p` lies strictly inside `radius` of the path.
///
/// A non-positive (or NaN) radius matches nothing.
pub fn within_path(p: Vec2, path: &[Vec2], radius: f32) -> bool {
    if !(radius > 0.0) {
        return false;
    }
    polyline_distance(p, path).is_some_and(|d| d < radius)
}
