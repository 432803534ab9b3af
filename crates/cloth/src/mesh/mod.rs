//! Cloth mesh: entity arenas plus the edge registry.
//!
//! The mesh is the only mutator of its points, constraints and triangles.
//! Arenas are append-only; removal is expressed through `active` flags so
//! that ids held by the registry or by other entities never dangle.

mod construction;
mod validation;

use glam::Vec2;
use tatter_config::{CutConfig, PhysicsConfig, RefineConfig, RenderConfig};
use tracing::trace;

use crate::cutting::{self, CutStats};
use crate::geometry;
use crate::integrator;
use crate::refinement::{self, RefineStats};
use crate::registry::EdgeRegistry;
use crate::render::{self, RenderTriangle};
use crate::solver;
use crate::types::{Constraint, ConstraintId, Point, PointId, Triangle, TriangleId};

/// Point-mass cloth with distance constraints and triangle faces.
#[derive(Debug, Clone, Default)]
pub struct ClothMesh {
    pub(crate) points: Vec<Point>,
    pub(crate) constraints: Vec<Constraint>,
    pub(crate) triangles: Vec<Triangle>,
    pub(crate) registry: EdgeRegistry,
}

/// Entity counts for diagnostics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MeshStats {
    pub points: usize,
    pub constraints: usize,
    pub active_constraints: usize,
    pub triangles: usize,
    pub active_triangles: usize,
    /// Deepest generation among active triangles
    pub max_generation: u8,
}

impl ClothMesh {
    /// A mesh with no entities.
    pub fn empty() -> Self {
        Self::default()
    }

    // --- Access ---

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn registry(&self) -> &EdgeRegistry {
        &self.registry
    }

    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.points.get(id.index())
    }

    pub fn constraint(&self, id: ConstraintId) -> Option<&Constraint> {
        self.constraints.get(id.index())
    }

    pub fn triangle(&self, id: TriangleId) -> Option<&Triangle> {
        self.triangles.get(id.index())
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Constraint between `a` and `b`, in either order.
    pub fn constraint_between(&self, a: PointId, b: PointId) -> Option<&Constraint> {
        self.registry
            .constraint(a, b)
            .and_then(|id| self.constraint(id))
    }

    /// Current corner positions of a triangle.
    pub fn triangle_positions(&self, triangle: &Triangle) -> Option<[Vec2; 3]> {
        let [a, b, c] = triangle.points;
        Some([
            self.point(a)?.position,
            self.point(b)?.position,
            self.point(c)?.position,
        ])
    }

    pub fn triangle_centroid(&self, triangle: &Triangle) -> Option<Vec2> {
        let [p1, p2, p3] = self.triangle_positions(triangle)?;
        Some(geometry::centroid(p1, p2, p3))
    }

    /// Current midpoint of a constraint's endpoints.
    pub fn constraint_center(&self, constraint: &Constraint) -> Option<Vec2> {
        let a = self.point(constraint.a)?.position;
        let b = self.point(constraint.b)?.position;
        Some((a + b) * 0.5)
    }

    pub fn stats(&self) -> MeshStats {
        let active_triangles = self.triangles.iter().filter(|t| t.active);
        MeshStats {
            points: self.points.len(),
            constraints: self.constraints.len(),
            active_constraints: self.constraints.iter().filter(|c| c.active).count(),
            triangles: self.triangles.len(),
            active_triangles: active_triangles.clone().count(),
            max_generation: active_triangles.map(|t| t.generation).max().unwrap_or(0),
        }
    }

    /// Largest current-length / rest-length ratio over active constraints.
    pub fn max_stretch_ratio(&self) -> f32 {
        self.constraints
            .iter()
            .filter(|c| c.active)
            .filter_map(|c| solver::stretch_ratio(&self.points, c))
            .fold(0.0, f32::max)
    }

    // --- Building ---

    /// Append a point at rest.
    pub fn add_point(&mut self, position: Vec2, pinned: bool) -> PointId {
        let id = PointId(self.points.len() as u32);
        self.points.push(Point::new(id, position, pinned));
        id
    }

    /// Constraint between `a` and `b`, created with the current distance as
    /// its rest length if the pair has none yet.
    pub fn add_constraint(&mut self, a: PointId, b: PointId) -> ConstraintId {
        if let Some(existing) = self.registry.constraint(a, b) {
            return existing;
        }
        let rest_length = match (self.point(a), self.point(b)) {
            (Some(pa), Some(pb)) => pa.position.distance(pb.position),
            _ => 0.0,
        };
        self.insert_constraint(a, b, rest_length, true)
    }

    /// Register a new constraint with an explicit rest length.
    pub(crate) fn insert_constraint(
        &mut self,
        a: PointId,
        b: PointId,
        rest_length: f32,
        active: bool,
    ) -> ConstraintId {
        let id = ConstraintId(self.constraints.len() as u32);
        let mut constraint = Constraint::new(id, a, b, rest_length);
        constraint.active = active;
        self.constraints.push(constraint);
        self.registry.insert_constraint(a, b, id);
        trace!("constraint {:?}: {:?}-{:?} rest={}", id, a, b, rest_length);
        id
    }

    /// Append a triangle, taking its undeformed shape from current positions.
    pub fn add_triangle(
        &mut self,
        points: [PointId; 3],
        generation: u8,
        color: [f32; 3],
    ) -> TriangleId {
        let rest_cross = match (
            self.point(points[0]),
            self.point(points[1]),
            self.point(points[2]),
        ) {
            (Some(p1), Some(p2), Some(p3)) => {
                geometry::triangle_cross(p1.position, p2.position, p3.position).abs()
            }
            _ => 0.0,
        };
        self.insert_triangle(points, generation, color, rest_cross)
    }

    pub(crate) fn insert_triangle(
        &mut self,
        points: [PointId; 3],
        generation: u8,
        color: [f32; 3],
        rest_cross: f32,
    ) -> TriangleId {
        let id = TriangleId(self.triangles.len() as u32);
        self.triangles.push(Triangle {
            id,
            points,
            active: true,
            generation,
            color,
            rest_cross,
        });
        id
    }

    /// Teleport a point, clearing its implicit velocity.
    ///
    /// Returns false if the id is unknown.
    pub fn set_point_position(&mut self, id: PointId, position: Vec2) -> bool {
        let Some(point) = self.points.get_mut(id.index()) else {
            return false;
        };
        point.position = position;
        point.previous = position;
        true
    }

    // --- Simulation ---

    /// One integration pass followed by `physics.iterations` solver passes.
    pub fn step(&mut self, physics: &PhysicsConfig) {
        integrator::integrate(&mut self.points, physics);
        solver::solve(&mut self.points, &self.constraints, physics.iterations);
    }

    /// Subdivide triangles near a hover path. See [`refinement::refine_along`].
    pub fn refine_along(&mut self, path: &[Vec2], config: &RefineConfig) -> RefineStats {
        refinement::refine_along(self, path, config)
    }

    /// Remove connectivity near a drag path. See [`cutting::cut_along`].
    pub fn cut_along(&mut self, path: &[Vec2], config: &CutConfig) -> CutStats {
        cutting::cut_along(self, path, config)
    }

    /// Freshly computed snapshot of every drawable triangle.
    pub fn renderable_triangles<'a>(
        &'a self,
        config: &'a RenderConfig,
    ) -> impl Iterator<Item = RenderTriangle> + 'a {
        render::renderable_triangles(self, config)
    }

    /// Active triangles currently hidden by overstretch.
    pub fn torn_triangles(&self, tear_threshold: f32) -> impl Iterator<Item = TriangleId> + '_ {
        cutting::torn_triangles(self, tear_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tatter_config::GridConfig;

    fn grid(columns: u32, rows: u32) -> ClothMesh {
        ClothMesh::new(&GridConfig::new(columns, rows, 20.0)).unwrap()
    }

    fn average_y(mesh: &ClothMesh, ids: &[PointId]) -> f32 {
        ids.iter()
            .map(|id| mesh.point(*id).unwrap().position.y)
            .sum::<f32>()
            / ids.len() as f32
    }

    #[test]
    fn test_add_constraint_is_deduplicated() {
        let mut mesh = ClothMesh::empty();
        let a = mesh.add_point(Vec2::ZERO, false);
        let b = mesh.add_point(Vec2::new(3.0, 4.0), false);

        let c1 = mesh.add_constraint(a, b);
        let c2 = mesh.add_constraint(b, a);
        assert_eq!(c1, c2);
        assert_eq!(mesh.constraint_count(), 1);
        assert!((mesh.constraint(c1).unwrap().rest_length - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_set_point_position_clears_velocity() {
        let mut mesh = ClothMesh::empty();
        let a = mesh.add_point(Vec2::ZERO, false);
        assert!(mesh.set_point_position(a, Vec2::new(5.0, 5.0)));
        assert_eq!(mesh.point(a).unwrap().velocity(), Vec2::ZERO);
        assert!(!mesh.set_point_position(PointId(99), Vec2::ZERO));
    }

    #[test]
    fn test_isolated_pinned_point_is_invariant() {
        let mut config = GridConfig::new(1, 1, 20.0);
        config.pin_top_row = true;
        let mut mesh = ClothMesh::new(&config).unwrap();
        let start = mesh.point(PointId(0)).unwrap().position;

        for _ in 0..250 {
            mesh.step(&PhysicsConfig::default());
        }
        assert_eq!(mesh.point(PointId(0)).unwrap().position, start);
    }

    #[test]
    fn test_isolated_free_point_falls_by_gravity_term() {
        let mut config = GridConfig::new(1, 1, 20.0);
        config.pin_top_row = false;
        let mut mesh = ClothMesh::new(&config).unwrap();
        let physics = PhysicsConfig::default();

        mesh.step(&physics);
        let y = mesh.point(PointId(0)).unwrap().position.y;
        assert!((y - physics.gravity_step()).abs() < 1e-6);
    }

    #[test]
    fn test_small_grid_without_solver_falls_freely() {
        let physics = PhysicsConfig {
            iterations: 0,
            ..Default::default()
        };
        let mut mesh = grid(3, 3);
        let bottom = PointId(7);
        let start = mesh.point(bottom).unwrap().position;

        // Reference: the same point integrated with no constraints at all.
        let mut free = vec![Point::new(PointId(0), start, false)];
        for _ in 0..30 {
            mesh.step(&physics);
            integrator::integrate(&mut free, &physics);
        }
        let fallen = mesh.point(bottom).unwrap().position;
        assert!((fallen - free[0].position).length() < 1e-3);
        assert!(fallen.y - start.y > 10.0);
    }

    #[test]
    fn test_small_grid_with_solver_holds_shape() {
        let physics = PhysicsConfig {
            iterations: 8,
            ..Default::default()
        };
        let mut mesh = grid(3, 3);
        for _ in 0..100 {
            mesh.step(&physics);
        }
        assert!(mesh.max_stretch_ratio() <= 1.05);
    }

    #[test]
    fn test_horizontal_cut_separates_halves() {
        let grid_config = GridConfig::new(24, 16, 20.0);
        let mut mesh = ClothMesh::new(&grid_config).unwrap();
        let physics = PhysicsConfig::default();

        // Rows 0..=7 sit above y = 150, rows 8..=15 below.
        let upper: Vec<PointId> = (0..24 * 8).map(PointId).collect();
        let lower: Vec<PointId> = (24 * 8..24 * 16).map(PointId).collect();
        let upper_start = average_y(&mesh, &upper);
        let lower_start = average_y(&mesh, &lower);

        let stats = mesh.cut_along(
            &[Vec2::new(-20.0, 150.0), Vec2::new(480.0, 150.0)],
            &CutConfig::default(),
        );
        assert!(stats.constraints_cut > 0);

        for _ in 0..60 {
            mesh.step(&physics);
        }

        let upper_delta = average_y(&mesh, &upper) - upper_start;
        let lower_delta = average_y(&mesh, &lower) - lower_start;
        assert!(upper_delta < 40.0);
        assert!(lower_delta - upper_delta > 100.0);
    }

    #[test]
    fn test_stats_track_activity() {
        let mut mesh = grid(2, 2);
        let stats = mesh.stats();
        assert_eq!(stats.points, 4);
        assert_eq!(stats.constraints, 5);
        assert_eq!(stats.active_triangles, 2);
        assert_eq!(stats.max_generation, 0);

        mesh.triangles[0].active = false;
        assert_eq!(mesh.stats().active_triangles, 1);
        assert_eq!(mesh.stats().triangles, 2);
    }
}
