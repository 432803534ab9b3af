//! Verlet integration of point positions.
//!
//! Velocity is never stored: each point carries its previous position and the
//! step derives velocity from the difference. Pinned points are skipped
//! entirely, including their previous position, which is what keeps them
//! fixed.

use glam::Vec2;
use tatter_config::PhysicsConfig;

use crate::types::Point;

/// Advance every unpinned point by one timestep.
pub fn integrate(points: &mut [Point], physics: &PhysicsConfig) {
    let gravity = Vec2::new(0.0, physics.gravity_step());

    for point in points.iter_mut().filter(|p| !p.pinned) {
        let velocity = (point.position - point.previous) * physics.damping;
        point.previous = point.position;
        point.position += velocity + gravity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PointId;

    fn physics() -> PhysicsConfig {
        PhysicsConfig {
            dt: 1.0 / 60.0,
            gravity: 980.0,
            damping: 0.99,
            iterations: 16,
        }
    }

    #[test]
    fn test_pinned_point_never_moves() {
        let start = Vec2::new(10.0, 20.0);
        let mut points = vec![Point::new(PointId(0), start, true)];
        for _ in 0..100 {
            integrate(&mut points, &physics());
        }
        assert_eq!(points[0].position, start);
        assert_eq!(points[0].previous, start);
    }

    #[test]
    fn test_rest_point_falls_by_gravity_term() {
        let physics = physics();
        let start = Vec2::new(3.0, 7.0);
        let mut points = vec![Point::new(PointId(0), start, false)];
        integrate(&mut points, &physics);

        let displacement = points[0].position - start;
        assert!(displacement.x.abs() < 1e-6);
        assert!((displacement.y - physics.gravity_step()).abs() < 1e-6);
        assert_eq!(points[0].previous, start);
    }

    #[test]
    fn test_velocity_is_damped() {
        let physics = PhysicsConfig {
            gravity: 0.0,
            damping: 0.5,
            ..physics()
        };
        let mut point = Point::new(PointId(0), Vec2::new(10.0, 0.0), false);
        point.previous = Vec2::new(6.0, 0.0);
        let mut points = vec![point];
        integrate(&mut points, &physics);

        assert!((points[0].position.x - 12.0).abs() < 1e-6);
        assert_eq!(points[0].previous, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_zero_gravity_rest_point_stays() {
        let physics = PhysicsConfig {
            gravity: 0.0,
            ..physics()
        };
        let mut points = vec![Point::new(PointId(0), Vec2::ONE, false)];
        integrate(&mut points, &physics);
        assert_eq!(points[0].position, Vec2::ONE);
    }
}
