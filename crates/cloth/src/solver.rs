//! Gauss-Seidel relaxation of distance constraints.
//!
//! Each pass walks the active constraints in arena order and corrects both
//! endpoints in place, so a correction is visible to every later constraint
//! in the same pass. More passes give stiffer cloth at a linear CPU cost.

use crate::constants::MAX_CORRECTION_FACTOR;
use crate::types::{Constraint, Point};

/// Run `iterations` relaxation passes over every active constraint.
pub fn solve(points: &mut [Point], constraints: &[Constraint], iterations: usize) {
    for _ in 0..iterations {
        relax_pass(points, constraints);
    }
}

/// One pass over all active constraints. Returns the number corrected.
pub fn relax_pass(points: &mut [Point], constraints: &[Constraint]) -> usize {
    constraints
        .iter()
        .filter(|c| c.active)
        .filter(|c| relax_constraint(points, c))
        .count()
}

/// Move the endpoints of `constraint` toward its rest length.
///
/// Returns false when nothing moved: the edge has zero length, both ends are
/// pinned, or an endpoint id is out of range.
pub fn relax_constraint(points: &mut [Point], constraint: &Constraint) -> bool {
    let (ia, ib) = (constraint.a.index(), constraint.b.index());
    let (Some(pa), Some(pb)) = (points.get(ia), points.get(ib)) else {
        return false;
    };
    let (pinned_a, pinned_b) = (pa.pinned, pb.pinned);
    if pinned_a && pinned_b {
        return false;
    }

    let delta = pb.position - pa.position;
    let distance = delta.length();
    if distance == 0.0 {
        return false;
    }

    let diff = (distance - constraint.rest_length) / distance;
    let factor = (diff * 0.5).clamp(-MAX_CORRECTION_FACTOR, MAX_CORRECTION_FACTOR);
    let offset = delta * factor;

    if pinned_a {
        points[ib].position -= offset * 2.0;
    } else if pinned_b {
        points[ia].position += offset * 2.0;
    } else {
        points[ia].position += offset;
        points[ib].position -= offset;
    }
    true
}

/// Ratio of current length to rest length.
pub fn stretch_ratio(points: &[Point], constraint: &Constraint) -> Option<f32> {
    let pa = points.get(constraint.a.index())?;
    let pb = points.get(constraint.b.index())?;
    if constraint.rest_length <= 0.0 {
        return None;
    }
    Some(pa.position.distance(pb.position) / constraint.rest_length)
}
