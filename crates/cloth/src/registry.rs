//! Edge registry: canonical point pair → constraint and midpoint.
//!
//! Every constraint is registered under the [`EdgeKey`] of its endpoints, so
//! asking for the edge between two points never creates a second constraint.
//! The midpoint map plays the same role during refinement: two triangles that
//! share an edge resolve to the same midpoint point instead of each creating
//! their own.

use std::collections::HashMap;

use crate::types::{ConstraintId, EdgeKey, PointId};

#[derive(Debug, Clone, Default)]
pub struct EdgeRegistry {
    constraints: HashMap<EdgeKey, ConstraintId>,
    midpoints: HashMap<EdgeKey, PointId>,
}

impl EdgeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constraint registered between `a` and `b`, in either order.
    pub fn constraint(&self, a: PointId, b: PointId) -> Option<ConstraintId> {
        self.constraints.get(&EdgeKey::new(a, b)).copied()
    }

    /// Midpoint already created for the edge `a`-`b`, if it has been split.
    pub fn midpoint(&self, a: PointId, b: PointId) -> Option<PointId> {
        self.midpoints.get(&EdgeKey::new(a, b)).copied()
    }

    /// Register a constraint. Returns the previously registered one, if any.
    pub fn insert_constraint(
        &mut self,
        a: PointId,
        b: PointId,
        id: ConstraintId,
    ) -> Option<ConstraintId> {
        self.constraints.insert(EdgeKey::new(a, b), id)
    }

    /// Register a midpoint. Returns the previously registered one, if any.
    pub fn insert_midpoint(&mut self, a: PointId, b: PointId, id: PointId) -> Option<PointId> {
        self.midpoints.insert(EdgeKey::new(a, b), id)
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub fn midpoint_count(&self) -> usize {
        self.midpoints.len()
    }

    pub fn constraints(&self) -> impl Iterator<Item = (EdgeKey, ConstraintId)> + '_ {
        self.constraints.iter().map(|(k, v)| (*k, *v))
    }

    pub fn midpoints(&self) -> impl Iterator<Item = (EdgeKey, PointId)> + '_ {
        self.midpoints.iter().map(|(k, v)| (*k, *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_order_independent() {
        let mut registry = EdgeRegistry::new();
        assert!(registry
            .insert_constraint(PointId(4), PointId(2), ConstraintId(7))
            .is_none());
        assert_eq!(
            registry.constraint(PointId(2), PointId(4)),
            Some(ConstraintId(7))
        );
        assert_eq!(
            registry.constraint(PointId(4), PointId(2)),
            Some(ConstraintId(7))
        );
        assert_eq!(registry.constraint(PointId(4), PointId(3)), None);
    }

    #[test]
    fn test_midpoints_are_separate_from_constraints() {
        let mut registry = EdgeRegistry::new();
        registry.insert_constraint(PointId(0), PointId(1), ConstraintId(0));
        assert_eq!(registry.midpoint(PointId(0), PointId(1)), None);

        registry.insert_midpoint(PointId(1), PointId(0), PointId(9));
        assert_eq!(registry.midpoint(PointId(0), PointId(1)), Some(PointId(9)));
        assert_eq!(registry.constraint_count(), 1);
        assert_eq!(registry.midpoint_count(), 1);
    }

    #[test]
    fn test_reinsert_reports_previous() {
        let mut registry = EdgeRegistry::new();
        registry.insert_midpoint(PointId(0), PointId(1), PointId(5));
        let previous = registry.insert_midpoint(PointId(0), PointId(1), PointId(6));
        assert_eq!(previous, Some(PointId(5)));
    }
}
