//! Topology validation for ClothMesh.
//!
//! Checks the invariants refinement and cutting rely on:
//! - Every stored id refers to an existing entity
//! - The registry maps each edge key to the constraint with those endpoints
//! - Each split edge has exactly one midpoint, agreed on by registry and
//!   constraint
//! - Triangle generations stay within the subdivision limit
//! - Rest lengths are finite and non-negative

use std::collections::HashMap;

use super::ClothMesh;
use crate::constants::GENERATION_LIMIT;
use crate::types::{EdgeKey, MeshError, PointId};

impl ClothMesh {
    /// Validate mesh topology, returning the first violation found.
    pub fn validate(&self) -> Result<(), MeshError> {
        let point_exists = |id: PointId| id.index() < self.points.len();

        for (index, point) in self.points.iter().enumerate() {
            if point.id.index() != index {
                return Err(MeshError::DanglingReference(format!(
                    "point at index {} carries id {:?}",
                    index, point.id
                )));
            }
        }

        for (index, constraint) in self.constraints.iter().enumerate() {
            if constraint.id.index() != index {
                return Err(MeshError::DanglingReference(format!(
                    "constraint at index {} carries id {:?}",
                    index, constraint.id
                )));
            }
            if !point_exists(constraint.a) || !point_exists(constraint.b) {
                return Err(MeshError::DanglingReference(format!(
                    "constraint {:?} references {:?}-{:?}",
                    constraint.id, constraint.a, constraint.b
                )));
            }
            if !(constraint.rest_length.is_finite() && constraint.rest_length >= 0.0) {
                return Err(MeshError::InvalidRestLength(constraint.id));
            }
            match self.registry.constraint(constraint.a, constraint.b) {
                Some(id) if id == constraint.id => {}
                other => {
                    return Err(MeshError::RegistryMismatch(format!(
                        "constraint {:?} registered as {:?}",
                        constraint.id, other
                    )));
                }
            }
            if let Some(mid) = constraint.midpoint {
                if !point_exists(mid) {
                    return Err(MeshError::DanglingReference(format!(
                        "constraint {:?} midpoint {:?}",
                        constraint.id, mid
                    )));
                }
                if self.registry.midpoint(constraint.a, constraint.b) != Some(mid) {
                    return Err(MeshError::DuplicateMidpoint(constraint.key()));
                }
            }
        }

        for (key, id) in self.registry.constraints() {
            let Some(constraint) = self.constraint(id) else {
                return Err(MeshError::DanglingReference(format!(
                    "registry entry {:?} points at missing {:?}",
                    key, id
                )));
            };
            if constraint.key() != key {
                return Err(MeshError::RegistryMismatch(format!(
                    "registry key {:?} maps to constraint {:?} with key {:?}",
                    key,
                    id,
                    constraint.key()
                )));
            }
        }

        // A midpoint point must not be shared by two different edges.
        let mut owners: HashMap<PointId, EdgeKey> = HashMap::new();
        for (key, mid) in self.registry.midpoints() {
            if !point_exists(mid) {
                return Err(MeshError::DanglingReference(format!(
                    "midpoint {:?} of edge {:?}",
                    mid, key
                )));
            }
            if owners.insert(mid, key).is_some() {
                return Err(MeshError::DuplicateMidpoint(key));
            }
        }

        for (index, triangle) in self.triangles.iter().enumerate() {
            if triangle.id.index() != index {
                return Err(MeshError::DanglingReference(format!(
                    "triangle at index {} carries id {:?}",
                    index, triangle.id
                )));
            }
            if let Some(missing) = triangle.points.iter().find(|p| !point_exists(**p)) {
                return Err(MeshError::DanglingReference(format!(
                    "triangle {:?} references {:?}",
                    triangle.id, missing
                )));
            }
            if triangle.generation > GENERATION_LIMIT {
                return Err(MeshError::GenerationOverflow {
                    id: triangle.id,
                    generation: triangle.generation,
                    limit: GENERATION_LIMIT,
                });
            }
        }

        Ok(())
    }
}
