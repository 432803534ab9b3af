//! 2D cloth simulation for Tatter.
//!
//! This crate provides the simulation and mesh engine behind the cloth:
//! - Verlet point-mass integration with pinning
//! - Gauss-Seidel relaxation of distance constraints
//! - Hover-driven adaptive refinement (shared-midpoint edge splitting)
//! - Drag-driven cutting and per-frame visual tearing
//!
//! # Architecture
//!
//! Entities live in append-only arenas owned by [`ClothMesh`] and reference
//! each other by index. Nothing is ever removed: refinement and cutting clear
//! `active` flags instead, which keeps every stored index valid for the
//! lifetime of the mesh.
//!
//! ## Key Components
//!
//! - **Types**: Points, constraints, triangles and their identifiers
//! - **Geometry**: Distance and cross-product helpers
//! - **Registry**: Canonical edge keys → constraint / midpoint lookup
//! - **Integrator / Solver**: One Verlet step, then constraint relaxation
//! - **Refinement**: Subdivision of triangles near a hover path
//! - **Cutting**: Path resampling, permanent cuts, reversible tears
//! - **Render**: Shaded triangle snapshot for the rasterizer
//! - **Pipeline**: Pointer samples → refine / cut → step

pub mod constants;
pub mod cutting;
pub mod geometry;
pub mod integrator;
pub mod mesh;
pub mod pipeline;
pub mod refinement;
pub mod registry;
pub mod render;
pub mod solver;
pub mod types;

pub use cutting::CutStats;
pub use mesh::{ClothMesh, MeshStats};
pub use pipeline::{ClothSession, FrameStats, PointerEffect};
pub use refinement::RefineStats;
pub use registry::EdgeRegistry;
pub use render::RenderTriangle;
pub use types::{
    Constraint, ConstraintId, EdgeKey, MeshError, Point, PointId, Triangle, TriangleId,
};

pub use tatter_config::{
    ClothConfig, CutConfig, GridConfig, PhysicsConfig, RefineConfig, RenderConfig,
};
