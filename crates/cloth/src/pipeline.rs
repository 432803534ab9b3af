//! Interaction session orchestration.
//!
//! This module turns pointer samples (already in simulation space) into core
//! mesh calls, in per-frame order:
//! 1. Hover movement → refinement along the last segment
//! 2. Drag movement → cut along the last segment
//! 3. Frame tick → one simulation step
//! 4. Render query → fresh triangle snapshot
//!
//! Input is applied synchronously between steps, so the solver always sees a
//! fully updated constraint set.

use glam::Vec2;
use tatter_config::ClothConfig;
use tracing::{debug, info, trace};

use crate::cutting::CutStats;
use crate::mesh::ClothMesh;
use crate::refinement::RefineStats;
use crate::render::RenderTriangle;
use crate::types::MeshError;

/// What a pointer event did to the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEffect {
    /// Hover segment refined the mesh
    Refined(RefineStats),
    /// Drag segment cut the mesh
    Cut(CutStats),
    /// No segment yet (first sample after entering)
    None,
}

/// Counters reported after each frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    /// Frames advanced since the session was created or reset
    pub frame: u64,
    /// Triangles in this frame's snapshot
    pub renderable: usize,
    /// Active triangles hidden by overstretch this frame
    pub torn: usize,
}

#[derive(Debug, Clone, Copy, Default)]
struct PointerState {
    last: Option<Vec2>,
    pressed: bool,
}

/// A cloth mesh together with its configuration and pointer state.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct ClothSession {
    mesh: ClothMesh,
    config: ClothConfig,
    pointer: PointerState,
    frame: u64,
}

impl ClothSession {
    /// Build the base grid described by `config.grid`.
    pub fn new(config: ClothConfig) -> Result<Self, MeshError> {
        let mesh = ClothMesh::new(&config.grid)?;
        info!(
            "cloth session: {}x{} grid, {} points",
            config.grid.columns,
            config.grid.rows,
            mesh.point_count()
        );
        Ok(Self {
            mesh,
            config,
            pointer: PointerState::default(),
            frame: 0,
        })
    }

    /// Rebuild the mesh from the grid config and forget the pointer.
    pub fn reset(&mut self) -> Result<(), MeshError> {
        self.mesh = ClothMesh::new(&self.config.grid)?;
        self.pointer = PointerState::default();
        self.frame = 0;
        info!("cloth session reset");
        Ok(())
    }

    pub fn mesh(&self) -> &ClothMesh {
        &self.mesh
    }

    pub fn config(&self) -> &ClothConfig {
        &self.config
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_pressed(&self) -> bool {
        self.pointer.pressed
    }

    /// Handle a pointer sample.
    ///
    /// The segment from the previous sample is refined while hovering and
    /// cut while dragging. The first sample only records the position.
    pub fn pointer_moved(&mut self, position: Vec2) -> PointerEffect {
        let last = self.pointer.last.replace(position);
        let Some(last) = last else {
            trace!("pointer entered at {:?}", position);
            return PointerEffect::None;
        };

        let path = [last, position];
        if self.pointer.pressed {
            PointerEffect::Cut(self.mesh.cut_along(&path, &self.config.cut))
        } else {
            PointerEffect::Refined(self.mesh.refine_along(&path, &self.config.refine))
        }
    }

    /// Start a drag at `position`, cutting there immediately.
    pub fn pointer_pressed(&mut self, position: Vec2) -> CutStats {
        self.pointer.pressed = true;
        self.pointer.last = Some(position);
        let stats = self.mesh.cut_along(&[position, position], &self.config.cut);
        debug!("drag started at {:?}: {:?}", position, stats);
        stats
    }

    /// End the drag; further movement hovers again.
    pub fn pointer_released(&mut self) {
        self.pointer.pressed = false;
    }

    /// Forget the last sample and end any drag.
    pub fn pointer_left(&mut self) {
        self.pointer = PointerState::default();
    }

    /// Step the simulation once and report what will be drawn.
    pub fn advance(&mut self) -> FrameStats {
        self.mesh.step(&self.config.physics);
        self.frame += 1;

        let stats = FrameStats {
            frame: self.frame,
            renderable: self.mesh.renderable_triangles(&self.config.render).count(),
            torn: self.mesh.torn_triangles(self.config.render.tear_threshold).count(),
        };
        trace!("frame {:?}", stats);
        stats
    }

    /// Fresh snapshot for the rasterizer.
    pub fn renderable_triangles(&self) -> Vec<RenderTriangle> {
        self.mesh.renderable_triangles(&self.config.render).collect()
    }
}
