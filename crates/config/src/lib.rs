//! Shared configuration for Tatter
//!
//! This crate provides the single source of truth for every tunable used by
//! the cloth engine. Each operation of the engine takes the record it needs
//! explicitly; nothing here is global.

use serde::{Deserialize, Serialize};

#[cfg(feature = "bevy")]
use bevy::prelude::Resource;

/// Default number of point columns in the base grid
pub const DEFAULT_COLUMNS: u32 = 24;

/// Default number of point rows in the base grid
pub const DEFAULT_ROWS: u32 = 16;

/// Default distance between neighbouring grid points
pub const DEFAULT_SPACING: f32 = 20.0;

/// Default base fabric color (linear RGB)
pub const DEFAULT_FABRIC_COLOR: [f32; 3] = [0.82, 0.26, 0.31];

/// Default simulation timestep in seconds
pub const DEFAULT_DT: f32 = 1.0 / 60.0;

/// Default downward acceleration (simulation units per second², +y is down)
pub const DEFAULT_GRAVITY: f32 = 980.0;

/// Default fraction of implicit velocity kept each step
pub const DEFAULT_DAMPING: f32 = 0.99;

/// Default number of constraint relaxation passes per step
pub const DEFAULT_PHYSICS_ITERATIONS: usize = 16;

/// Default hover distance that triggers refinement
pub const DEFAULT_REFINE_RADIUS: f32 = 40.0;

/// Default shortest edge that may still be split
pub const DEFAULT_MIN_EDGE_LENGTH: f32 = 2.5;

/// Default deepest triangle generation produced by refinement
pub const DEFAULT_MAX_GENERATION: u8 = 3;

/// Default cut distance around the traced path
pub const DEFAULT_CUT_RADIUS: f32 = 8.0;

/// Default resampling step between consecutive cut samples
pub const DEFAULT_RESAMPLE_STEP: f32 = 10.0;

/// Default edge length above which a triangle is drawn as torn
pub const DEFAULT_TEAR_THRESHOLD: f32 = 60.0;

/// Default darkest shade a fully collapsed triangle is drawn with
pub const DEFAULT_AMBIENT_SHADE: f32 = 0.35;

/// Errors raised while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Layout of the base grid built at initialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Points per row
    pub columns: u32,
    /// Points per column
    pub rows: u32,
    /// Distance between neighbouring points
    pub spacing: f32,
    /// Pin every point of the first row
    pub pin_top_row: bool,
    /// Position of the first point
    pub origin: [f32; 2],
    /// Base color of every grid triangle
    pub fabric_color: [f32; 3],
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            spacing: DEFAULT_SPACING,
            pin_top_row: true,
            origin: [0.0, 0.0],
            fabric_color: DEFAULT_FABRIC_COLOR,
        }
    }
}

impl GridConfig {
    /// Create a grid config with the given dimensions
    pub fn new(columns: u32, rows: u32, spacing: f32) -> Self {
        Self {
            columns,
            rows,
            spacing,
            ..Default::default()
        }
    }

    /// Total number of points the grid will contain
    pub fn point_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Width and height covered by the grid
    pub fn extent(&self) -> [f32; 2] {
        [
            self.columns.saturating_sub(1) as f32 * self.spacing,
            self.rows.saturating_sub(1) as f32 * self.spacing,
        ]
    }
}

/// Parameters of one simulation step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Timestep in seconds
    pub dt: f32,
    /// Downward acceleration
    pub gravity: f32,
    /// Fraction of implicit velocity kept each step
    pub damping: f32,
    /// Constraint relaxation passes per step
    pub iterations: usize,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            gravity: DEFAULT_GRAVITY,
            damping: DEFAULT_DAMPING,
            iterations: DEFAULT_PHYSICS_ITERATIONS,
        }
    }
}

impl PhysicsConfig {
    /// Displacement gravity adds to a point in one step
    pub fn gravity_step(&self) -> f32 {
        self.gravity * self.dt * self.dt
    }
}

/// Parameters of hover-driven refinement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefineConfig {
    /// Triangles whose centroid lies closer than this to the path are refined
    pub radius: f32,
    /// Edges shorter than this are never split
    pub min_edge_length: f32,
    /// Deepest generation refinement may produce
    pub max_generation: u8,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_REFINE_RADIUS,
            min_edge_length: DEFAULT_MIN_EDGE_LENGTH,
            max_generation: DEFAULT_MAX_GENERATION,
        }
    }
}

/// Parameters of drag-driven cutting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CutConfig {
    /// Constraints and triangles closer than this to a sample are removed
    pub radius: f32,
    /// Spacing of the samples interpolated between path points
    pub resample_step: f32,
}

impl Default for CutConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_CUT_RADIUS,
            resample_step: DEFAULT_RESAMPLE_STEP,
        }
    }
}

/// Parameters of the renderable-triangle snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Triangles with any edge longer than this are hidden for the frame
    pub tear_threshold: f32,
    /// Shade of a triangle whose area has collapsed to zero
    pub ambient_shade: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            tear_threshold: DEFAULT_TEAR_THRESHOLD,
            ambient_shade: DEFAULT_AMBIENT_SHADE,
        }
    }
}

/// Complete configuration for a cloth session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
#[serde(default)]
pub struct ClothConfig {
    pub grid: GridConfig,
    pub physics: PhysicsConfig,
    pub refine: RefineConfig,
    pub cut: CutConfig,
    pub render: RenderConfig,
}

impl ClothConfig {
    /// Parse a configuration document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize this configuration as pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClothConfig::default();
        assert_eq!(config.grid.columns, DEFAULT_COLUMNS);
        assert_eq!(config.grid.rows, DEFAULT_ROWS);
        assert_eq!(config.physics.iterations, 16);
        assert_eq!(config.refine.max_generation, 3);
        assert!(config.grid.pin_top_row);
    }

    #[test]
    fn test_grid_extent() {
        let grid = GridConfig::new(24, 16, 20.0);
        assert_eq!(grid.point_count(), 384);
        assert_eq!(grid.extent(), [460.0, 300.0]);

        let empty = GridConfig::new(0, 0, 20.0);
        assert_eq!(empty.extent(), [0.0, 0.0]);
    }

    #[test]
    fn test_gravity_step() {
        let physics = PhysicsConfig {
            dt: 0.5,
            gravity: 8.0,
            ..Default::default()
        };
        assert!((physics.gravity_step() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            ClothConfig::from_json_str(r#"{ "cut": { "radius": 12.5 }, "grid": { "rows": 4 } }"#)
                .unwrap();
        assert_eq!(config.cut.radius, 12.5);
        assert_eq!(config.cut.resample_step, DEFAULT_RESAMPLE_STEP);
        assert_eq!(config.grid.rows, 4);
        assert_eq!(config.grid.columns, DEFAULT_COLUMNS);
        assert_eq!(config.physics, PhysicsConfig::default());
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = ClothConfig::default();
        config.render.tear_threshold = 42.0;
        let json = config.to_json_string().unwrap();
        assert_eq!(ClothConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_json_is_error() {
        let result = ClothConfig::from_json_str("{ \"grid\": 5 }");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
