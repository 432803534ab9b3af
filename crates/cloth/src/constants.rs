/// Bound on a single relaxation factor. Keeps near-degenerate edges from
/// producing unbounded corrections.
pub const MAX_CORRECTION_FACTOR: f32 = 0.5;

/// Hard ceiling on triangle generation, regardless of configuration.
pub const GENERATION_LIMIT: u8 = 3;

/// Number of child triangles produced by one subdivision.
pub const CHILDREN_PER_SPLIT: usize = 4;

/// Brightness multiplier applied to alternating cells of the base grid.
pub const CHECKER_DARKEN: f32 = 0.9;

/// Upper bound on interpolated samples per cut segment. Guards against a tiny
/// resample step turning one long segment into millions of samples.
pub const MAX_SAMPLES_PER_SEGMENT: usize = 4096;
