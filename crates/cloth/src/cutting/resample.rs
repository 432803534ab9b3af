//! Cut path resampling.
//!
//! Pointer samples arrive once per input event, so a fast drag can jump over
//! whole triangles. Each segment between consecutive samples is subdivided
//! into roughly `step`-sized pieces so every intermediate location is tested.

use glam::Vec2;

use crate::constants::MAX_SAMPLES_PER_SEGMENT;

/// Linearly resample `path` at about `step` spacing.
///
/// The first sample is kept, then every segment contributes its interpolated
/// interior points and its end point. A path with fewer than two samples has
/// no segments and yields nothing. A non-positive step keeps only the
/// original samples.
pub fn resample_path(path: &[Vec2], step: f32) -> Vec<Vec2> {
    if path.len() < 2 {
        return Vec::new();
    }

    let mut samples = vec![path[0]];
    for segment in path.windows(2) {
        let (from, to) = (segment[0], segment[1]);
        let steps = segment_steps(from.distance(to), step);
        samples.extend((1..=steps).map(|i| from.lerp(to, i as f32 / steps as f32)));
    }
    samples
}

/// Number of pieces a segment of `length` is cut into.
fn segment_steps(length: f32, step: f32) -> usize {
    if !(step > 0.0) || !length.is_finite() {
        return 1;
    }
    ((length / step).ceil() as usize).clamp(1, MAX_SAMPLES_PER_SEGMENT)
}
