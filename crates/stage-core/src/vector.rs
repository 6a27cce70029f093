//! Orientation helpers.

use crate::constants::ORIENTATION_EPSILON;
use glam::Vec3;

/// Unit vector pointing from `from` toward `to`.
///
/// Returns `None` when the two points are closer than [`ORIENTATION_EPSILON`],
/// where no direction is defined.
#[inline]
pub fn direction(from: Vec3, to: Vec3) -> Option<Vec3> {
    let d = to - from;
    let len = d.length();
    if !len.is_finite() || len < ORIENTATION_EPSILON {
        return None;
    }
    Some(d / len)
}

/// Facing vector for a directional source at `source` aimed at `target`,
/// or `fallback` when the geometry is degenerate.
#[inline]
pub fn orientation_toward(source: Vec3, target: Vec3, fallback: Vec3) -> Vec3 {
    direction(source, target).unwrap_or(fallback)
}
