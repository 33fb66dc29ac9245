//! Pure geometric helpers shared by hit-testing, bond placement, and validation.

use crate::model::bond::Bond;
use crate::model::types::{AtomId, Point, Vector};

/// Canonical bond directions in degrees, in ascending order.
///
/// The set mixes planar (120°) and tetrahedral (109.5°) geometries with the axis-aligned
/// and 30° steps of a drawing grid. 0° and 360° describe the same direction.
pub const CANONICAL_BOND_ANGLES: [f64; 12] = [
    0.0, 30.0, 60.0, 90.0, 109.5, 120.0, 180.0, 240.0, 270.0, 300.0, 330.0, 360.0,
];

pub fn distance(a: &Point, b: &Point) -> f64 {
    nalgebra::distance(a, b)
}

/// Shortest distance from `point` to the segment `[start, end]`.
///
/// Degenerate segments collapse to the distance to `start`.
pub fn distance_to_segment(point: &Point, start: &Point, end: &Point) -> f64 {
    let axis = end - start;
    let length_sq = axis.norm_squared();
    if length_sq <= f64::EPSILON {
        return distance(point, start);
    }

    let t = ((point - start).dot(&axis) / length_sq).clamp(0.0, 1.0);
    distance(point, &(start + axis * t))
}

/// Direction angle of `vector` in radians, measured from +x toward +y.
///
/// A zero-length vector has no direction and yields `0.0`.
pub fn direction_angle(vector: &Vector) -> f64 {
    if vector.norm_squared() <= f64::EPSILON {
        0.0
    } else {
        vector.y.atan2(vector.x)
    }
}

/// Wraps an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Snaps an angle in radians to the nearest canonical bond angle, returned in radians.
///
/// Ties resolve to the first candidate in ascending order. Non-finite input falls back to
/// `0.0`.
pub fn snap_angle(radians: f64) -> f64 {
    if !radians.is_finite() {
        return 0.0;
    }

    snap_degrees(radians.to_degrees()).to_radians()
}

/// Degree-valued counterpart of [`snap_angle`]; the result lies in `[0, 360]`.
pub fn snap_degrees(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }

    let degrees = normalize_degrees(degrees);
    let mut closest = CANONICAL_BOND_ANGLES[0];
    let mut min_diff = (degrees - closest).abs();

    for &candidate in &CANONICAL_BOND_ANGLES[1..] {
        let diff = (degrees - candidate).abs();
        if diff < min_diff {
            min_diff = diff;
            closest = candidate;
        }
    }

    closest
}

/// Unit vector pointing along `radians`.
pub fn unit_direction(radians: f64) -> Vector {
    Vector::new(radians.cos(), radians.sin())
}

/// Sum of the orders of every bond that references `atom`.
///
/// A bond contributes its full order once, whichever endpoint matches.
pub fn valence_sum<'a>(atom: AtomId, bonds: impl IntoIterator<Item = &'a Bond>) -> u32 {
    bonds
        .into_iter()
        .filter(|b| b.involves(atom))
        .map(|b| b.order.value())
        .sum()
}

/// Unit normal perpendicular to the segment, or `None` for coincident endpoints.
pub fn perpendicular(start: &Point, end: &Point) -> Option<Vector> {
    let axis = end - start;
    let length = axis.norm();
    if length <= f64::EPSILON {
        None
    } else {
        Some(Vector::new(-axis.y / length, axis.x / length))
    }
}
