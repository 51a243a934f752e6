//! Input point deduplication.
//!
//! Collapses exact and near-duplicate coordinates before any matrix is
//! built. First-come-first-kept: among a cluster of near-duplicates the
//! earliest input point survives, with no averaging or merging.

use std::collections::HashSet;

use crate::geo::{haversine_km, Point};

/// Default proximity tolerance: 5 meters.
pub const DEFAULT_TOLERANCE_KM: f64 = 0.005;

/// Filters out duplicate points, preserving input order.
///
/// A candidate is dropped when its exact coordinate pair was already kept,
/// or when it lies strictly closer than `tolerance_km` to any kept point.
/// O(k²) in the number of kept points; fine at the input sizes a single
/// route can carry.
pub fn filter_points(points: &[Point], tolerance_km: f64) -> Vec<Point> {
    let mut kept: Vec<Point> = Vec::new();
    let mut seen: HashSet<(u64, u64)> = HashSet::new();

    for point in points {
        let key = (point.lat.to_bits(), point.lon.to_bits());
        if seen.contains(&key) {
            continue;
        }

        let too_close = kept
            .iter()
            .any(|other| haversine_km(other.coords(), point.coords()) < tolerance_km);
        if too_close {
            continue;
        }

        seen.insert(key);
        kept.push(point.clone());
    }

    kept
}
