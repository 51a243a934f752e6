//! Path geometry for a solved route.
//!
//! The geometry traces the physical path between the ordered stops. The
//! routing service returns a dense road-following polyline; when it is
//! unavailable the geometry degrades to straight segments between the
//! stops themselves.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::traits::GeometrySource;

/// Ordered (lat, lon) vertices tracing a route's physical path.
///
/// May carry more vertices than the route has stops (road shape), or
/// exactly the stop coordinates in the straight-line fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathGeometry {
    points: Vec<(f64, f64)>,
}

impl PathGeometry {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }
}

/// Resolves the path geometry through the ordered coordinates.
///
/// The returned flag records whether the road-following geometry was used;
/// any source failure degrades to the input coordinates unchanged.
pub fn resolve(source: &dyn GeometrySource, ordered: &[(f64, f64)]) -> (PathGeometry, bool) {
    match source.geometry_for(ordered) {
        Some(points) if !points.is_empty() => (PathGeometry::new(points), true),
        _ => {
            warn!("route geometry unavailable, using straight segments");
            (PathGeometry::new(ordered.to_vec()), false)
        }
    }
}
