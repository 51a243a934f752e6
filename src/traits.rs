//! Seam traits for the external routing service.
//!
//! Both capabilities follow the same shape: a source either produces the
//! real-road answer or reports unavailability with `None`, and the caller
//! substitutes a deterministic local fallback. Sources never propagate
//! transport errors.

use crate::geo::Point;
use crate::matrix::CostMatrix;

/// Provides a pairwise travel-cost matrix for a set of points.
///
/// The matrix is indexed by the provided point order. `None` means the
/// source is unavailable or returned an unusable payload.
pub trait MatrixSource {
    fn matrix_for(&self, points: &[Point]) -> Option<CostMatrix>;
}

/// Provides a road-following path geometry through ordered coordinates.
///
/// Vertices are returned in (lat, lon) order. `None` means the source is
/// unavailable or returned no route.
pub trait GeometrySource {
    fn geometry_for(&self, coords: &[(f64, f64)]) -> Option<Vec<(f64, f64)>>;
}
