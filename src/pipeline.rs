//! End-to-end route planning.
//!
//! Wires the pipeline in sequence: deduplicate, build the cost matrix,
//! solve the visiting order, derive metrics, resolve the path geometry.
//! Each call owns all of its state, so concurrent plans need no
//! coordination.

use serde::Serialize;
use tracing::debug;

use crate::dedupe::{self, DEFAULT_TOLERANCE_KM};
use crate::error::PlanError;
use crate::geo::Point;
use crate::geometry::{self, PathGeometry};
use crate::matrix;
use crate::metrics::{self, TourMode};
use crate::solver::{self, SolverBudgets};
use crate::traits::{GeometrySource, MatrixSource};

/// Tuning knobs for a single plan.
#[derive(Debug, Clone)]
pub struct PlanOptions {
    /// Deduplication proximity tolerance in kilometers.
    pub tolerance_km: f64,
    /// Assumed travel speed for time estimates.
    pub speed_kmh: f64,
    /// Open path or closed tour.
    pub tour_mode: TourMode,
    /// Solver time budgets.
    pub budgets: SolverBudgets,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            tolerance_km: DEFAULT_TOLERANCE_KM,
            speed_kmh: 60.0,
            tour_mode: TourMode::Open,
            budgets: SolverBudgets::default(),
        }
    }
}

/// The planned route, ready for a presentation layer.
///
/// `route` indexes into the deduplicated point set; `names` follow that
/// set's order, with unnamed points labeled "Point {i+1}". The provenance
/// flags record whether the routing service contributed the cost matrix
/// and the path geometry, or whether local fallbacks filled in.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub route: Vec<usize>,
    pub ordered_coordinates: Vec<(f64, f64)>,
    pub names: Vec<String>,
    pub total_distance_km: f64,
    pub total_time_hours: f64,
    pub per_leg_time_hours: Vec<f64>,
    pub geometry: PathGeometry,
    pub used_remote_matrix: bool,
    pub used_remote_geometry: bool,
}

/// Plans a visiting order over `points`.
///
/// Fails only on insufficient input or a non-positive speed. Routing
/// service failures degrade to local fallbacks and are reported through
/// the `used_remote_*` flags.
pub fn plan_route<M, G>(
    matrix_source: &M,
    geometry_source: &G,
    points: &[Point],
    options: &PlanOptions,
) -> Result<RoutePlan, PlanError>
where
    M: MatrixSource,
    G: GeometrySource,
{
    if options.speed_kmh <= 0.0 {
        return Err(PlanError::InvalidSpeed(options.speed_kmh));
    }

    let kept = dedupe::filter_points(points, options.tolerance_km);
    if kept.len() <= 1 {
        return Err(PlanError::InsufficientPoints {
            remaining: kept.len(),
        });
    }
    debug!(input = points.len(), kept = kept.len(), "deduplicated points");

    let (cost_matrix, used_remote_matrix) = matrix::build_matrix(matrix_source, &kept);
    let route = solver::solve(&cost_matrix, &options.budgets);

    // Metrics always come from great-circle kilometers, whatever unit the
    // solver's matrix carried.
    let distance_matrix = matrix::haversine_matrix(&kept);
    let metrics = metrics::compute(&route, &distance_matrix, options.speed_kmh, options.tour_mode)?;

    let ordered_coordinates: Vec<(f64, f64)> = route.iter().map(|&i| kept[i].coords()).collect();
    let names: Vec<String> = kept
        .iter()
        .enumerate()
        .map(|(i, point)| {
            point
                .name
                .clone()
                .unwrap_or_else(|| format!("Point {}", i + 1))
        })
        .collect();

    let mut geometry_coords = ordered_coordinates.clone();
    if options.tour_mode == TourMode::Closed {
        if let Some(&start) = ordered_coordinates.first() {
            geometry_coords.push(start);
        }
    }
    let (geometry, used_remote_geometry) = geometry::resolve(geometry_source, &geometry_coords);

    Ok(RoutePlan {
        route,
        ordered_coordinates,
        names,
        total_distance_km: metrics.total_distance_km,
        total_time_hours: metrics.total_time_hours,
        per_leg_time_hours: metrics.per_leg_time_hours,
        geometry,
        used_remote_matrix,
        used_remote_geometry,
    })
}
