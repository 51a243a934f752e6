//! Distance and time metrics for a solved route.

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::matrix::CostMatrix;

/// Whether the last leg returns to the starting point.
///
/// Open paths end where the solver left them; closed tours add the closing
/// leg to the total distance. Per-leg times cover consecutive pairs only in
/// both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TourMode {
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteMetricsResult {
    pub total_distance_km: f64,
    pub total_time_hours: f64,
    pub per_leg_time_hours: Vec<f64>,
}

/// Derives totals and per-leg time estimates from a route over a distance
/// matrix in kilometers.
///
/// Totals and per-leg times are rounded to two decimals for the
/// presentation layer. A non-positive speed is a configuration error,
/// rejected before any arithmetic happens.
pub fn compute(
    route: &[usize],
    distances: &CostMatrix,
    speed_kmh: f64,
    mode: TourMode,
) -> Result<RouteMetricsResult, PlanError> {
    if speed_kmh <= 0.0 {
        return Err(PlanError::InvalidSpeed(speed_kmh));
    }

    let mut total_distance_km: f64 = route
        .windows(2)
        .map(|pair| distances.cost(pair[0], pair[1]))
        .sum();
    if mode == TourMode::Closed && route.len() > 1 {
        total_distance_km += distances.cost(route[route.len() - 1], route[0]);
    }

    let per_leg_time_hours: Vec<f64> = route
        .windows(2)
        .map(|pair| round2(distances.cost(pair[0], pair[1]) / speed_kmh))
        .collect();
    let total_time_hours = round2(per_leg_time_hours.iter().sum());

    Ok(RouteMetricsResult {
        total_distance_km: round2(total_distance_km),
        total_time_hours,
        per_leg_time_hours,
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> CostMatrix {
        CostMatrix::from_rows(vec![vec![0.0, 5.0], vec![5.0, 0.0]])
    }

    #[test]
    fn test_open_path_two_points() {
        let result = compute(&[0, 1], &two_by_two(), 60.0, TourMode::Open).unwrap();
        assert_eq!(result.total_distance_km, 5.0);
        assert_eq!(result.per_leg_time_hours, vec![0.08]);
        assert_eq!(result.total_time_hours, 0.08);
    }

    #[test]
    fn test_closed_tour_adds_closing_leg_distance() {
        let result = compute(&[0, 1], &two_by_two(), 60.0, TourMode::Closed).unwrap();
        assert_eq!(result.total_distance_km, 10.0);
        // Time estimates stay per consecutive leg.
        assert_eq!(result.per_leg_time_hours, vec![0.08]);
        assert_eq!(result.total_time_hours, 0.08);
    }

    #[test]
    fn test_zero_speed_rejected() {
        let err = compute(&[0, 1], &two_by_two(), 0.0, TourMode::Open).unwrap_err();
        assert_eq!(err, PlanError::InvalidSpeed(0.0));
    }

    #[test]
    fn test_negative_speed_rejected() {
        let err = compute(&[0, 1], &two_by_two(), -10.0, TourMode::Open).unwrap_err();
        assert_eq!(err, PlanError::InvalidSpeed(-10.0));
    }

    #[test]
    fn test_total_distance_rounded_to_two_decimals() {
        let matrix = CostMatrix::from_rows(vec![vec![0.0, 1.2345], vec![1.2345, 0.0]]);
        let result = compute(&[0, 1], &matrix, 60.0, TourMode::Open).unwrap();
        assert_eq!(result.total_distance_km, 1.23);
        assert_eq!(result.per_leg_time_hours, vec![0.02]);
    }

    #[test]
    fn test_single_point_route() {
        let matrix = CostMatrix::from_rows(vec![vec![0.0]]);
        let result = compute(&[0], &matrix, 60.0, TourMode::Closed).unwrap();
        assert_eq!(result.total_distance_km, 0.0);
        assert!(result.per_leg_time_hours.is_empty());
        assert_eq!(result.total_time_hours, 0.0);
    }

    #[test]
    fn test_leg_count_matches_route() {
        let matrix = CostMatrix::from_rows(vec![
            vec![0.0, 30.0, 90.0],
            vec![30.0, 0.0, 45.0],
            vec![90.0, 45.0, 0.0],
        ]);
        let result = compute(&[0, 1, 2], &matrix, 60.0, TourMode::Open).unwrap();
        assert_eq!(result.per_leg_time_hours.len(), 2);
        assert_eq!(result.per_leg_time_hours, vec![0.5, 0.75]);
        assert_eq!(result.total_time_hours, 1.25);
        assert_eq!(result.total_distance_km, 75.0);
    }
}
