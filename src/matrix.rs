//! Travel-cost matrices and the remote-or-haversine decision point.

use rayon::prelude::*;
use tracing::warn;

use crate::geo::{haversine_km, Point};
use crate::traits::MatrixSource;

/// Square matrix of non-negative pairwise travel costs.
///
/// Costs carry one unit kind per matrix: seconds when it came from the
/// routing service, kilometers when derived from haversine distances.
/// The diagonal is zero; asymmetry is allowed (directed road costs).
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    rows: Vec<Vec<f64>>,
}

impl CostMatrix {
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    /// Number of points the matrix covers.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cost of traveling from point `from` to point `to`.
    pub fn cost(&self, from: usize, to: usize) -> f64 {
        self.rows[from][to]
    }

    /// True when every row has the same length as the row count.
    pub fn is_square(&self) -> bool {
        let n = self.rows.len();
        self.rows.iter().all(|row| row.len() == n)
    }

    /// True when every cell is a finite number.
    pub fn is_finite(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.iter().all(|cost| cost.is_finite()))
    }
}

/// Builds a kilometer matrix from great-circle distances.
///
/// Pure local computation; cannot fail for any point set. Rows are
/// independent, so they are filled in parallel.
pub fn haversine_matrix(points: &[Point]) -> CostMatrix {
    let coords: Vec<(f64, f64)> = points.iter().map(Point::coords).collect();
    let rows = (0..coords.len())
        .into_par_iter()
        .map(|i| {
            (0..coords.len())
                .map(|j| {
                    if i == j {
                        0.0
                    } else {
                        haversine_km(coords[i], coords[j])
                    }
                })
                .collect()
        })
        .collect();
    CostMatrix::from_rows(rows)
}

/// Builds the travel-cost matrix for a point set.
///
/// Prefers the remote source; any unavailability or a matrix of the wrong
/// shape degrades to the haversine matrix. The returned flag records
/// whether the remote answer was used, so callers can observe degraded
/// accuracy without an error path.
pub fn build_matrix(source: &dyn MatrixSource, points: &[Point]) -> (CostMatrix, bool) {
    match source.matrix_for(points) {
        Some(matrix) if matrix.len() == points.len() && matrix.is_square() => (matrix, true),
        Some(_) => {
            warn!("remote matrix has wrong dimensions, falling back to haversine");
            (haversine_matrix(points), false)
        }
        None => {
            warn!("remote matrix unavailable, falling back to haversine");
            (haversine_matrix(points), false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unavailable;

    impl MatrixSource for Unavailable {
        fn matrix_for(&self, _points: &[Point]) -> Option<CostMatrix> {
            None
        }
    }

    struct Fixed(Vec<Vec<f64>>);

    impl MatrixSource for Fixed {
        fn matrix_for(&self, _points: &[Point]) -> Option<CostMatrix> {
            Some(CostMatrix::from_rows(self.0.clone()))
        }
    }

    fn three_points() -> Vec<Point> {
        vec![
            Point::new(36.1, -115.1),
            Point::new(36.2, -115.2),
            Point::new(36.3, -115.3),
        ]
    }

    #[test]
    fn test_haversine_matrix_diagonal_is_zero() {
        let matrix = haversine_matrix(&three_points());
        for i in 0..3 {
            assert_eq!(matrix.cost(i, i), 0.0);
        }
    }

    #[test]
    fn test_haversine_matrix_symmetric() {
        let matrix = haversine_matrix(&three_points());
        assert_eq!(matrix.cost(0, 1), matrix.cost(1, 0));
        assert_eq!(matrix.cost(1, 2), matrix.cost(2, 1));
    }

    #[test]
    fn test_unavailable_source_falls_back() {
        let points = three_points();
        let (matrix, used_remote) = build_matrix(&Unavailable, &points);
        assert!(!used_remote);
        assert_eq!(matrix.len(), points.len());
        assert!(matrix.cost(0, 1) > 0.0);
    }

    #[test]
    fn test_remote_matrix_used_when_shape_matches() {
        let rows = vec![
            vec![0.0, 10.0, 20.0],
            vec![12.0, 0.0, 15.0],
            vec![22.0, 14.0, 0.0],
        ];
        let (matrix, used_remote) = build_matrix(&Fixed(rows.clone()), &three_points());
        assert!(used_remote);
        assert_eq!(matrix, CostMatrix::from_rows(rows));
    }

    #[test]
    fn test_wrong_shape_falls_back() {
        let rows = vec![vec![0.0, 10.0], vec![12.0, 0.0]];
        let (matrix, used_remote) = build_matrix(&Fixed(rows), &three_points());
        assert!(!used_remote);
        assert_eq!(matrix.len(), 3);
    }
}
