//! OSRM HTTP adapter for cost matrices and route geometries.

use serde::Deserialize;
use tracing::warn;

use crate::geo::Point;
use crate::matrix::CostMatrix;
use crate::traits::{GeometrySource, MatrixSource};

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// OSRM path segment: semicolon-separated `lon,lat` pairs.
    fn coord_path(coords: &[(f64, f64)]) -> String {
        coords
            .iter()
            .map(|(lat, lon)| format!("{:.6},{:.6}", lon, lat))
            .collect::<Vec<_>>()
            .join(";")
    }
}

impl MatrixSource for OsrmClient {
    fn matrix_for(&self, points: &[Point]) -> Option<CostMatrix> {
        if points.is_empty() {
            return None;
        }

        let coords: Vec<(f64, f64)> = points.iter().map(Point::coords).collect();
        let url = format!(
            "{}/table/v1/{}/{}?sources=all&destinations=all",
            self.config.base_url,
            self.config.profile,
            Self::coord_path(&coords)
        );

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<TableResponse>());

        match response {
            Ok(body) => match body.durations {
                Some(rows) => Some(CostMatrix::from_rows(rows)),
                None => {
                    warn!("OSRM table response missing durations");
                    None
                }
            },
            Err(err) => {
                warn!(%err, "OSRM table request failed");
                None
            }
        }
    }
}

impl GeometrySource for OsrmClient {
    fn geometry_for(&self, coords: &[(f64, f64)]) -> Option<Vec<(f64, f64)>> {
        if coords.len() < 2 {
            return None;
        }

        let url = format!(
            "{}/route/v1/{}/{}?geometries=geojson&overview=full",
            self.config.base_url,
            self.config.profile,
            Self::coord_path(coords)
        );

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<RouteResponse>());

        match response {
            Ok(body) => match body.routes.into_iter().next() {
                Some(route) => Some(normalize_vertices(route.geometry.coordinates)),
                None => {
                    warn!("OSRM route response contains no routes");
                    None
                }
            },
            Err(err) => {
                warn!(%err, "OSRM route request failed");
                None
            }
        }
    }
}

/// GeoJSON vertices arrive lon/lat; internal order is lat/lon.
fn normalize_vertices(coordinates: Vec<[f64; 2]>) -> Vec<(f64, f64)> {
    coordinates
        .into_iter()
        .map(|[lon, lat]| (lat, lon))
        .collect()
}

#[derive(Debug, Deserialize)]
struct TableResponse {
    durations: Option<Vec<Vec<f64>>>,
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    #[serde(default)]
    routes: Vec<RouteEntry>,
}

#[derive(Debug, Deserialize)]
struct RouteEntry {
    geometry: RouteGeometry,
}

#[derive(Debug, Deserialize)]
struct RouteGeometry {
    coordinates: Vec<[f64; 2]>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_path_is_lon_lat() {
        let path = OsrmClient::coord_path(&[(36.1, -115.1), (36.2, -115.2)]);
        assert_eq!(path, "-115.100000,36.100000;-115.200000,36.200000");
    }

    #[test]
    fn test_table_response_parses_durations() {
        let body = r#"{"code":"Ok","durations":[[0.0,120.5],[118.2,0.0]]}"#;
        let parsed: TableResponse = serde_json::from_str(body).unwrap();
        let durations = parsed.durations.unwrap();
        assert_eq!(durations[0][1], 120.5);
        assert_eq!(durations[1][0], 118.2);
    }

    #[test]
    fn test_table_response_without_durations() {
        let body = r#"{"code":"NoTable"}"#;
        let parsed: TableResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.durations.is_none());
    }

    #[test]
    fn test_route_response_parses_geometry() {
        let body = r#"{
            "code": "Ok",
            "routes": [{
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[-115.1, 36.1], [-115.15, 36.12], [-115.2, 36.2]]
                }
            }]
        }"#;
        let parsed: RouteResponse = serde_json::from_str(body).unwrap();
        let coords = &parsed.routes[0].geometry.coordinates;
        assert_eq!(coords.len(), 3);
        assert_eq!(coords[0], [-115.1, 36.1]);
    }

    #[test]
    fn test_vertices_normalized_to_lat_lon() {
        let vertices = normalize_vertices(vec![[-115.1, 36.1], [-115.15, 36.12], [-115.2, 36.2]]);
        assert_eq!(
            vertices,
            vec![(36.1, -115.1), (36.12, -115.15), (36.2, -115.2)]
        );
    }

    #[test]
    fn test_route_response_without_routes() {
        let body = r#"{"code":"NoRoute"}"#;
        let parsed: RouteResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.routes.is_empty());
    }
}
