//! Geographic primitives: points and great-circle distance.

use serde::{Deserialize, Serialize};

/// Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic point with an optional display name.
///
/// Identity for deduplication is the coordinate pair, not the name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
    pub name: Option<String>,
}

impl Point {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            name: None,
        }
    }

    pub fn named(lat: f64, lon: f64, name: impl Into<String>) -> Self {
        Self {
            lat,
            lon,
            name: Some(name.into()),
        }
    }

    /// Coordinates as a (lat, lon) tuple.
    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lon)
    }

    /// Great-circle distance to another point in kilometers.
    pub fn distance_km(&self, other: &Point) -> f64 {
        haversine_km(self.coords(), other.coords())
    }
}

/// Haversine distance between two (lat, lon) pairs in kilometers.
///
/// Symmetric, and exactly zero for identical coordinates.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lon1) = from;
    let (lat2, lon2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}
