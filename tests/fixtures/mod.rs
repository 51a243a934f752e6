//! Shared test fixtures: real coordinates around Las Vegas.

use route_planner::geo::Point;

/// Eight stops spread across the Las Vegas valley.
pub fn las_vegas_points() -> Vec<Point> {
    vec![
        Point::named(36.1147, -115.1728, "Bellagio"),
        Point::named(36.1162, -115.1745, "Caesars Palace"),
        Point::named(36.1024, -115.1697, "MGM Grand"),
        Point::named(36.1212, -115.1697, "The Mirage"),
        Point::named(36.0955, -115.1761, "Luxor"),
        Point::named(36.1699, -115.1398, "Fremont Street"),
        Point::named(36.1215, -115.1739, "The LINQ"),
        Point::named(36.0839, -115.1537, "Welcome Sign"),
    ]
}
