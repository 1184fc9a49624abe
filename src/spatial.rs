//! Great-circle distances and the planar projection built on them.
//!
//! Distances are in kilometers. All metrics come from the `geo` crate; the
//! haversine metric runs on a sphere of configurable radius, 6367 km by
//! default.

use geo::{Distance, Geodesic, HaversineMeasure, Point, Rhumb};
use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine metric, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6367.0;

/// Distance metrics available for projecting candidates.
///
/// - **Haversine**: spherical distance with a configurable radius (default)
/// - **Geodesic**: ellipsoidal distance (Karney 2013), slower
/// - **Rhumb**: constant-bearing distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    #[default]
    Haversine,
    Geodesic,
    Rhumb,
}

/// Great-circle distance in kilometers between two positions given in
/// decimal degrees, using [`EARTH_RADIUS_KM`].
///
/// Inputs are not range-checked; out-of-range degrees give a defined but
/// meaningless result.
///
/// # Examples
///
/// ```rust
/// use hotspot::spatial::haversine_km;
///
/// let one_degree = haversine_km(0.0, 0.0, 0.0, 1.0);
/// assert!((one_degree - 111.2).abs() < 0.5);
/// ```
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    haversine_km_with_radius(lat1, lon1, lat2, lon2, EARTH_RADIUS_KM)
}

/// Haversine distance on a sphere of `radius_km`.
pub fn haversine_km_with_radius(
    lat1: f64,
    lon1: f64,
    lat2: f64,
    lon2: f64,
    radius_km: f64,
) -> f64 {
    HaversineMeasure::new(radius_km * 1000.0).distance(Point::new(lon1, lat1), Point::new(lon2, lat2))
        / 1000.0
}

/// Distance in kilometers between two `geo::Point`s (x = longitude,
/// y = latitude) under `metric`.
///
/// `radius_km` only applies to [`DistanceMetric::Haversine`].
pub fn distance_km(a: &Point, b: &Point, metric: DistanceMetric, radius_km: f64) -> f64 {
    match metric {
        DistanceMetric::Haversine => haversine_km_with_radius(a.y(), a.x(), b.y(), b.x(), radius_km),
        DistanceMetric::Geodesic => Geodesic.distance(*a, *b) / 1000.0,
        DistanceMetric::Rhumb => Rhumb.distance(*a, *b) / 1000.0,
    }
}

/// Project `point` into planar offsets around `center`.
///
/// `x` is the north-south displacement (latitude varies, longitude held at
/// the center's) and `y` the east-west displacement. Both are unsigned
/// magnitudes, so points in all four quadrants around the center fold onto
/// the same offsets.
///
/// # Examples
///
/// ```rust
/// use geo::Point;
/// use hotspot::spatial::{DistanceMetric, EARTH_RADIUS_KM, project_offset};
///
/// let center = Point::new(-118.0, 34.0);
/// let north = Point::new(-118.0, 34.009);
/// let south = Point::new(-118.0, 33.991);
///
/// let (x_n, y_n) = project_offset(&center, &north, DistanceMetric::Haversine, EARTH_RADIUS_KM);
/// let (x_s, _) = project_offset(&center, &south, DistanceMetric::Haversine, EARTH_RADIUS_KM);
/// assert!((x_n - x_s).abs() < 1e-9);
/// assert_eq!(y_n, 0.0);
/// ```
pub fn project_offset(
    center: &Point,
    point: &Point,
    metric: DistanceMetric,
    radius_km: f64,
) -> (f64, f64) {
    let north_south = Point::new(center.x(), point.y());
    let east_west = Point::new(point.x(), center.y());

    (
        distance_km(center, &north_south, metric, radius_km),
        distance_km(center, &east_west, metric, radius_km),
    )
}
