use geo::Point;
use serde::{Deserialize, Serialize};

/// A geocoded location offered for distribution.
///
/// Coordinates are decimal degrees. The first candidate of a sequence is
/// the reference location the others are projected around.
///
/// # Examples
///
/// ```
/// use hotspot_types::candidate::CandidatePoint;
///
/// let center = CandidatePoint::new(34.0, -118.0, "90007", "Los Angeles");
/// assert_eq!(center.latitude, 34.0);
/// assert_eq!(center.point().y(), 34.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidatePoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Postal code or other stable key handed to lookups
    pub identifier: String,
    /// Human-readable place name
    pub label: String,
}

impl CandidatePoint {
    pub fn new(
        latitude: f64,
        longitude: f64,
        identifier: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            latitude,
            longitude,
            identifier: identifier.into(),
            label: label.into(),
        }
    }

    /// Position as a `geo::Point` (x = longitude, y = latitude).
    pub fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }

    /// True when both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}
