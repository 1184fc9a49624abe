//! Configuration for spatial distribution.
//!
//! `Config` is plain serializable data so it can be loaded from JSON or
//! TOML. Geometry checks that need a typed error live in
//! [`crate::compute::validation`].

use crate::compute::selection::UnderflowPolicy;
use crate::compute::validation;
use crate::spatial::{DistanceMetric, EARTH_RADIUS_KM};
use geo::{Rect, coord};
use serde::de::Error;
use serde::{Deserialize, Serialize};

/// Square planar bounds of the grid, in kilometers around the center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Square bounds of side `2 * half_side` centered on the origin.
    pub const fn centered(half_side: f64) -> Self {
        Self::new(-half_side, -half_side, half_side, half_side)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.min_x, y: self.min_y },
            coord! { x: self.max_x, y: self.max_y },
        )
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::centered(48.0)
    }
}

impl From<Rect<f64>> for Bounds {
    fn from(rect: Rect<f64>) -> Self {
        Self::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }
}

/// Distribution configuration
///
/// # Example
///
/// ```rust
/// use hotspot::Config;
///
/// let config = Config::default();
/// assert_eq!(config.min_cell_size, 3.0);
///
/// let json = r#"{
///     "min_cell_size": 6.0,
///     "distance_metric": "geodesic",
///     "top_k": 5
/// }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.top_k, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Square domain partitioned by the quadtree
    #[serde(default)]
    pub root_bounds: Bounds,

    /// Side length at which subdivision stops
    #[serde(default = "Config::default_min_cell_size")]
    pub min_cell_size: f64,

    /// Sphere radius for the haversine metric
    #[serde(default = "Config::default_earth_radius_km")]
    pub earth_radius_km: f64,

    #[serde(default)]
    pub distance_metric: DistanceMetric,

    /// Number of readings kept by the final selection
    #[serde(default = "Config::default_top_k")]
    pub top_k: usize,

    #[serde(default)]
    pub underflow_policy: UnderflowPolicy,
}

impl Config {
    const fn default_min_cell_size() -> f64 {
        3.0
    }

    const fn default_earth_radius_km() -> f64 {
        EARTH_RADIUS_KM
    }

    const fn default_top_k() -> usize {
        10
    }

    pub fn with_root_bounds(mut self, bounds: Bounds) -> Self {
        self.root_bounds = bounds;
        self
    }

    pub fn with_min_cell_size(mut self, size: f64) -> Self {
        self.min_cell_size = size;
        self
    }

    pub fn with_earth_radius_km(mut self, radius_km: f64) -> Self {
        self.earth_radius_km = radius_km;
        self
    }

    pub fn with_distance_metric(mut self, metric: DistanceMetric) -> Self {
        self.distance_metric = metric;
        self
    }

    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k;
        self
    }

    pub fn with_underflow_policy(mut self, policy: UnderflowPolicy) -> Self {
        self.underflow_policy = policy;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        validation::validate_config(self).map_err(|e| e.to_string())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_bounds: Bounds::default(),
            min_cell_size: Self::default_min_cell_size(),
            earth_radius_km: Self::default_earth_radius_km(),
            distance_metric: DistanceMetric::default(),
            top_k: Self::default_top_k(),
            underflow_policy: UnderflowPolicy::default(),
        }
    }
}
