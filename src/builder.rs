//! Builder for distributors
//!
//! Collects configuration and an optional subdivision filter, then
//! validates everything once in [`DistributorBuilder::build`].

use crate::config::{Bounds, Config};
use crate::distributor::Distributor;
use crate::error::Result;
use crate::quadtree::{AcceptAll, SpansFeature};
use crate::spatial::DistanceMetric;

/// Builder for a [`Distributor`] with custom geometry and filter.
#[derive(Debug, Clone)]
pub struct DistributorBuilder<F = AcceptAll> {
    config: Config,
    filter: F,
}

impl DistributorBuilder {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            filter: AcceptAll,
        }
    }
}

impl<F> DistributorBuilder<F> {
    /// Replace the whole configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn root_bounds(mut self, bounds: Bounds) -> Self {
        self.config.root_bounds = bounds;
        self
    }

    pub fn min_cell_size(mut self, size: f64) -> Self {
        self.config.min_cell_size = size;
        self
    }

    pub fn distance_metric(mut self, metric: DistanceMetric) -> Self {
        self.config.distance_metric = metric;
        self
    }

    /// Only subdivide quadrants accepted by `filter`.
    pub fn filter<G: SpansFeature>(self, filter: G) -> DistributorBuilder<G> {
        DistributorBuilder {
            config: self.config,
            filter,
        }
    }

    /// Validate the configuration and build the distributor.
    pub fn build(self) -> Result<Distributor<F>>
    where
        F: SpansFeature,
    {
        Distributor::with_filter(self.config, self.filter)
    }
}

impl Default for DistributorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HotspotError;
    use geo::Rect;

    #[test]
    fn test_builder_defaults() {
        let distributor = DistributorBuilder::new().build().unwrap();
        assert_eq!(distributor.config(), &Config::default());
    }

    #[test]
    fn test_builder_overrides() {
        let distributor = DistributorBuilder::new()
            .root_bounds(Bounds::centered(32.0))
            .min_cell_size(2.0)
            .distance_metric(DistanceMetric::Geodesic)
            .build()
            .unwrap();

        let config = distributor.config();
        assert_eq!(config.root_bounds, Bounds::centered(32.0));
        assert_eq!(config.min_cell_size, 2.0);
        assert_eq!(config.distance_metric, DistanceMetric::Geodesic);
    }

    #[test]
    fn test_builder_with_filter() {
        let distributor = DistributorBuilder::new()
            .filter(|r: &Rect<f64>| r.min().x >= 0.0)
            .build()
            .unwrap();
        assert_eq!(distributor.config().min_cell_size, 3.0);
    }

    #[test]
    fn test_builder_rejects_bad_geometry() {
        let err = DistributorBuilder::new()
            .min_cell_size(-1.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, HotspotError::InvalidConfig(_)));
    }
}
