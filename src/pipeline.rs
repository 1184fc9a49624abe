//! End-to-end run: fetch candidates, thin them, look each region up and
//! keep the lowest readings.
//!
//! Fetching and lookups are supplied by the caller through
//! [`CandidateSource`] and [`RegionLookup`]; closures implement both.

use crate::compute::selection::top_k_by_value;
use crate::distributor::Distributor;
use crate::error::{HotspotError, Result};
use crate::quadtree::{AcceptAll, SpansFeature};
use hotspot_types::{AcceptedRegion, CandidatePoint, Reading};

/// Produces candidates around a reference such as a postal code.
///
/// The first returned candidate must be the reference location itself.
pub trait CandidateSource {
    fn candidates(&mut self, reference: &str) -> Result<Vec<CandidatePoint>>;
}

impl<F> CandidateSource for F
where
    F: FnMut(&str) -> Result<Vec<CandidatePoint>>,
{
    fn candidates(&mut self, reference: &str) -> Result<Vec<CandidatePoint>> {
        self(reference)
    }
}

/// Looks up one value, e.g. a temperature, for an accepted region.
pub trait RegionLookup {
    fn lookup(&mut self, region: &AcceptedRegion) -> Result<f64>;
}

impl<F> RegionLookup for F
where
    F: FnMut(&AcceptedRegion) -> Result<f64>,
{
    fn lookup(&mut self, region: &AcceptedRegion) -> Result<f64> {
        self(region)
    }
}

/// Convert Kelvin to Celsius rounded to two decimals.
///
/// ```rust
/// use hotspot::pipeline::kelvin_to_celsius;
///
/// assert_eq!(kelvin_to_celsius(293.15), 20.0);
/// assert_eq!(kelvin_to_celsius(300.456), 27.31);
/// ```
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    ((kelvin - 273.15) * 100.0).round() / 100.0
}

/// Everything produced by one [`Pipeline::run`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineOutput {
    pub regions: Vec<AcceptedRegion>,
    /// One reading per region, in region order
    pub readings: Vec<Reading>,
    /// Lowest readings, ascending
    pub top: Vec<Reading>,
}

pub struct Pipeline<S, L, F = AcceptAll> {
    distributor: Distributor<F>,
    source: S,
    lookup: L,
}

impl<S, L, F> Pipeline<S, L, F>
where
    S: CandidateSource,
    L: RegionLookup,
    F: SpansFeature,
{
    pub fn new(distributor: Distributor<F>, source: S, lookup: L) -> Self {
        Self {
            distributor,
            source,
            lookup,
        }
    }

    pub fn distributor(&self) -> &Distributor<F> {
        &self.distributor
    }

    /// Run the whole chain for `reference`.
    ///
    /// # Errors
    ///
    /// Propagates source and distribution errors. A failed lookup aborts
    /// the run with [`HotspotError::Lookup`]. Selection underflow follows
    /// the configured [`UnderflowPolicy`](crate::compute::UnderflowPolicy).
    pub fn run(&mut self, reference: &str) -> Result<PipelineOutput> {
        let candidates = self.source.candidates(reference)?;
        let regions = self.distributor.distribute(&candidates)?;
        log::info!(
            "{} candidates around '{}' thinned to {} regions",
            candidates.len(),
            reference,
            regions.len()
        );

        let mut readings = Vec::with_capacity(regions.len());
        for region in &regions {
            let value = self.lookup.lookup(region).map_err(|e| match e {
                HotspotError::Lookup { .. } => e,
                other => HotspotError::Lookup {
                    identifier: region.identifier.clone(),
                    message: other.to_string(),
                },
            })?;
            readings.push(Reading::new(value, region));
        }

        let config = self.distributor.config();
        let top = top_k_by_value(
            readings.iter().map(|r| (r.value, r.clone())),
            config.top_k,
            config.underflow_policy,
        )?
        .into_iter()
        .map(|(_, reading)| reading)
        .collect();

        Ok(PipelineOutput {
            regions,
            readings,
            top,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::selection::UnderflowPolicy;
    use crate::config::Config;

    fn grid_candidates() -> Vec<CandidatePoint> {
        // Center plus twelve candidates in distinct cells, 0.05 degrees apart
        let mut out = vec![CandidatePoint::new(34.0, -118.0, "center", "Center")];
        for i in 0..12 {
            let lat = 34.0 + 0.013 + 0.05 * (i % 4) as f64;
            let lon = -118.0 - 0.017 - 0.05 * (i / 4) as f64;
            out.push(CandidatePoint::new(lat, lon, format!("z{:02}", i), format!("Place {}", i)));
        }
        out
    }

    fn temperature(region: &AcceptedRegion) -> Result<f64> {
        let n: f64 = region.identifier[1..]
            .parse()
            .map_err(|_| HotspotError::InvalidInput(region.identifier.clone()))?;
        Ok(kelvin_to_celsius(300.0 - n))
    }

    #[test]
    fn test_run_selects_lowest_readings() {
        let distributor = Distributor::new(Config::default()).unwrap();
        let source = |_: &str| -> Result<Vec<CandidatePoint>> { Ok(grid_candidates()) };
        let mut pipeline = Pipeline::new(distributor, source, temperature);

        let output = pipeline.run("center").unwrap();
        assert_eq!(output.regions.len(), 12);
        assert_eq!(output.readings.len(), 12);
        assert_eq!(output.top.len(), 10);

        let ids: Vec<&str> = output.top.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(ids[0], "z11");
        assert_eq!(ids[9], "z02");
        assert!(output.top.windows(2).all(|w| w[0].value <= w[1].value));
    }

    #[test]
    fn test_run_underflow_policy() {
        let config = Config::default().with_underflow_policy(UnderflowPolicy::Fail);
        let distributor = Distributor::new(config).unwrap();
        let source = |_: &str| -> Result<Vec<CandidatePoint>> { Ok(grid_candidates()[..6].to_vec()) };
        let mut pipeline = Pipeline::new(distributor, source, temperature);

        let err = pipeline.run("center").unwrap_err();
        assert!(matches!(
            err,
            HotspotError::SelectionUnderflow {
                requested: 10,
                available: 5
            }
        ));
    }

    #[test]
    fn test_run_truncates_by_default() {
        let distributor = Distributor::new(Config::default()).unwrap();
        let source = |_: &str| -> Result<Vec<CandidatePoint>> { Ok(grid_candidates()[..6].to_vec()) };
        let mut pipeline = Pipeline::new(distributor, source, temperature);

        let output = pipeline.run("center").unwrap();
        assert_eq!(output.top.len(), 5);
    }

    #[test]
    fn test_lookup_failure_aborts() {
        let distributor = Distributor::new(Config::default()).unwrap();
        let source = |_: &str| -> Result<Vec<CandidatePoint>> { Ok(grid_candidates()) };
        let lookup = |region: &AcceptedRegion| {
            if region.identifier == "z03" {
                Err(HotspotError::InvalidInput("no data".into()))
            } else {
                Ok(20.0)
            }
        };
        let mut pipeline = Pipeline::new(distributor, source, lookup);

        match pipeline.run("center").unwrap_err() {
            HotspotError::Lookup {
                identifier,
                message,
            } => {
                assert_eq!(identifier, "z03");
                assert!(message.contains("no data"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_source_failure_propagates() {
        let distributor = Distributor::new(Config::default()).unwrap();
        let source = |_: &str| -> Result<Vec<CandidatePoint>> { Ok(Vec::new()) };
        let mut pipeline = Pipeline::new(distributor, source, temperature);

        let err = pipeline.run("00000").unwrap_err();
        assert!(matches!(err, HotspotError::InvalidInput(_)));
    }

    #[test]
    fn test_kelvin_to_celsius() {
        assert_eq!(kelvin_to_celsius(273.15), 0.0);
        assert_eq!(kelvin_to_celsius(0.0), -273.15);
        assert_eq!(kelvin_to_celsius(310.0), 36.85);
    }
}
