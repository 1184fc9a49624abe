//! Spatial thinning of candidate locations.
//!
//! A [`Distributor`] projects every candidate around the first one, drops
//! it into a freshly built quadtree and keeps the first candidate to reach
//! each cell.

use crate::compute::validation::{validate_candidate, validate_candidates, validate_geometry};
use crate::config::Config;
use crate::error::Result;
use crate::quadtree::{AcceptAll, BuildStats, QuadTree, SpansFeature};
use crate::spatial::project_offset;
use hotspot_types::{AcceptedRegion, CandidatePoint};

/// Outcome of one distribution run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistributionReport {
    /// Accepted regions in the order their cells were first occupied
    pub regions: Vec<AcceptedRegion>,
    pub stats: BuildStats,
    /// Candidates that occupied at least one cell
    pub accepted: usize,
    /// Candidates whose cells were all occupied already
    pub discarded: usize,
    /// Candidates projected outside the grid
    pub outside: usize,
    /// Candidates skipped for non-finite coordinates or for repeating the
    /// center's identifier
    pub skipped: usize,
}

/// Keeps at most one candidate per grid cell.
///
/// # Examples
///
/// ```rust
/// use hotspot::{CandidatePoint, Config, Distributor};
///
/// let distributor = Distributor::new(Config::default())?;
/// let candidates = vec![
///     CandidatePoint::new(34.0, -118.0, "90007", "Los Angeles"),
///     CandidatePoint::new(34.009, -118.011, "90089", "University Park"),
///     CandidatePoint::new(34.010, -118.012, "90037", "Exposition Park"),
///     CandidatePoint::new(34.360, -118.435, "91342", "Sylmar"),
/// ];
///
/// let regions = distributor.distribute(&candidates)?;
/// assert_eq!(regions.len(), 2);
/// assert_eq!(regions[0].identifier, "90089");
/// assert_eq!(regions[1].identifier, "91342");
/// # Ok::<(), hotspot::HotspotError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Distributor<F = AcceptAll> {
    config: Config,
    filter: F,
}

impl Distributor {
    /// Create a distributor that subdivides the whole domain.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_filter(config, AcceptAll)
    }
}

impl<F: SpansFeature> Distributor<F> {
    /// Create a distributor that only subdivides quadrants accepted by
    /// `filter`.
    pub fn with_filter(config: Config, filter: F) -> Result<Self> {
        validate_geometry(&config)?;
        Ok(Self { config, filter })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Thin `candidates` to at most one region per cell.
    ///
    /// The first candidate is the center of the projection and is never
    /// returned.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when `candidates` is empty or the center has
    /// non-finite coordinates.
    pub fn distribute(&self, candidates: &[CandidatePoint]) -> Result<Vec<AcceptedRegion>> {
        Ok(self.distribute_with_report(candidates)?.regions)
    }

    /// Like [`distribute`](Self::distribute), with counters describing what
    /// happened to each candidate.
    pub fn distribute_with_report(&self, candidates: &[CandidatePoint]) -> Result<DistributionReport> {
        validate_candidates(candidates)?;
        let Some((center, rest)) = candidates.split_first() else {
            return Ok(DistributionReport::default());
        };

        let mut tree = QuadTree::build_with(
            &self.config.root_bounds,
            self.config.min_cell_size,
            &self.filter,
        )?;
        let origin = center.point();

        let mut report = DistributionReport {
            stats: tree.stats(),
            ..DistributionReport::default()
        };

        for candidate in rest {
            if let Err(e) = validate_candidate(candidate) {
                log::warn!("Skipping candidate: {}", e);
                report.skipped += 1;
                continue;
            }
            if candidate.identifier == center.identifier {
                log::debug!("Skipping '{}': same identifier as the center", candidate.identifier);
                report.skipped += 1;
                continue;
            }

            let (x, y) = project_offset(
                &origin,
                &candidate.point(),
                self.config.distance_metric,
                self.config.earth_radius_km,
            );
            let placement = tree.place(x, y);

            if placement.is_outside() {
                log::debug!(
                    "'{}' projects to ({:.3}, {:.3}), outside the grid",
                    candidate.identifier,
                    x,
                    y
                );
                report.outside += 1;
            } else if placement.accepted.is_empty() {
                log::debug!("'{}' discarded, cell already occupied", candidate.identifier);
                report.discarded += 1;
            } else {
                log::debug!(
                    "'{}' accepted into {} cell(s) at ({:.3}, {:.3})",
                    candidate.identifier,
                    placement.accepted.len(),
                    x,
                    y
                );
                report.accepted += 1;
                for _ in &placement.accepted {
                    report.regions.push(AcceptedRegion::new(
                        candidate.identifier.clone(),
                        candidate.label.clone(),
                    ));
                }
            }
        }

        log::debug!(
            "Distributed {} candidates: {} regions, {} discarded, {} outside, {} skipped",
            rest.len(),
            report.regions.len(),
            report.discarded,
            report.outside,
            report.skipped
        );

        Ok(report)
    }
}
