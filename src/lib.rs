//! Quadtree-based spatial thinning of nearby locations.
//!
//! Candidates around a reference point are projected onto a fixed-resolution
//! grid and at most one candidate is kept per cell, so that expensive
//! per-location lookups run on a geographically spread subset.
//!
//! ```rust
//! use hotspot::{CandidatePoint, Config, Distributor};
//!
//! let distributor = Distributor::new(Config::default())?;
//! let regions = distributor.distribute(&[
//!     CandidatePoint::new(34.0, -118.0, "90007", "Los Angeles"),
//!     CandidatePoint::new(34.009, -118.011, "90089", "University Park"),
//! ])?;
//! assert_eq!(regions.len(), 1);
//! # Ok::<(), hotspot::HotspotError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod distributor;
pub mod error;
pub mod geonames;
pub mod pipeline;
pub mod quadtree;
pub mod spatial;

pub use builder::DistributorBuilder;
pub use config::{Bounds, Config};
pub use distributor::{DistributionReport, Distributor};
pub use error::{HotspotError, Result};

pub use geo::{Point, Rect};

pub use hotspot_types::{AcceptedRegion, CandidatePoint, Reading};

pub use compute::{UnderflowPolicy, top_k_by_value};
pub use pipeline::{CandidateSource, Pipeline, PipelineOutput, RegionLookup};
pub use quadtree::{AcceptAll, BuildStats, QuadTree, SpansFeature};
pub use spatial::{DistanceMetric, haversine_km};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{DistributorBuilder, HotspotError, Result};

    pub use crate::{AcceptedRegion, CandidatePoint, Reading};

    pub use crate::{Bounds, Config, DistanceMetric, UnderflowPolicy};

    pub use crate::{Distributor, QuadTree, SpansFeature};

    pub use crate::{CandidateSource, Pipeline, RegionLookup};
}
