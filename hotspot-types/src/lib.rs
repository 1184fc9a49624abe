//! # hotspot-types
//!
//! Value types exchanged between the hotspot core and the collaborators
//! around it:
//!
//! - **Input**: `CandidatePoint`, one geocoded location
//! - **Output**: `AcceptedRegion`, one location kept per grid cell
//! - **Lookup results**: `Reading`, a per-region measurement
//!
//! All types are serializable with Serde and convert to the `geo` crate's
//! primitives where a position is involved.
//!
//! ## Examples
//!
//! ```rust
//! use hotspot_types::candidate::CandidatePoint;
//!
//! let usc = CandidatePoint::new(34.0224, -118.2851, "90007", "Los Angeles");
//! assert_eq!(usc.point().x(), -118.2851);
//! ```

pub mod candidate;
pub mod region;

pub use candidate::CandidatePoint;
pub use region::{AcceptedRegion, Reading};
