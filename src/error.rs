//! Error types for the hotspot crate.

use thiserror::Error;

/// Errors raised while configuring or running a distribution.
///
/// Points outside the grid, repeated hits on an occupied cell and points
/// on shared cell edges are normal outcomes and never surface here.
#[derive(Debug, Error)]
pub enum HotspotError {
    /// Malformed input such as an empty candidate list or an undecodable payload.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Grid geometry or other configuration that cannot be built.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Fewer items than requested were available for selection.
    #[error("Requested top {requested} but only {available} items are available")]
    SelectionUnderflow { requested: usize, available: usize },

    /// A collaborator failed to produce a value for a region.
    #[error("Lookup failed for '{identifier}': {message}")]
    Lookup { identifier: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HotspotError>;
