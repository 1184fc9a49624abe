use serde::{Deserialize, Serialize};

/// A location kept for a grid cell.
///
/// Created once per cell that received a point; never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AcceptedRegion {
    pub identifier: String,
    pub label: String,
}

impl AcceptedRegion {
    pub fn new(identifier: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            label: label.into(),
        }
    }
}

impl From<(String, String)> for AcceptedRegion {
    fn from((identifier, label): (String, String)) -> Self {
        Self { identifier, label }
    }
}

/// A value looked up for an accepted region, e.g. a temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub value: f64,
    pub identifier: String,
    pub label: String,
}

impl Reading {
    pub fn new(value: f64, region: &AcceptedRegion) -> Self {
        Self {
            value,
            identifier: region.identifier.clone(),
            label: region.label.clone(),
        }
    }
}
