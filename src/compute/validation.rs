//! Validation for grid geometry, configuration and candidate input.

use crate::config::{Bounds, Config};
use crate::error::{HotspotError, Result};
use hotspot_types::CandidatePoint;

/// Relative tolerance when comparing the two sides of a square.
const SQUARE_TOLERANCE: f64 = 1e-9;

/// Deepest subdivision accepted for a grid.
///
/// A fully subdivided tree at this depth holds 4^9 (262,144) leaves.
pub const MAX_DEPTH: u32 = 9;

/// Validates that bounds are finite, not inverted and square.
///
/// # Examples
///
/// ```
/// use hotspot::compute::validation::validate_bounds;
/// use hotspot::config::Bounds;
///
/// assert!(validate_bounds(&Bounds::centered(48.0)).is_ok());
///
/// // Not square
/// assert!(validate_bounds(&Bounds::new(0.0, 0.0, 4.0, 8.0)).is_err());
/// ```
pub fn validate_bounds(bounds: &Bounds) -> Result<()> {
    let coords = [bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y];
    if coords.iter().any(|c| !c.is_finite()) {
        return Err(HotspotError::InvalidConfig(format!(
            "Root bounds must be finite, got: {:?}",
            coords
        )));
    }

    let (width, height) = (bounds.width(), bounds.height());
    if width < 0.0 || height < 0.0 {
        return Err(HotspotError::InvalidConfig(format!(
            "Root bounds are inverted: width {}, height {}",
            width, height
        )));
    }

    let scale = width.max(height).max(1.0);
    if (width - height).abs() > SQUARE_TOLERANCE * scale {
        return Err(HotspotError::InvalidConfig(format!(
            "Root bounds must be square, got {} x {}",
            width, height
        )));
    }

    Ok(())
}

/// Validates the side length at which subdivision stops.
pub fn validate_min_cell_size(size: f64) -> Result<()> {
    if !size.is_finite() || size <= 0.0 {
        return Err(HotspotError::InvalidConfig(format!(
            "Minimum cell size must be a positive finite number, got: {}",
            size
        )));
    }
    Ok(())
}

/// Number of halvings before `side` drops to `min_cell_size`.
///
/// # Errors
///
/// `InvalidConfig` when more than [`MAX_DEPTH`] halvings are needed.
///
/// # Examples
///
/// ```
/// use hotspot::compute::validation::subdivision_depth;
///
/// assert_eq!(subdivision_depth(96.0, 3.0).unwrap(), 5);
/// assert!(subdivision_depth(96.0, 0.01).is_err());
/// ```
pub fn subdivision_depth(side: f64, min_cell_size: f64) -> Result<u32> {
    let mut side = side;
    let mut depth = 0;
    while side > min_cell_size {
        side /= 2.0;
        depth += 1;
        if depth > MAX_DEPTH {
            return Err(HotspotError::InvalidConfig(format!(
                "Minimum cell size {} needs more than {} levels of subdivision",
                min_cell_size, MAX_DEPTH
            )));
        }
    }
    Ok(depth)
}

/// Validates the fields a grid is built from: bounds, cell size, the
/// resulting depth, and the Earth radius used for projection.
pub fn validate_geometry(config: &Config) -> Result<()> {
    validate_bounds(&config.root_bounds)?;
    validate_min_cell_size(config.min_cell_size)?;
    subdivision_depth(config.root_bounds.width(), config.min_cell_size)?;

    if !config.earth_radius_km.is_finite() || config.earth_radius_km <= 0.0 {
        return Err(HotspotError::InvalidConfig(format!(
            "Earth radius must be a positive finite number, got: {}",
            config.earth_radius_km
        )));
    }

    Ok(())
}

/// Validates every field of a [`Config`].
pub fn validate_config(config: &Config) -> Result<()> {
    validate_geometry(config)?;

    if config.top_k == 0 {
        return Err(HotspotError::InvalidConfig(
            "top_k must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

/// Validates that a candidate has finite coordinates.
///
/// Ranges are not checked: degrees outside ±90/±180 project to defined,
/// if meaningless, offsets.
pub fn validate_candidate(candidate: &CandidatePoint) -> Result<()> {
    if !candidate.is_finite() {
        return Err(HotspotError::InvalidInput(format!(
            "Candidate '{}' has non-finite coordinates ({}, {})",
            candidate.identifier, candidate.latitude, candidate.longitude
        )));
    }
    Ok(())
}

/// Validates that a candidate list has a usable center.
///
/// The first candidate is the projection origin, so the list must be
/// non-empty and its first element finite.
pub fn validate_candidates(candidates: &[CandidatePoint]) -> Result<()> {
    let Some(center) = candidates.first() else {
        return Err(HotspotError::InvalidInput(
            "Candidate list is empty; the first entry is required as the center".to_string(),
        ));
    };
    validate_candidate(center)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_bounds() {
        assert!(validate_bounds(&Bounds::centered(48.0)).is_ok());
        assert!(validate_bounds(&Bounds::new(10.0, 20.0, 14.0, 24.0)).is_ok());
        assert!(validate_bounds(&Bounds::new(0.0, 0.0, 0.0, 0.0)).is_ok());

        assert!(validate_bounds(&Bounds::new(0.0, 0.0, 4.0, 8.0)).is_err());
        assert!(validate_bounds(&Bounds::new(4.0, 4.0, 0.0, 0.0)).is_err());
        assert!(validate_bounds(&Bounds::new(f64::NAN, 0.0, 4.0, 4.0)).is_err());
        assert!(validate_bounds(&Bounds::new(0.0, 0.0, f64::INFINITY, 4.0)).is_err());
    }

    #[test]
    fn test_validate_bounds_tolerates_rounding() {
        let side = 0.1 + 0.2;
        assert!(validate_bounds(&Bounds::new(0.0, 0.0, side, 0.3)).is_ok());
    }

    #[test]
    fn test_validate_min_cell_size() {
        assert!(validate_min_cell_size(3.0).is_ok());
        assert!(validate_min_cell_size(0.001).is_ok());

        for bad in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            let err = validate_min_cell_size(bad).unwrap_err();
            assert!(matches!(err, HotspotError::InvalidConfig(_)));
        }
    }

    #[test]
    fn test_subdivision_depth() {
        assert_eq!(subdivision_depth(96.0, 3.0).unwrap(), 5);
        assert_eq!(subdivision_depth(96.0, 0.75).unwrap(), 7);
        assert_eq!(subdivision_depth(2.0, 3.0).unwrap(), 0);

        // 96 / 2^9 = 0.1875 is the finest cell accepted
        assert_eq!(subdivision_depth(96.0, 0.1875).unwrap(), MAX_DEPTH);
        assert!(subdivision_depth(96.0, 0.18).is_err());
        assert!(subdivision_depth(96.0, 0.025).is_err());
    }

    #[test]
    fn test_validate_geometry_ignores_top_k() {
        let config = Config::default().with_top_k(0);
        assert!(validate_geometry(&config).is_ok());
        assert!(validate_config(&config).is_err());

        let deep = Config::default().with_min_cell_size(0.025);
        let err = validate_geometry(&deep).unwrap_err();
        assert!(matches!(err, HotspotError::InvalidConfig(_)));
    }

    #[test]
    fn test_validate_candidates() {
        let err = validate_candidates(&[]).unwrap_err();
        assert!(matches!(err, HotspotError::InvalidInput(_)));

        let ok = vec![CandidatePoint::new(34.0, -118.0, "90007", "Los Angeles")];
        assert!(validate_candidates(&ok).is_ok());

        let bad_center = vec![CandidatePoint::new(f64::NAN, -118.0, "x", "y")];
        assert!(validate_candidates(&bad_center).is_err());
    }

    #[test]
    fn test_validate_candidate_ignores_range() {
        let far = CandidatePoint::new(120.0, 400.0, "x", "y");
        assert!(validate_candidate(&far).is_ok());
    }
}
