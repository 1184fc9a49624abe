//! Decoding of GeoNames nearby-postal-code payloads into candidates.
//!
//! The crate performs no I/O; callers fetch the JSON and hand it here.

use crate::error::{HotspotError, Result};
use hotspot_types::CandidatePoint;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct NearbyPostalCodes {
    #[serde(rename = "postalCodes")]
    postal_codes: Option<Vec<PostalCodeRecord>>,
    status: Option<ServiceStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostalCodeRecord {
    #[serde(deserialize_with = "number_or_string")]
    lat: f64,
    #[serde(deserialize_with = "number_or_string")]
    lng: f64,
    postal_code: String,
    #[serde(default)]
    place_name: String,
}

#[derive(Debug, Deserialize)]
struct ServiceStatus {
    message: String,
}

fn number_or_string<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn ascii_only(s: &str) -> String {
    s.chars().filter(char::is_ascii).collect()
}

/// Decode a `findNearbyPostalCodesJSON` response, preserving order.
///
/// The first record is the queried location itself and becomes the
/// projection center. Non-ASCII characters are dropped from identifiers and
/// labels.
///
/// # Errors
///
/// `InvalidInput` when the service reported an error or the payload has no
/// `postalCodes` list; `Serialization` when the JSON is malformed.
///
/// # Examples
///
/// ```rust
/// use hotspot::geonames::parse_postal_codes;
///
/// let json = r#"{"postalCodes": [
///     {"lat": 34.0224, "lng": -118.2851, "postalCode": "90007", "placeName": "Los Angeles"},
///     {"lat": "34.0250", "lng": "-118.2800", "postalCode": "90089", "placeName": "University Park"}
/// ]}"#;
///
/// let candidates = parse_postal_codes(json)?;
/// assert_eq!(candidates.len(), 2);
/// assert_eq!(candidates[1].latitude, 34.025);
/// # Ok::<(), hotspot::HotspotError>(())
/// ```
pub fn parse_postal_codes(json: &str) -> Result<Vec<CandidatePoint>> {
    let response: NearbyPostalCodes = serde_json::from_str(json)?;

    if let Some(status) = response.status {
        return Err(HotspotError::InvalidInput(format!(
            "Postal code service error: {}",
            status.message
        )));
    }

    let records = response.postal_codes.ok_or_else(|| {
        HotspotError::InvalidInput("Response has no 'postalCodes' list".to_string())
    })?;

    Ok(records
        .into_iter()
        .map(|r| {
            CandidatePoint::new(
                r.lat,
                r.lng,
                ascii_only(&r.postal_code),
                ascii_only(&r.place_name),
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_order() {
        let json = r#"{
            "postalCodes": [
                {"lat": 34.0224, "lng": -118.2851, "postalCode": "90007", "placeName": "Los Angeles", "distance": "0"},
                {"lat": 34.0522, "lng": -118.2437, "postalCode": "90012", "placeName": "Downtown", "distance": "4.1"},
                {"lat": 33.9850, "lng": -118.4695, "postalCode": "90291", "placeName": "Venice", "distance": "18.7"}
            ]
        }"#;

        let candidates = parse_postal_codes(json).unwrap();
        let ids: Vec<&str> = candidates.iter().map(|c| c.identifier.as_str()).collect();
        assert_eq!(ids, vec!["90007", "90012", "90291"]);
        assert_eq!(candidates[2].longitude, -118.4695);
    }

    #[test]
    fn test_parse_strips_non_ascii() {
        let json = r#"{"postalCodes": [
            {"lat": 1.0, "lng": 2.0, "postalCode": "00100", "placeName": "Española"}
        ]}"#;
        let candidates = parse_postal_codes(json).unwrap();
        assert_eq!(candidates[0].label, "Espaola");
    }

    #[test]
    fn test_parse_missing_list() {
        let err = parse_postal_codes(r#"{"other": []}"#).unwrap_err();
        assert!(matches!(err, HotspotError::InvalidInput(_)));
    }

    #[test]
    fn test_parse_service_error() {
        let json = r#"{"status": {"message": "user account not enabled", "value": 10}}"#;
        let err = parse_postal_codes(json).unwrap_err();
        match err {
            HotspotError::InvalidInput(msg) => assert!(msg.contains("not enabled")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_malformed_json() {
        let err = parse_postal_codes("{not json").unwrap_err();
        assert!(matches!(err, HotspotError::Serialization(_)));

        let err = parse_postal_codes(r#"{"postalCodes": [{"lat": "north"}]}"#).unwrap_err();
        assert!(matches!(err, HotspotError::Serialization(_)));
    }

    #[test]
    fn test_parse_empty_list() {
        let candidates = parse_postal_codes(r#"{"postalCodes": []}"#).unwrap();
        assert!(candidates.is_empty());
    }
}
