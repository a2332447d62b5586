//! Data model for USGS earthquake query responses.
//!
//! `Earthquake` is the domain record the rest of the program works with.
//! The `Raw*` structures mirror the GeoJSON shape returned by the FDSN
//! event service and exist only for serde deserialization in the parser.

use serde::Deserialize;

/// One earthquake event, fully constructed.
///
/// A record is only ever created with all four fields present; feed
/// entries missing any of them never become an `Earthquake`. Fields are
/// never mutated after construction. List order is feed order, so no
/// ordering is defined here.
#[derive(Debug, Clone, PartialEq)]
pub struct Earthquake {
    /// Seismic magnitude; can be negative or fractional
    pub magnitude: f64,

    /// Raw location description, e.g. "5km N of Cairo, Egypt"
    pub location: String,

    /// Event time in milliseconds since epoch (UTC)
    pub time_ms: i64,

    /// Event page URL; passed through, not validated
    pub url: String,
}

/// Top-level GeoJSON document from the FDSN event service.
///
/// Features are kept as opaque JSON values so that one malformed entry
/// can be decoded (and rejected) independently of the rest.
#[derive(Debug, Deserialize)]
pub struct FeedDocument {
    /// Earthquake events, in feed order
    pub features: Vec<serde_json::Value>,
}

/// A single feature element, decoded per entry.
#[derive(Debug, Deserialize)]
pub struct RawFeature {
    /// Event properties
    pub properties: RawProperties,
}

/// The four properties a feature must carry to become an [`Earthquake`].
///
/// All fields are required; serde rejects a feature that lacks any of
/// them or carries the wrong JSON type.
#[derive(Debug, Deserialize)]
pub struct RawProperties {
    /// Magnitude value
    pub mag: f64,

    /// Human-readable place description
    pub place: String,

    /// Event time (ms since epoch)
    pub time: i64,

    /// Event page URL
    pub url: String,
}

impl From<RawFeature> for Earthquake {
    fn from(raw: RawFeature) -> Self {
        Self {
            magnitude: raw.properties.mag,
            location: raw.properties.place,
            time_ms: raw.properties.time,
            url: raw.properties.url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_feature_requires_all_fields() {
        let missing_mag = serde_json::json!({
            "properties": {
                "place": "10km SSW of Idyllwild, CA",
                "time": 1454124312220i64,
                "url": "https://earthquake.usgs.gov/earthquakes/eventpage/ci37384354"
            }
        });
        assert!(serde_json::from_value::<RawFeature>(missing_mag).is_err());

        let complete = serde_json::json!({
            "properties": {
                "mag": 2.7,
                "place": "10km SSW of Idyllwild, CA",
                "time": 1454124312220i64,
                "url": "https://earthquake.usgs.gov/earthquakes/eventpage/ci37384354"
            }
        });
        let feature: RawFeature = serde_json::from_value(complete).expect("valid feature");
        let quake = Earthquake::from(feature);
        assert!((quake.magnitude - 2.7).abs() < f64::EPSILON);
        assert_eq!(quake.time_ms, 1_454_124_312_220);
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let string_mag = serde_json::json!({
            "properties": {
                "mag": "2.7",
                "place": "somewhere",
                "time": 0,
                "url": "https://example.org"
            }
        });
        assert!(serde_json::from_value::<RawFeature>(string_mag).is_err());
    }
}
