//! Feed parser for USGS GeoJSON query responses.
//!
//! Fault isolation contract: one malformed feature must never lose the
//! rest of the feed, and an unparseable document must never surface as an
//! error to the orchestrator.

use tracing::warn;

use crate::models::{Earthquake, FeedDocument, RawFeature};

/// Parse raw feed bytes into a list of earthquakes.
///
/// Features are decoded individually: an entry missing any of `mag`,
/// `place`, `time`, `url` (or carrying the wrong type) is skipped and the
/// remaining entries are kept, in feed order. A document that is not
/// valid JSON, or has no `features` array, yields an empty list.
///
/// The caller cannot distinguish "no events matched" from "document was
/// garbage" through the return value alone; both are an empty list.
#[must_use]
pub fn parse(raw: &[u8]) -> Vec<Earthquake> {
    let document: FeedDocument = match serde_json::from_slice(raw) {
        Ok(document) => document,
        Err(e) => {
            warn!("discarding unparseable feed document: {e}");
            return Vec::new();
        }
    };

    let mut quakes = Vec::with_capacity(document.features.len());
    for (index, feature) in document.features.into_iter().enumerate() {
        match serde_json::from_value::<RawFeature>(feature) {
            Ok(feature) => quakes.push(Earthquake::from(feature)),
            Err(e) => warn!("skipping malformed feature #{index}: {e}"),
        }
    }
    quakes
}
