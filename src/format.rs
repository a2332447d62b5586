//! Display formatting for earthquake records.
//!
//! Pure functions only: every function here is total over its input and
//! touches no I/O. The renderer decides what colors a tier maps to; this
//! module never names a concrete color.
//!
//! All dates and times render in UTC. The upstream feed carries UTC epoch
//! millis, and a fixed zone keeps output identical across machines.

use chrono::{DateTime, TimeZone, Utc};

/// Substring marking a location offset clause ("5km N of Cairo, Egypt").
const LOCATION_SEPARATOR: &str = " of ";

/// Offset text used when the location has no offset clause.
const FALLBACK_OFFSET: &str = "Near the";

/// Placeholder for epoch values chrono cannot represent.
const UNKNOWN_TIME: &str = "unknown";

/// Severity bucket derived from magnitude.
///
/// Floors 0 and 1 share `Tier1`; floors 2 through 9 map one-to-one;
/// anything else (magnitude >= 10, or negative) is `Tier10Plus`. Callers
/// map each tier to a display color of their choosing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagnitudeTier {
    Tier1,
    Tier2,
    Tier3,
    Tier4,
    Tier5,
    Tier6,
    Tier7,
    Tier8,
    Tier9,
    Tier10Plus,
}

/// Bucket a magnitude into its severity tier by integer floor.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn magnitude_tier(magnitude: f64) -> MagnitudeTier {
    match magnitude.floor() as i64 {
        0 | 1 => MagnitudeTier::Tier1,
        2 => MagnitudeTier::Tier2,
        3 => MagnitudeTier::Tier3,
        4 => MagnitudeTier::Tier4,
        5 => MagnitudeTier::Tier5,
        6 => MagnitudeTier::Tier6,
        7 => MagnitudeTier::Tier7,
        8 => MagnitudeTier::Tier8,
        9 => MagnitudeTier::Tier9,
        _ => MagnitudeTier::Tier10Plus,
    }
}

/// Format a magnitude with one decimal place, e.g. `3.2 -> "3.2"`.
///
/// Uses the standard library formatter, which rounds the nearest
/// representable double half-to-even: `-0.05` renders `"-0.1"`, while
/// `10.95` renders `"10.9"` because the stored double sits just below
/// the midpoint.
#[must_use]
pub fn format_magnitude(magnitude: f64) -> String {
    format!("{magnitude:.1}")
}

/// Split a raw location into `(offset, primary)` display parts.
///
/// Splits on the first `" of "` only, matching feed conventions like
/// `"5km N of Cairo, Egypt"` -> `("5km N of ", "Cairo, Egypt")`. A
/// location without the separator gets the `"Near the"` fallback offset
/// and keeps the whole string as primary.
#[must_use]
pub fn split_location(raw: &str) -> (String, String) {
    match raw.split_once(LOCATION_SEPARATOR) {
        Some((offset, primary)) => {
            (format!("{offset}{LOCATION_SEPARATOR}"), primary.to_string())
        }
        None => (FALLBACK_OFFSET.to_string(), raw.to_string()),
    }
}

/// Format an event time as an abbreviated date, e.g. `"Mar 3, 1984"`.
#[must_use]
pub fn format_date(time_ms: i64) -> String {
    match timestamp(time_ms) {
        Some(t) => t.format("%b %-d, %Y").to_string(),
        None => UNKNOWN_TIME.to_string(),
    }
}

/// Format an event time as a 12-hour clock reading, e.g. `"4:30 PM"`.
#[must_use]
pub fn format_time(time_ms: i64) -> String {
    match timestamp(time_ms) {
        Some(t) => t.format("%-I:%M %p").to_string(),
        None => UNKNOWN_TIME.to_string(),
    }
}

fn timestamp(time_ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(time_ms).single()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_magnitude() {
        assert_eq!(format_magnitude(3.2), "3.2");
        assert_eq!(format_magnitude(3.0), "3.0");
        assert_eq!(format_magnitude(0.0), "0.0");
        assert_eq!(format_magnitude(-0.05), "-0.1");
        // 10.95 as a double is 10.949999..., below the midpoint
        assert_eq!(format_magnitude(10.95), "10.9");
    }

    #[test]
    fn test_magnitude_tier_buckets() {
        assert_eq!(magnitude_tier(0.5), MagnitudeTier::Tier1);
        assert_eq!(magnitude_tier(1.9), MagnitudeTier::Tier1);
        assert_eq!(magnitude_tier(2.0), MagnitudeTier::Tier2);
        assert_eq!(magnitude_tier(6.7), MagnitudeTier::Tier6);
        assert_eq!(magnitude_tier(9.99), MagnitudeTier::Tier9);
        assert_eq!(magnitude_tier(10.2), MagnitudeTier::Tier10Plus);
        assert_eq!(magnitude_tier(-0.5), MagnitudeTier::Tier10Plus);
    }

    #[test]
    fn test_split_location_with_offset() {
        let (offset, primary) = split_location("5km N of Cairo, Egypt");
        assert_eq!(offset, "5km N of ");
        assert_eq!(primary, "Cairo, Egypt");
    }

    #[test]
    fn test_split_location_first_separator_wins() {
        let (offset, primary) = split_location("10km W of City of Industry, CA");
        assert_eq!(offset, "10km W of ");
        assert_eq!(primary, "City of Industry, CA");
    }

    #[test]
    fn test_split_location_without_offset() {
        let (offset, primary) = split_location("Pacific-Antarctic Ridge");
        assert_eq!(offset, "Near the");
        assert_eq!(primary, "Pacific-Antarctic Ridge");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(0), "Jan 1, 1970");
        assert_eq!(format_date(447_179_400_000), "Mar 3, 1984");
        assert_eq!(format_date(1_454_124_312_220), "Jan 30, 2016");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "12:00 AM");
        assert_eq!(format_time(447_179_400_000), "4:30 PM");
        assert_eq!(format_time(1_454_124_312_220), "3:25 AM");
    }

    #[test]
    fn test_out_of_range_time_is_unknown() {
        assert_eq!(format_date(i64::MAX), "unknown");
        assert_eq!(format_time(i64::MAX), "unknown");
    }
}
