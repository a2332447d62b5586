//! Terminal rendering for earthquake records.
//!
//! Supports human-readable (with colors), JSON, and NDJSON formats. The
//! severity-tier-to-color mapping lives here; the formatter core only
//! hands out tiers.

use std::io::{self, Write};

use serde::Serialize;

use crate::format::{
    MagnitudeTier, format_date, format_magnitude, format_time, magnitude_tier, split_location,
};
use crate::models::Earthquake;

// ANSI color codes
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

// Severity tier colors, coolest to hottest
const TIER1: &str = "\x1b[96m"; // bright cyan
const TIER2: &str = "\x1b[92m"; // bright green
const TIER3: &str = "\x1b[93m"; // bright yellow
const TIER4: &str = "\x1b[33m"; // yellow
const TIER5: &str = "\x1b[38;5;214m"; // orange
const TIER6: &str = "\x1b[38;5;208m"; // dark orange
const TIER7: &str = "\x1b[91m"; // bright red
const TIER8: &str = "\x1b[31m"; // red
const TIER9: &str = "\x1b[38;5;160m"; // deep red
const TIER10PLUS: &str = "\x1b[95m"; // bright magenta

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Human-readable terminal output (default)
    #[default]
    Human,
    /// JSON array
    Json,
    /// Newline-delimited JSON (one object per line)
    Ndjson,
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            "ndjson" => Ok(Self::Ndjson),
            _ => Err(format!("unknown format: {s} (expected: human, json, ndjson)")),
        }
    }
}

/// Get the color code for a severity tier.
const fn tier_color(tier: MagnitudeTier) -> &'static str {
    match tier {
        MagnitudeTier::Tier1 => TIER1,
        MagnitudeTier::Tier2 => TIER2,
        MagnitudeTier::Tier3 => TIER3,
        MagnitudeTier::Tier4 => TIER4,
        MagnitudeTier::Tier5 => TIER5,
        MagnitudeTier::Tier6 => TIER6,
        MagnitudeTier::Tier7 => TIER7,
        MagnitudeTier::Tier8 => TIER8,
        MagnitudeTier::Tier9 => TIER9,
        MagnitudeTier::Tier10Plus => TIER10PLUS,
    }
}

/// One record's derived display fields.
///
/// This is the structure emitted in JSON/NDJSON output.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayRow {
    pub magnitude: String,
    pub location_offset: String,
    pub primary_location: String,
    pub date: String,
    pub time: String,
    pub url: String,
}

impl From<&Earthquake> for DisplayRow {
    fn from(quake: &Earthquake) -> Self {
        let (location_offset, primary_location) = split_location(&quake.location);
        Self {
            magnitude: format_magnitude(quake.magnitude),
            location_offset,
            primary_location,
            date: format_date(quake.time_ms),
            time: format_time(quake.time_ms),
            url: quake.url.clone(),
        }
    }
}

/// Write records in human-readable format.
///
/// One record per pair of lines: a color-coded magnitude badge with the
/// split location and timestamp, then the dimmed event URL.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human<W: Write>(writer: &mut W, records: &[Earthquake]) -> io::Result<()> {
    for quake in records {
        let row = DisplayRow::from(quake);
        let color = tier_color(magnitude_tier(quake.magnitude));

        writeln!(
            writer,
            "{color}{BOLD}{magnitude:>5}{RESET} │ {offset}{primary} │ {date} {DIM}{time}{RESET}",
            magnitude = row.magnitude,
            offset = row.location_offset,
            primary = row.primary_location,
            date = row.date,
            time = row.time,
        )?;
        writeln!(writer, "      {DIM}{url}{RESET}", url = row.url)?;
    }
    Ok(())
}

/// Write records as a JSON array of display rows.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json<W: Write>(writer: &mut W, records: &[Earthquake]) -> io::Result<()> {
    let rows: Vec<DisplayRow> = records.iter().map(DisplayRow::from).collect();
    let json = serde_json::to_string_pretty(&rows)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{json}")
}

/// Write records as newline-delimited JSON, one display row per line.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_ndjson<W: Write>(writer: &mut W, records: &[Earthquake]) -> io::Result<()> {
    for quake in records {
        let row = DisplayRow::from(quake);
        let json = serde_json::to_string(&row)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        writeln!(writer, "{json}")?;
    }
    Ok(())
}

/// Write records in the specified format.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_records<W: Write>(
    writer: &mut W,
    records: &[Earthquake],
    format: Format,
) -> io::Result<()> {
    match format {
        Format::Human => write_human(writer, records),
        Format::Json => write_json(writer, records),
        Format::Ndjson => write_ndjson(writer, records),
    }
}
