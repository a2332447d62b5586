//! Command-line interface definitions.
//!
//! Uses clap derive API for argument parsing.

use clap::Parser;

use crate::client::USGS_QUERY_URL;
use crate::output::Format;

/// Recent earthquakes from the USGS, in your terminal.
#[derive(Parser, Debug)]
#[command(name = "quakewatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Minimum magnitude to request (overrides the settings file)
    #[arg(long)]
    pub min_magnitude: Option<String>,

    /// Result ordering, e.g. time or magnitude (overrides the settings file)
    #[arg(long)]
    pub order_by: Option<String>,

    /// Maximum number of events to request
    #[arg(long, short = 'n', default_value = "10")]
    pub limit: u32,

    /// Output format
    #[arg(long, short = 'f', default_value = "human", value_parser = parse_format)]
    pub format: Format,

    /// Feed endpoint (override to test against a local server)
    #[arg(long, default_value = USGS_QUERY_URL)]
    pub url: String,

    /// Enable verbose debug logging
    #[arg(long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(long)]
    pub quiet: bool,
}

/// Parse an output format from string.
fn parse_format(s: &str) -> Result<Format, String> {
    s.parse()
}
