//! quakewatch - recent earthquakes from the USGS, in your terminal.
//!
//! Fetches the FDSN event feed once in the background, parses it into
//! typed records, and renders them with derived display fields.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

mod cli;
mod client;
mod config;
mod errors;
mod format;
mod models;
mod orchestrator;
mod output;
mod parser;

use cli::Cli;
use client::{QueryParams, TcpProbe, UsgsClient};
use config::Settings;
use orchestrator::{FeedStatus, QueryOrchestrator};
use output::Format;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    init_tracing(cli.verbose, cli.quiet);

    // Settings file supplies query preferences; CLI flags win
    let settings = Settings::load().context("failed to load settings")?;
    let params = QueryParams {
        min_magnitude: cli.min_magnitude.unwrap_or(settings.min_magnitude),
        order_by: cli.order_by.unwrap_or(settings.order_by),
        limit: cli.limit,
    };

    let client = UsgsClient::new().context("failed to create USGS client")?;
    let orchestrator = QueryOrchestrator::with_base_url(Arc::new(client), params, cli.url.clone());
    let probe = TcpProbe::for_url(&cli.url);

    // A fresh orchestrator always accepts the first start
    let rx = orchestrator
        .start(&probe)
        .context("a fetch is already in flight")?;
    let delivery = rx
        .recv()
        .context("fetch worker exited without delivering")?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match delivery.status {
        FeedStatus::FetchError(reason) => {
            anyhow::bail!("failed to fetch earthquake feed: {reason}")
        }
        FeedStatus::NoConnectivity => {
            empty_state(&mut handle, cli.format, "No internet connection.")?;
        }
        FeedStatus::LoadedEmpty => {
            empty_state(&mut handle, cli.format, "No earthquakes found.")?;
        }
        FeedStatus::LoadedNonEmpty => {
            output::write_records(&mut handle, &delivery.records, cli.format)?;
        }
    }

    Ok(())
}

/// Render an empty result: prose for humans, empty documents for pipes.
fn empty_state<W: Write>(writer: &mut W, format: Format, message: &str) -> io::Result<()> {
    match format {
        Format::Human => writeln!(writer, "{message}"),
        Format::Json | Format::Ndjson => output::write_records(writer, &[], format),
    }
}

/// Initialize tracing subscriber.
fn init_tracing(verbose: bool, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
