//! ptoa-translate - translate workflow events to legacy job update events.
//!
//! Reads JSON-lines records (`{"event": {...}, "opaque_data": "..."}`) from a
//! file or stdin and writes one legacy job update event per line to stdout.

use clap::Parser;
use ptoa_events::events::EventForwarder;
use ptoa_events::types::ErrorPolicy;
use ptoa_events::{Config, EventTranslator};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ptoa-translate", version, about)]
struct Cli {
    /// Input file of JSON-lines records; stdin when omitted.
    input: Option<PathBuf>,

    /// JSON configuration file.
    #[arg(long, env = "PTOA_CONFIG")]
    config: Option<PathBuf>,

    /// Stop at the first un-forwardable record instead of skipping it.
    #[arg(long)]
    fail_fast: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if cli.fail_fast {
        config.forwarding.on_error = ErrorPolicy::Abort;
    }

    ptoa_events::observability::init_tracing(&config.observability);

    let forwarder = EventForwarder::new(EventTranslator::new(), config.forwarding.clone());
    let stdout = io::stdout().lock();

    let report = match &cli.input {
        Some(path) => forwarder.forward_lines(BufReader::new(File::open(path)?), stdout)?,
        None => forwarder.forward_lines(io::stdin().lock(), stdout)?,
    };

    tracing::info!(
        forwarded = report.forwarded,
        skipped = report.skipped,
        "translation finished"
    );
    Ok(())
}
