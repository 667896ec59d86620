//! Resolves the establisher for one query event type from a cache snapshot.
//!
//! ```text
//! telemetry-check dev --cache events.json          → summary JSON, or `null`
//! cat events.json | telemetry-check dev --explain  → summary JSON + reason on stderr
//! ```

use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use telemetry_core::{resolve_with_details, EventCache, Resolution};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "telemetry-check",
    about = "Show which init/upgrade event is in effect before a given event type"
)]
pub struct Args {
    /// Event type being attributed (e.g. `dev`, `build`)
    pub query_event_type: String,

    /// Cache snapshot to read. Reads stdin when omitted.
    #[arg(long)]
    pub cache: Option<PathBuf>,

    /// Print why the result is what it is to stderr
    #[arg(long)]
    pub explain: bool,

    /// Debug-level logging (ignored when RUST_LOG is set)
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn run(args: &Args) -> Result<(), String> {
    run_with(args, io::stdin().lock(), &mut io::stdout().lock(), &mut io::stderr())
}

/// `run` over explicit streams. `input` is only read when no `--cache` path is given.
fn run_with(
    args: &Args,
    input: impl Read,
    out: &mut impl Write,
    diag: &mut impl Write,
) -> Result<(), String> {
    let cache = match &args.cache {
        Some(path) => EventCache::load(path),
        None => EventCache::from_reader(input),
    }
    .map_err(|e| e.to_string())?;

    tracing::debug!(
        query = %args.query_event_type,
        events = cache.len(),
        "Resolving establisher"
    );

    let resolution = resolve_with_details(&args.query_event_type, &cache);

    if args.explain {
        write_explanation(diag, &resolution)
            .map_err(|e| format!("Failed to write explanation: {}", e))?;
    }

    write_resolution(out, &resolution).map_err(|e| format!("Failed to write result: {}", e))?;

    tracing::info!(
        query = %args.query_event_type,
        in_effect = resolution.summary().is_some(),
        "Resolution complete"
    );

    Ok(())
}

fn write_explanation(diag: &mut impl Write, resolution: &Resolution) -> io::Result<()> {
    writeln!(diag, "{}", resolution)?;
    if let Resolution::InEffect { summary, .. } = resolution {
        if let Some(at) = summary.timestamp.as_datetime() {
            writeln!(diag, "recorded at {}", at.to_rfc3339())?;
        }
    }
    Ok(())
}

/// Writes the summary as pretty JSON, or `null` when nothing is in effect.
fn write_resolution(out: &mut impl Write, resolution: &Resolution) -> io::Result<()> {
    let rendered = serde_json::to_string_pretty(&resolution.summary())?;
    writeln!(out, "{}", rendered)
}
