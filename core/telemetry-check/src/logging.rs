//! Structured logging for telemetry-check using tracing.
//!
//! Writes to stderr so stdout stays reserved for the resolved summary. Log level can be
//! controlled via the `RUST_LOG` env var.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "telemetry_check=info,telemetry_core=warn";

pub fn init(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("telemetry_check=debug,telemetry_core=debug")
        } else {
            EnvFilter::new(DEFAULT_FILTER)
        }
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_ansi(false),
        )
        .init();
}
