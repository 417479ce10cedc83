//! Optional structured tracing (feature `otel`).
//!
//! Enabled when `ECCO_LOG` holds an EnvFilter directive, e.g. `ECCO_LOG=ecco=debug`.
//! Output goes to stderr next to the regular launcher lines.

use std::env;

use once_cell::sync::OnceCell;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

static INIT: OnceCell<()> = OnceCell::new();

fn telemetry_filter_env() -> Option<String> {
    env::var("ECCO_LOG")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Install the global subscriber once. Returns true when tracing is active.
pub fn telemetry_init() -> bool {
    let Some(directive) = telemetry_filter_env() else {
        return false;
    };
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_new(&directive).unwrap_or_else(|e| {
            eprintln!("ecco: telemetry: invalid ECCO_LOG ({e}); using 'info'");
            EnvFilter::new("info")
        });
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true);
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init();
    });
    true
}
