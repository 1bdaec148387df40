//! Diagnostic logging.
//!
//! User-facing progress goes to stdout through `println!`; this subscriber only carries
//! `tracing` diagnostics to stderr so they never interleave with the JSON-free report.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` wins when set; otherwise `verbose` picks
/// between `debug` and `warn` for this crate.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("spec_splitter={default_level}")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
