//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "vidnote=warn",
        1 => "vidnote=info",
        _ => "vidnote=debug",
    }
}

/// Install the global subscriber. Logs go to stderr so stdout stays
/// reserved for command output. `RUST_LOG` overrides the verbosity flag.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    // A subscriber installed earlier (e.g. by a test harness) keeps logging
    if let Err(e) = installed {
        tracing::debug!(error = %e, "keeping existing subscriber");
    }
}
