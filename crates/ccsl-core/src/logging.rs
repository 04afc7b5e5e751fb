//! Logging infrastructure for ccsl.
//!
//! Diagnostics use the `tracing` ecosystem and go to stderr only: stdout is
//! reserved for the status line itself, and a tool invoked on every prompt
//! must not leave log files behind.
//!
//! ## Example
//!
//! ```no_run
//! use ccsl_core::logging;
//!
//! // Initialize logging once at startup
//! logging::init_logging(false);
//!
//! tracing::warn!("invalid JSON at line 3 in transcript");
//! ```

use tracing_subscriber::EnvFilter;

/// Initialize the ccsl logging system.
///
/// Writes human-readable output to stderr. The default level is WARN so that
/// only transcript diagnostics surface during normal status-line rendering;
/// `debug` (the `--debug` flag) raises it to DEBUG. `RUST_LOG` overrides
/// both.
pub fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "ccsl={level},ccsl_core={level},ccsl_metrics={level},ccsl_render={level}"
        ))
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .try_init();
}

/// Initialize console-only logging for tests.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
