//! Diagnostic logging on stderr.
use tracing_subscriber::EnvFilter;

/// Filter directives, e.g. `HEIMDALL_LOG=heimdall=debug`.
pub const LOG_ENV: &str = "HEIMDALL_LOG";

/// Install the global subscriber. `HEIMDALL_LOG` wins over the configured
/// level; a second call is a no-op.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
