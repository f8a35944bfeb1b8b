use tracing_subscriber::EnvFilter;

/// Env var holding the `tracing` filter directive.
pub const LOG_FILTER_VAR: &str = "LIBTOOL_WRAPPER_LOG";

/// Install the stderr subscriber.
///
/// Defaults to `warn` so a clean archiver run stays silent; stderr also
/// carries the relayed archiver diagnostics.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_VAR)
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();
}
