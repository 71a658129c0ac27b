/// Initializes the tracing subscriber for binaries built on this crate.
///
/// Filtering follows `RUST_LOG`; without it only warnings and errors are shown.
///
/// - `RUST_LOG=info` - one line per remote operation
/// - `RUST_LOG=remote_crud=debug` - also the compiled queries and request paths
///
/// Calling this twice is harmless; the second call leaves the first subscriber
/// in place.
pub fn setup_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
