use tracing_subscriber::EnvFilter;

/// Install the global subscriber; logs go to stderr so they never mix with rendered events.
///
/// `RUST_LOG` takes precedence over `level` when it is set.
pub fn setup(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
