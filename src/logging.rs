use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber. CloudWatch stamps every line, so no timestamps
/// or targets are printed; `RUST_LOG` overrides the default `info` filter.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .without_time()
        .init();
}
