use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

/// Install a global fmt subscriber filtered by `RUST_LOG`.
///
/// `default_filter` applies when `RUST_LOG` is unset (e.g.
/// `"syntax_crawler=info"`). Fails instead of panicking when a global
/// subscriber is already installed.
pub fn init_tracing(
    default_filter: &str,
) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
}
